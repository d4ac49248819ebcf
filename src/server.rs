//! JSON HTTP server.
//!
//! Exposes the search pipeline to browser and API clients. The corpus is
//! loaded once before the server starts and shared read-only by every
//! request.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/search` | Search the corpus: `{"query": "..."}` |
//! | `GET`  | `/api/documents` | List every document in corpus order |
//! | `GET`  | `/health` | Health check (version and document count) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": "Query parameter is required and cannot be empty", "code": "bad_request" }
//! ```
//!
//! Error codes: `bad_request` (400), `internal` (500). Internal failures,
//! including handler panics, are logged and answered with a generic message.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

use crate::config::Config;
use crate::corpus::Corpus;
use crate::models::{Document, SearchResponse};
use crate::search::{self, SearchError, SearchSettings};

const INVALID_QUERY_MESSAGE: &str = "Query parameter is required and cannot be empty";
const INTERNAL_MESSAGE: &str = "An error occurred while processing your search";

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    corpus: Corpus,
    settings: Arc<SearchSettings>,
}

impl AppState {
    pub fn new(config: &Config, corpus: Corpus) -> Self {
        Self {
            corpus,
            settings: Arc::new(SearchSettings::from(config)),
        }
    }
}

/// Builds the router with all routes and layers attached.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/api/search", post(handle_search))
        .route("/api/documents", get(handle_documents))
        .route("/health", get(handle_health))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server on `[server].bind` and runs until the process is
/// terminated.
pub async fn run_server(config: &Config, corpus: Corpus) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let documents = corpus.len();
    let app = router(AppState::new(config, corpus));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, documents, "search server listening");
    println!("Search server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error body: `{"error": "<message>", "code": "<code>"}`.
///
/// `error` is the human-readable message string that clients display;
/// `code` is the machine-readable companion (`"bad_request"` or `"internal"`).
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 500 error with the generic client-facing message.
fn internal() -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: INTERNAL_MESSAGE.to_string(),
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::EmptyQuery => bad_request(INVALID_QUERY_MESSAGE),
            SearchError::Internal(e) => {
                tracing::error!(error = %e, "search failed");
                internal()
            }
        }
    }
}

/// Turns a handler panic into the standard 500 response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = detail, "request handler panicked");
    internal().into_response()
}

// ============ POST /api/search ============

/// Handler for `POST /api/search`.
///
/// Returns `400` when the body is not JSON or `query` is missing, not a
/// string, or blank. A query that matches nothing is a `200` with the
/// no-match message.
async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(body) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected search body");
        bad_request(INVALID_QUERY_MESSAGE)
    })?;

    let query = body
        .get("query")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| bad_request(INVALID_QUERY_MESSAGE))?;

    let response = search::execute(&state.corpus, query, &state.settings)?;
    tracing::info!(
        query_len = query.trim().len(),
        matches = response.results.len(),
        "search served"
    );

    Ok(Json(response))
}

// ============ GET /api/documents ============

#[derive(Serialize)]
struct DocumentListResponse {
    documents: Vec<Document>,
}

async fn handle_documents(State(state): State<AppState>) -> Json<DocumentListResponse> {
    Json(DocumentListResponse {
        documents: state.corpus.documents().to_vec(),
    })
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
    /// Number of documents in the loaded corpus.
    documents: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documents: state.corpus.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_maps_to_bad_request() {
        let err = AppError::from(SearchError::EmptyQuery);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "bad_request");
        assert_eq!(err.message, INVALID_QUERY_MESSAGE);
    }

    #[test]
    fn test_internal_hides_detail() {
        let err = AppError::from(SearchError::Internal(anyhow::anyhow!("secret detail")));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "internal");
        assert!(!err.message.contains("secret"));
    }

    #[test]
    fn test_panic_becomes_internal_response() {
        let resp = handle_panic(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

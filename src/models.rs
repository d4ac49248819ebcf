//! Core data models used throughout FAQ Search.
//!
//! These types represent the corpus documents, the per-query scored view of
//! them, and the response assembled for callers.

use serde::{Deserialize, Serialize};

/// One FAQ entry in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique, stable identifier.
    pub id: String,
    pub title: String,
    pub body: String,
}

/// A corpus document paired with its relevance score for one query.
///
/// Borrows from the corpus and is discarded once the response is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredDocument<'a> {
    pub doc: &'a Document,
    pub score: u32,
}

/// Response returned for a search request.
///
/// `results`, `sources` and the documents the `summary` was built from are
/// always the same slice in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Document>,
    pub summary: Option<String>,
    pub sources: Vec<String>,
    pub message: String,
}

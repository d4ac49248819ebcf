//! Keyword scoring, top-N selection and the search pipeline.
//!
//! # Scoring
//!
//! Every document in the corpus is scored against the lowercased query with
//! four additive signals:
//!
//! | Signal | Weight |
//! |--------|--------|
//! | whole query is a substring of the title | 20 |
//! | whole query is a substring of the body  | 10 |
//! | each query term found in the title      | 5  |
//! | each query term found in the body       | 2  |
//!
//! Terms come from splitting the query on whitespace (including U+FEFF). A
//! term repeated in the query is counted once per repetition. Documents
//! scoring zero are dropped and the rest are sorted by score, descending,
//! with ties kept in corpus order.
//!
//! # Pipeline
//!
//! [`execute`] validates the raw query, ranks the corpus, keeps the top
//! `top_n` documents and, when anything matched, builds the summary.

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::config::Config;
use crate::models::{Document, ScoredDocument, SearchResponse};
use crate::render;
use crate::summary;

pub const TITLE_PHRASE_WEIGHT: u32 = 20;
pub const BODY_PHRASE_WEIGHT: u32 = 10;
pub const TITLE_TERM_WEIGHT: u32 = 5;
pub const BODY_TERM_WEIGHT: u32 = 2;

pub const NO_MATCHES_MESSAGE: &str = "No matches found for your query. Try different keywords.";

/// Failures surfaced by [`execute`].
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was empty or whitespace-only.
    #[error("query must not be empty")]
    EmptyQuery,
    /// Anything unexpected; callers must not leak the detail to clients.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Per-signal contributions to a document's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub title_phrase: u32,
    pub body_phrase: u32,
    pub title_terms: u32,
    pub body_terms: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.title_phrase + self.body_phrase + self.title_terms + self.body_terms
    }
}

/// Lowercased query and its whitespace-separated terms.
struct QueryTerms {
    lower: String,
}

impl QueryTerms {
    fn new(query: &str) -> Self {
        Self {
            lower: query.to_lowercase(),
        }
    }

    fn terms(&self) -> impl Iterator<Item = &str> {
        self.lower.split(is_query_space).filter(|t| !t.is_empty())
    }

    fn score(&self, doc: &Document) -> ScoreBreakdown {
        let title = doc.title.to_lowercase();
        let body = doc.body.to_lowercase();

        let mut breakdown = ScoreBreakdown::default();
        if title.contains(self.lower.as_str()) {
            breakdown.title_phrase = TITLE_PHRASE_WEIGHT;
        }
        if body.contains(self.lower.as_str()) {
            breakdown.body_phrase = BODY_PHRASE_WEIGHT;
        }
        for term in self.terms() {
            if title.contains(term) {
                breakdown.title_terms += TITLE_TERM_WEIGHT;
            }
            if body.contains(term) {
                breakdown.body_terms += BODY_TERM_WEIGHT;
            }
        }
        breakdown
    }
}

/// Scores a single document, returning each signal's contribution.
pub fn explain_score(query: &str, doc: &Document) -> ScoreBreakdown {
    QueryTerms::new(query).score(doc)
}

/// Scores every document and returns those with a positive score, best first.
///
/// `query` is expected to be trimmed and non-empty; see [`validate_query`].
/// The sort is stable, so equal scores keep their corpus order.
pub fn score_and_rank<'a>(query: &str, corpus: &'a [Document]) -> Vec<ScoredDocument<'a>> {
    let query = QueryTerms::new(query);

    let mut ranked: Vec<ScoredDocument<'a>> = corpus
        .iter()
        .map(|doc| ScoredDocument {
            doc,
            score: query.score(doc).total(),
        })
        .filter(|scored| scored.score > 0)
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Keeps at most `top_n` of the ranked documents.
pub fn select_top(mut ranked: Vec<ScoredDocument<'_>>, top_n: usize) -> Vec<ScoredDocument<'_>> {
    ranked.truncate(top_n);
    ranked
}

/// Whitespace for query trimming and term splitting. Includes the byte
/// order mark, which `char::is_whitespace` does not.
fn is_query_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Trims the raw query and rejects it if nothing is left.
pub fn validate_query(raw: &str) -> Result<&str, SearchError> {
    let trimmed = raw.trim_matches(is_query_space);
    if trimmed.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(trimmed)
}

/// Limits applied by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Maximum number of documents returned and summarized.
    pub top_n: usize,
    /// Maximum number of keywords named in the summary.
    pub max_keywords: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from(&Config::minimal())
    }
}

impl From<&Config> for SearchSettings {
    fn from(config: &Config) -> Self {
        Self {
            top_n: config.retrieval.top_n,
            max_keywords: config.summary.max_keywords,
        }
    }
}

/// Status line for a non-empty result set.
pub fn match_message(count: usize) -> String {
    format!("Found {} match{}", count, if count == 1 { "" } else { "es" })
}

/// Runs the full pipeline: validate, rank, select, summarize, assemble.
pub fn execute(
    corpus: &[Document],
    raw_query: &str,
    settings: &SearchSettings,
) -> Result<SearchResponse, SearchError> {
    let query = validate_query(raw_query)?;

    if settings.top_n == 0 {
        return Err(anyhow!("top_n must be >= 1").into());
    }

    let top = select_top(score_and_rank(query, corpus), settings.top_n);
    tracing::debug!(
        query_len = query.len(),
        corpus = corpus.len(),
        matches = top.len(),
        "search executed"
    );

    if top.is_empty() {
        return Ok(SearchResponse {
            results: Vec::new(),
            summary: None,
            sources: Vec::new(),
            message: NO_MATCHES_MESSAGE.to_string(),
        });
    }

    let summary = summary::summarize(&top, query, settings.max_keywords);

    Ok(SearchResponse {
        results: top.iter().map(|s| s.doc.clone()).collect(),
        summary: Some(summary),
        sources: top.iter().map(|s| s.doc.id.clone()).collect(),
        message: match_message(top.len()),
    })
}

/// CLI entry point for `faq search`.
pub fn run_search(
    corpus: &[Document],
    settings: &SearchSettings,
    query: &str,
    explain: bool,
    json: bool,
) -> Result<()> {
    let response = execute(corpus, query, settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", render::render_response(&response));

    if explain && !response.results.is_empty() {
        let query = validate_query(query)?;
        println!("--- Score breakdown ---");
        for doc in &response.results {
            let b = explain_score(query, doc);
            println!(
                "{:<16} total={:<4} title_phrase={} body_phrase={} title_terms={} body_terms={}",
                doc.id,
                b.total(),
                b.title_phrase,
                b.body_phrase,
                b.title_terms,
                b.body_terms
            );
        }
    }

    Ok(())
}

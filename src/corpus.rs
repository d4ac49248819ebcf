//! The in-memory FAQ corpus.
//!
//! The corpus is loaded once at start-up, validated, and then shared
//! read-only by every query. [`Corpus`] is a cheap-to-clone handle over an
//! `Arc<[Document]>`, so the HTTP server can hand it to every handler without
//! locking.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::models::Document;

/// Corpus compiled into the binary, used when no `[corpus].path` is set.
const BUNDLED_CORPUS: &str = include_str!("../data/faqs.json");

/// Immutable, shared document table.
#[derive(Debug, Clone)]
pub struct Corpus {
    docs: Arc<[Document]>,
}

impl Corpus {
    /// Builds a corpus from already-materialized documents.
    ///
    /// Fails if any id is empty or appears more than once.
    pub fn new(docs: Vec<Document>) -> Result<Self> {
        {
            let mut seen = HashSet::new();
            for (i, doc) in docs.iter().enumerate() {
                if doc.id.trim().is_empty() {
                    bail!("corpus entry {} has an empty id", i);
                }
                if !seen.insert(doc.id.as_str()) {
                    bail!("duplicate document id in corpus: {}", doc.id);
                }
            }
        }
        Ok(Self { docs: docs.into() })
    }

    /// Parses a JSON array of `{id, title, body}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let docs: Vec<Document> =
            serde_json::from_str(json).with_context(|| "Failed to parse corpus JSON")?;
        Self::new(docs)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid corpus file: {}", path.display()))
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CORPUS)
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.docs.iter().find(|d| d.id == id)
    }
}

impl Deref for Corpus {
    type Target = [Document];

    fn deref(&self) -> &[Document] {
        &self.docs
    }
}

/// Loads the corpus named by the configuration, or the bundled one.
pub fn load_corpus(config: &Config) -> Result<Corpus> {
    let (corpus, source) = match &config.corpus.path {
        Some(path) => (Corpus::from_path(path)?, path.display().to_string()),
        None => (Corpus::bundled()?, "bundled".to_string()),
    };
    tracing::info!(documents = corpus.len(), %source, "corpus loaded");
    Ok(corpus)
}

/// Prints every document id and title, in corpus order.
pub fn list_corpus(corpus: &Corpus) -> Result<()> {
    println!("{:<16} TITLE", "ID");
    for doc in corpus.iter() {
        println!("{:<16} {}", doc.id, doc.title);
    }
    println!();
    println!("{} documents", corpus.len());
    Ok(())
}

/// Prints a single document, failing if the id is unknown.
pub fn run_get(corpus: &Corpus, id: &str) -> Result<()> {
    let Some(doc) = corpus.get(id) else {
        bail!("document not found: {}", id);
    };
    println!("--- Document ---");
    println!("id: {}", doc.id);
    println!("title: {}", doc.title);
    println!();
    println!("{}", doc.body);
    Ok(())
}

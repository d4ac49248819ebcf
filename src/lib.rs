//! # FAQ Search
//!
//! Keyword search and summarization over a small, in-memory FAQ corpus.
//!
//! A query is scored against every document's title and body, the best
//! matches are kept, and a short natural-language summary is written from
//! the topics they cover. The same pipeline backs the `faq` CLI and the JSON
//! HTTP server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌───────────┐   ┌──────────────┐
//! │  Corpus  │──▶│ score_and_rank│──▶│ select_top│──▶│  summarize   │
//! │ (shared) │   │   (search)    │   │  (top_n)  │   │  (summary)   │
//! └──────────┘   └───────────────┘   └───────────┘   └──────┬───────┘
//!                                                           │
//!                                   ┌───────────────────────┤
//!                                   ▼                       ▼
//!                              ┌──────────┐           ┌──────────┐
//!                              │   CLI    │           │   HTTP   │
//!                              │  (faq)   │           │ (server) │
//!                              └──────────┘           └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! faq corpus                         # list the loaded documents
//! faq search "trust badges"          # rank, summarize, print
//! faq search "checkout" --json       # same, as JSON
//! faq serve                          # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`corpus`] | Loading and sharing the document table |
//! | [`search`] | Scoring, top-N selection, and the search pipeline |
//! | [`summary`] | Keyword-based result summary |
//! | [`render`] | Terminal rendering of responses |
//! | [`server`] | JSON HTTP server |

pub mod config;
pub mod corpus;
pub mod models;
pub mod render;
pub mod search;
pub mod server;
pub mod summary;

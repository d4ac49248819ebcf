//! # FAQ Search CLI (`faq`)
//!
//! Searches the FAQ corpus from the terminal or serves the same search over
//! HTTP.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `faq search "<query>"` | Rank the corpus and print the summary and top results |
//! | `faq serve` | Start the JSON HTTP server |
//! | `faq corpus` | List every document id and title |
//! | `faq get <id>` | Print one document |
//!
//! ## Examples
//!
//! ```bash
//! faq search "trust badges" --config ./config/faq.toml
//! faq search "pricing" --limit 5 --explain
//! faq serve --log-format json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use faq_search::{config, corpus, render, search, server};

/// FAQ Search — keyword search and summaries over a small FAQ corpus.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist the built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "faq",
    about = "FAQ Search — keyword search and summaries over a small FAQ corpus",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/faq.toml")]
    config: PathBuf,

    /// Log output format (logs are written to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search the corpus.
    ///
    /// Prints a summary of the best matches followed by each match's title,
    /// a body snippet and its id.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of results (overrides `[retrieval].top_n`).
        #[arg(long, value_parser = parse_limit)]
        limit: Option<usize>,

        /// Print each result's score breakdown.
        #[arg(long)]
        explain: bool,

        /// Print the response as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP server.
    ///
    /// Binds to `[server].bind` and serves `POST /api/search`,
    /// `GET /api/documents` and `GET /health`.
    Serve,

    /// List every document in the corpus.
    Corpus,

    /// Print a document by id.
    Get {
        /// Document id.
        id: String,
    },
}

/// Parse a `--limit` value, which must be at least 1.
fn parse_limit(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("invalid limit: '{}' is not a number", s))?;
    if n == 0 {
        return Err("limit must be >= 1".to_string());
    }
    Ok(n)
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let default_filter = match verbose {
        0 => "faq_search=info",
        1 => "faq_search=debug",
        _ => "faq_search=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match format {
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    let cfg = config::load_config_or_default(&cli.config)?;
    let faqs = corpus::load_corpus(&cfg)?;

    match cli.command {
        Commands::Search {
            query,
            limit,
            explain,
            json,
        } => {
            let mut settings = search::SearchSettings::from(&cfg);
            if let Some(limit) = limit {
                settings.top_n = limit;
            }
            if let Err(e) = search::run_search(&faqs, &settings, &query, explain, json) {
                if let Some(search::SearchError::EmptyQuery) =
                    e.downcast_ref::<search::SearchError>()
                {
                    eprint!("{}", render::render_error("Please enter a search query"));
                    std::process::exit(1);
                }
                return Err(e);
            }
        }
        Commands::Serve => {
            server::run_server(&cfg, faqs).await?;
        }
        Commands::Corpus => {
            corpus::list_corpus(&faqs)?;
        }
        Commands::Get { id } => {
            corpus::run_get(&faqs, &id)?;
        }
    }

    Ok(())
}

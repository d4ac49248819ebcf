use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorpusConfig {
    /// JSON file holding an array of `{id, title, body}` objects.
    /// The bundled corpus is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

fn default_top_n() -> usize {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct SummaryConfig {
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_keywords: default_max_keywords(),
        }
    }
}

fn default_max_keywords() -> usize {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

impl Config {
    /// Built-in defaults: bundled corpus, top 3 results, 3 summary keywords.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.retrieval.top_n == 0 {
        anyhow::bail!("retrieval.top_n must be >= 1");
    }

    if config.summary.max_keywords == 0 {
        anyhow::bail!("summary.max_keywords must be >= 1");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    // Relative corpus paths resolve against the config file's directory.
    if let Some(corpus_path) = config.corpus.path.take() {
        let resolved = if corpus_path.is_relative() {
            path.parent()
                .map(|dir| dir.join(&corpus_path))
                .unwrap_or(corpus_path)
        } else {
            corpus_path
        };
        config.corpus.path = Some(resolved);
    }

    Ok(config)
}

/// Like [`load_config`], but falls back to [`Config::minimal`] when the file
/// does not exist. A file that exists but fails to parse is still an error.
pub fn load_config_or_default(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::minimal());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("faq.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_minimal_defaults() {
        let cfg = Config::minimal();
        assert_eq!(cfg.retrieval.top_n, 3);
        assert_eq!(cfg.summary.max_keywords, 3);
        assert!(cfg.corpus.path.is_none());
        assert_eq!(cfg.server.bind, "127.0.0.1:7340");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.retrieval.top_n, 3);
        assert_eq!(cfg.summary.max_keywords, 3);
    }

    #[test]
    fn test_overrides() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"
[retrieval]
top_n = 5

[summary]
max_keywords = 2

[server]
bind = "0.0.0.0:9000"
"#,
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.retrieval.top_n, 5);
        assert_eq!(cfg.summary.max_keywords, 2);
        assert_eq!(cfg.server.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[retrieval]\ntop_n = 0\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("top_n"));
    }

    #[test]
    fn test_zero_max_keywords_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[summary]\nmax_keywords = 0\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("max_keywords"));
    }

    #[test]
    fn test_relative_corpus_path_resolved() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[corpus]\npath = \"faqs.json\"\n");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.corpus.path, Some(tmp.path().join("faqs.json")));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config_or_default(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.retrieval.top_n, 3);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[retrieval\ntop_n = ");
        assert!(load_config_or_default(&path).is_err());
    }
}

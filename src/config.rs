//! TOML configuration.
//!
//! ```toml
//! [db]
//! path = "./data/campus.sqlite"
//!
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [search]
//! default_limit = 10
//! # max_limit = 50     (optional; no cap when absent)
//! min_query_chars = 2
//! description_max_chars = 120
//! source_timeout_ms = 3000
//!
//! [search.weights]
//! title_exact = 100
//! title_prefix = 50
//! title_contains = 25
//! field_contains = 10
//! page_title = 50
//! page_description = 10
//! ```
//!
//! Only `[db]` is required.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use campus_search_core::query::DEFAULT_MIN_QUERY_CHARS;
use campus_search_core::scoring::ScoreWeights;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
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
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Optional cap on caller-supplied limits. `None` honours any limit.
    #[serde(default)]
    pub max_limit: Option<usize>,
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    #[serde(default = "default_description_max_chars")]
    pub description_max_chars: usize,
    #[serde(default = "default_source_timeout_ms")]
    pub source_timeout_ms: u64,
    #[serde(default)]
    pub weights: ScoreWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: None,
            min_query_chars: default_min_query_chars(),
            description_max_chars: default_description_max_chars(),
            source_timeout_ms: default_source_timeout_ms(),
            weights: ScoreWeights::default(),
        }
    }
}

fn default_limit() -> usize {
    10
}
fn default_min_query_chars() -> usize {
    DEFAULT_MIN_QUERY_CHARS
}
fn default_description_max_chars() -> usize {
    120
}
fn default_source_timeout_ms() -> u64 {
    3000
}

impl SearchConfig {
    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }

    /// Parse a caller-supplied limit. Missing or non-numeric values fall
    /// back to `default_limit`. Values above `max_limit` are clamped only
    /// when a cap is configured.
    pub fn resolve_limit(&self, raw: Option<&str>) -> usize {
        self.clamp_limit(raw.and_then(|s| s.trim().parse::<usize>().ok()))
    }

    pub fn clamp_limit(&self, limit: Option<usize>) -> usize {
        let limit = limit.unwrap_or(self.default_limit);
        match self.max_limit {
            Some(max) => limit.min(max),
            None => limit,
        }
    }
}

impl Config {
    /// Defaults for everything, with the database under `./data`.
    pub fn minimal() -> Self {
        Self {
            db: DbConfig {
                path: PathBuf::from("./data/campus.sqlite"),
            },
            server: ServerConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let search = &config.search;
    if search.default_limit < 1 {
        anyhow::bail!("search.default_limit must be >= 1");
    }
    if let Some(max) = search.max_limit {
        if max < search.default_limit {
            anyhow::bail!("search.max_limit must be >= search.default_limit");
        }
    }
    if search.min_query_chars < 1 {
        anyhow::bail!("search.min_query_chars must be >= 1");
    }
    if search.description_max_chars < 1 {
        anyhow::bail!("search.description_max_chars must be >= 1");
    }
    if search.source_timeout_ms < 1 {
        anyhow::bail!("search.source_timeout_ms must be >= 1");
    }
    Ok(())
}

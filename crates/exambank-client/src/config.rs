//! exambank configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use exambank_core::model::{DEFAULT_LEVELS, DEFAULT_SUBJECTS};
use exambank_core::roster::DEFAULT_PASS_THRESHOLD;

/// Connection settings for the platform API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:3030/api/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Top-level exambank configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExambankConfig {
    #[serde(default)]
    pub api: ApiConfig,
    /// Subjects a batch may be tagged with.
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,
    /// Class levels a batch may be tagged with.
    #[serde(default = "default_levels")]
    pub levels: Vec<String>,
    /// Score at or above which a student passes.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,
    /// Where parsed batches are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_base_url() -> String {
    "http://localhost:3030/api/v1".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_subjects() -> Vec<String> {
    DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect()
}
fn default_levels() -> Vec<String> {
    DEFAULT_LEVELS.iter().map(|s| s.to_string()).collect()
}
fn default_pass_threshold() -> f64 {
    DEFAULT_PASS_THRESHOLD
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./exambank-batches")
}

impl Default for ExambankConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            subjects: default_subjects(),
            levels: default_levels(),
            pass_threshold: default_pass_threshold(),
            output_dir: default_output_dir(),
        }
    }
}

impl ExambankConfig {
    /// Check a subject against the configured list, case-insensitively.
    /// Returns the configured spelling.
    pub fn resolve_subject(&self, subject: &str) -> Result<String> {
        resolve(&self.subjects, subject, "subject")
    }

    /// Check a level against the configured list, case-insensitively.
    pub fn resolve_level(&self, level: &str) -> Result<String> {
        resolve(&self.levels, level, "level")
    }
}

fn resolve(known: &[String], value: &str, what: &str) -> Result<String> {
    let value = value.trim();
    known
        .iter()
        .find(|k| k.eq_ignore_ascii_case(value))
        .cloned()
        .with_context(|| format!("unknown {what} '{value}'. Available: {}", known.join(", ")))
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `exambank.toml` in the current directory
/// 2. `~/.config/exambank/config.toml`
///
/// `EXAMBANK_API_URL` overrides the API base URL.
pub fn load_config() -> Result<ExambankConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ExambankConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("exambank.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExambankConfig::default(),
    };

    if let Ok(url) = std::env::var("EXAMBANK_API_URL") {
        config.api.base_url = url;
    }

    Ok(config)
}

/// Parse a TOML config string and expand `${VAR}` references.
pub fn parse_config(content: &str) -> Result<ExambankConfig> {
    let mut config: ExambankConfig = toml::from_str(content)?;
    config.api.base_url = resolve_env_vars(&config.api.base_url);
    anyhow::ensure!(config.api.timeout_secs > 0, "api.timeout_secs must be at least 1");
    anyhow::ensure!(
        (0.0..=100.0).contains(&config.pass_threshold),
        "pass_threshold must be between 0 and 100"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("exambank"))
}

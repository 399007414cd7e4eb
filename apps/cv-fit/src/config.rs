use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::errors::AppError;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Process-wide configuration, loaded once from a JSON file and never mutated.
///
/// Only `api_key` is required; everything else falls back to a default.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Bounded retries around the completion client. `0` disables the retry decorator.
    pub max_retries: u32,
    /// Fail CV analysis when a document has no text layer instead of warning.
    pub reject_empty_documents: bool,
}

/// On-disk shape. Every field is optional so a missing key surfaces as
/// `MissingCredential` rather than a generic parse failure.
#[derive(Debug, Deserialize)]
struct RawConfig {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    #[serde(default)]
    max_retries: u32,
    #[serde(default)]
    reject_empty_documents: bool,
}

impl Config {
    /// Reads and validates the JSON configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let load_error = |reason: String| AppError::ConfigLoad {
            path: path.display().to_string(),
            reason,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        Self::from_json(&contents).map_err(|e| match e {
            AppError::ConfigLoad { reason, .. } => load_error(reason),
            other => other,
        })
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self, AppError> {
        let raw: RawConfig = serde_json::from_str(contents).map_err(|e| AppError::ConfigLoad {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })?;

        let api_key = raw
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(AppError::MissingCredential)?;

        Ok(Config {
            api_key,
            model: raw.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: raw
                .base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            max_retries: raw.max_retries,
            reject_empty_documents: raw.reject_empty_documents,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("reject_empty_documents", &self.reject_empty_documents)
            .finish()
    }
}

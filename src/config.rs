//! Backend configuration and its environment loader.
//!
//! The search core never reads the environment itself; it consumes an
//! [`AppConfig`] someone else validated. [`AppConfig::from_env`] is the
//! stock loader for processes that configure through environment variables.

use std::env;

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

/// Default Brave Search API endpoint.
pub const DEFAULT_BRAVE_BASE_URL: &str = "https://api.search.brave.com";

/// Brave Search backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BraveConfig {
    /// API subscription token. The backend is disabled when absent.
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: f64,
}

impl Default for BraveConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BRAVE_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BraveConfig {
    /// Returns true when a non-blank API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

/// SearXNG backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearxngConfig {
    /// Instance base URL, e.g. `https://searx.example.org`. The backend is
    /// disabled when absent.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout: f64,
    /// Categories sent when a query carries no override.
    pub default_categories: Vec<String>,
    /// Language sent when a query carries no override.
    pub default_language: Option<String>,
    /// Time range sent when a query carries no override.
    pub default_time_range: Option<String>,
}

impl Default for SearxngConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            default_categories: vec!["general".to_string()],
            default_language: None,
            default_time_range: None,
        }
    }
}

impl SearxngConfig {
    /// Returns true when a non-blank base URL is present.
    pub fn is_configured(&self) -> bool {
        self.base_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Brave Search backend settings.
    pub brave: BraveConfig,
    /// SearXNG backend settings.
    pub searxng: SearxngConfig,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Recognized variables: `BRAVE_API_KEY`, `BRAVE_BASE_URL`,
    /// `SEARXNG_BASE_URL`, `SEARXNG_TIMEOUT`, `SEARXNG_DEFAULT_CATEGORIES`
    /// (comma-separated), `SEARXNG_DEFAULT_LANGUAGE`,
    /// `SEARXNG_DEFAULT_TIME_RANGE`.
    ///
    /// Values are trimmed. A variable that is set but blank is a
    /// configuration error rather than "unset", so a typo like
    /// `BRAVE_API_KEY=""` cannot silently disable a backend. At least one
    /// backend must end up configured.
    pub fn from_env() -> Result<Self> {
        Self::load(|key| env::var(key).ok())
    }

    fn load(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = non_blank(&get, "BRAVE_API_KEY")?;
        let brave_base_url = non_blank(&get, "BRAVE_BASE_URL")?;
        let searxng_base_url = non_blank(&get, "SEARXNG_BASE_URL")?;

        let timeout = match get("SEARXNG_TIMEOUT") {
            Some(raw) => parse_timeout(raw.trim())?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let default_categories = match get("SEARXNG_DEFAULT_CATEGORIES") {
            Some(raw) => parse_categories(&raw),
            None => vec!["general".to_string()],
        };

        let config = AppConfig {
            brave: BraveConfig {
                api_key,
                base_url: brave_base_url.unwrap_or_else(|| DEFAULT_BRAVE_BASE_URL.to_string()),
                timeout: DEFAULT_TIMEOUT_SECS,
            },
            searxng: SearxngConfig {
                base_url: searxng_base_url,
                timeout,
                default_categories,
                default_language: non_blank(&get, "SEARXNG_DEFAULT_LANGUAGE")?,
                default_time_range: non_blank(&get, "SEARXNG_DEFAULT_TIME_RANGE")?,
            },
        };

        if !config.brave.is_configured() && !config.searxng.is_configured() {
            return Err(SearchError::NoBackend);
        }

        Ok(config)
    }
}

/// Reads and trims a variable; set-but-blank is an error.
fn non_blank(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<String>> {
    match get(key) {
        None => Ok(None),
        Some(value) => {
            let value = value.trim();
            if value.is_empty() {
                Err(SearchError::Config(format!(
                    "{key} cannot be an empty string"
                )))
            } else {
                Ok(Some(value.to_string()))
            }
        }
    }
}

fn parse_timeout(raw: &str) -> Result<f64> {
    let secs: f64 = raw.parse().map_err(|_| {
        SearchError::Config(format!(
            "SEARXNG_TIMEOUT must be a number of seconds, got '{raw}'"
        ))
    })?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(SearchError::Config(format!(
            "SEARXNG_TIMEOUT must be positive, got '{raw}'"
        )));
    }
    Ok(secs)
}

/// Splits a comma-separated category list, dropping blanks; an empty list
/// falls back to `general`.
fn parse_categories(raw: &str) -> Vec<String> {
    let categories: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(String::from)
        .collect();
    if categories.is_empty() {
        vec!["general".to_string()]
    } else {
        categories
    }
}

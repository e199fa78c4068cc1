//! Search backend implementations.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::SearchError;

mod brave;
mod searxng;

pub use brave::{BraveClient, BraveQuery, SafeSearch, BRAVE_MAX_COUNT};
pub use searxng::{SearxngClient, SearxngQuery};

/// User-Agent sent with every backend request.
///
/// SearXNG instances commonly reject clients without a browser-like
/// User-Agent with HTTP 403.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; websearch/0.1)";

/// Maximum length of a response body embedded in an error message.
pub(crate) const MAX_ERROR_BODY_LEN: usize = 512;

/// Identity of a concrete search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Brave Search commercial API.
    Brave,
    /// Self-hosted SearXNG meta-search instance.
    Searxng,
}

impl Backend {
    /// Returns the stable lowercase name of this backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Brave => "brave",
            Backend::Searxng => "searxng",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = SearchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brave" => Ok(Backend::Brave),
            "searxng" | "searx" => Ok(Backend::Searxng),
            other => Err(SearchError::Config(format!(
                "Unknown backend '{other}' (expected 'brave' or 'searxng')"
            ))),
        }
    }
}

/// Truncates a response body for inclusion in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    let mut out: String = body.chars().take(MAX_ERROR_BODY_LEN).collect();
    if out.len() < body.len() {
        out.push_str("...");
    }
    out
}

/// Converts a timeout in seconds into a `Duration`, rejecting values that
/// `Duration::from_secs_f64` would panic on.
pub(crate) fn timeout_duration(secs: f64) -> crate::Result<Duration> {
    if secs.is_finite() && secs > 0.0 {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err(SearchError::Config(format!(
            "Timeout must be a positive number of seconds, got {secs}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_as_str() {
        assert_eq!(Backend::Brave.as_str(), "brave");
        assert_eq!(Backend::Searxng.as_str(), "searxng");
    }

    #[test]
    fn test_backend_display() {
        assert_eq!(Backend::Brave.to_string(), "brave");
        assert_eq!(Backend::Searxng.to_string(), "searxng");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("brave".parse::<Backend>().unwrap(), Backend::Brave);
        assert_eq!("searxng".parse::<Backend>().unwrap(), Backend::Searxng);
        assert_eq!("searx".parse::<Backend>().unwrap(), Backend::Searxng);
    }

    #[test]
    fn test_backend_from_str_case_insensitive() {
        assert_eq!("Brave".parse::<Backend>().unwrap(), Backend::Brave);
        assert_eq!(" SEARXNG ".parse::<Backend>().unwrap(), Backend::Searxng);
    }

    #[test]
    fn test_backend_from_str_unknown() {
        let err = "google".parse::<Backend>().unwrap_err();
        assert!(err.to_string().contains("Unknown backend 'google'"));
    }

    #[test]
    fn test_backend_serialization() {
        assert_eq!(serde_json::to_string(&Backend::Brave).unwrap(), "\"brave\"");
        assert_eq!(
            serde_json::to_string(&Backend::Searxng).unwrap(),
            "\"searxng\""
        );
    }

    #[test]
    fn test_truncate_body_short_passthrough() {
        assert_eq!(truncate_body("short body"), "short body");
    }

    #[test]
    fn test_truncate_body_long() {
        let body = "x".repeat(MAX_ERROR_BODY_LEN + 100);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.len(), MAX_ERROR_BODY_LEN + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_body_multibyte() {
        let body = "搜".repeat(MAX_ERROR_BODY_LEN + 1);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.chars().count(), MAX_ERROR_BODY_LEN + 3);
    }

    #[test]
    fn test_timeout_duration_valid() {
        assert_eq!(timeout_duration(10.0).unwrap(), Duration::from_secs(10));
        assert_eq!(
            timeout_duration(0.5).unwrap(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_timeout_duration_rejects_nonpositive() {
        assert!(timeout_duration(0.0).is_err());
        assert!(timeout_duration(-1.0).is_err());
        assert!(timeout_duration(f64::NAN).is_err());
        assert!(timeout_duration(f64::INFINITY).is_err());
    }
}

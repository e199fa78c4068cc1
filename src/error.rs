//! Error types for the search library.

use reqwest::StatusCode;
use thiserror::Error;

use crate::backends::Backend;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Hard failures only: a decoded response that merely contains no usable
/// results is not an error but a [`crate::SearchResults`] with its `error`
/// note set.
#[derive(Error, Debug)]
pub enum SearchError {
    /// No backend is usable at all.
    #[error("No search backend configured: set BRAVE_API_KEY or SEARXNG_BASE_URL")]
    NoBackend,

    /// A configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Caller misuse rejected before any request is sent.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Backend answered with a non-2xx status.
    ///
    /// The body is truncated and, for backends that hold a credential,
    /// scrubbed of it before it is stored here.
    #[error("{backend} returned HTTP {status}: {body}")]
    Http {
        /// Backend that produced the response.
        backend: Backend,
        /// HTTP status code of the response.
        status: StatusCode,
        /// Truncated response body.
        body: String,
    },

    /// Network-level failure: connection refused, DNS, timeout.
    #[error("Request to {backend} failed: {source}")]
    Transport {
        /// Backend the request was addressed to.
        backend: Backend,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// Response body is not JSON, or its shape is too malformed to probe.
    #[error("Failed to decode {backend} response: {reason}")]
    Decode {
        /// Backend that produced the body.
        backend: Backend,
        /// What made the body undecodable.
        reason: String,
    },

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl SearchError {
    /// HTTP status carried by this error, when one exists.
    ///
    /// Lets callers separate client-side (4xx) from server-side (5xx)
    /// failures when deciding whether a retry at their layer makes sense.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SearchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_no_backend() {
        let err = SearchError::NoBackend;
        assert_eq!(
            err.to_string(),
            "No search backend configured: set BRAVE_API_KEY or SEARXNG_BASE_URL"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = SearchError::Config("SEARXNG_TIMEOUT must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: SEARXNG_TIMEOUT must be positive"
        );
    }

    #[test]
    fn test_error_display_invalid_query() {
        let err = SearchError::InvalidQuery("empty query".to_string());
        assert_eq!(err.to_string(), "Invalid query: empty query");
    }

    #[test]
    fn test_error_display_http() {
        let err = SearchError::Http {
            backend: Backend::Searxng,
            status: StatusCode::FORBIDDEN,
            body: "JSON output disabled".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "searxng returned HTTP 403 Forbidden: JSON output disabled"
        );
    }

    #[test]
    fn test_error_display_decode() {
        let err = SearchError::Decode {
            backend: Backend::Brave,
            reason: "response is not a JSON object".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to decode brave response: response is not a JSON object"
        );
    }

    #[test]
    fn test_error_from_url_parse() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: SearchError = parse_err.into();
        assert!(err.to_string().starts_with("URL parsing error"));
    }

    #[test]
    fn test_status_helper() {
        let err = SearchError::Http {
            backend: Backend::Searxng,
            status: StatusCode::TOO_MANY_REQUESTS,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
        assert!(err.status().is_some_and(|s| s.is_client_error()));
        assert!(SearchError::NoBackend.status().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}

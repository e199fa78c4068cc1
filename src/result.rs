//! Normalized search result types shared by all backends.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::backends::Backend;
use crate::Result;

/// A single normalized search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title. Falls back to the URL when the backend omits one.
    pub title: String,
    /// Result URL. Always syntactically valid.
    pub url: String,
    /// Result description/snippet. Empty when the backend has none.
    pub snippet: String,
    /// Host or domain the result came from, when known.
    pub source: Option<String>,
    /// 1-based position in the backend's result list.
    pub rank: Option<u32>,
    /// Verbatim backend payload for this hit, kept for forward compatibility.
    pub raw: Option<Value>,
}

impl SearchResult {
    /// Creates a new search result.
    ///
    /// The URL must parse; a blank title is replaced with the URL.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Result<Self> {
        let url = url.into();
        Url::parse(&url)?;

        let title = title.into();
        let title = if title.trim().is_empty() {
            url.clone()
        } else {
            title
        };

        Ok(Self {
            title,
            url,
            snippet: snippet.into(),
            source: None,
            rank: None,
            raw: None,
        })
    }

    /// Sets the source host/domain.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the 1-based rank.
    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Attaches the verbatim backend payload.
    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }
}

/// The outcome of one search call against one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// The caller's query, echoed verbatim (never the backend's own echo).
    pub query: String,
    /// Which backend produced this outcome.
    pub backend: Backend,
    /// Normalized hits in backend order.
    pub results: Vec<SearchResult>,
    /// Best-effort total: backend-reported when positive, else the hit count.
    pub total: Option<u64>,
    /// Follow-up summarizer handle (Brave only).
    pub summarizer_key: Option<String>,
    /// Diagnostic note when a shape anomaly produced zero results.
    pub error: Option<String>,
    /// Verbatim top-level backend response.
    pub raw: Option<Value>,
}

impl SearchResults {
    /// Creates an empty outcome for the given query and backend.
    pub fn new(query: impl Into<String>, backend: Backend) -> Self {
        Self {
            query: query.into(),
            backend,
            results: Vec::new(),
            total: None,
            summarizer_key: None,
            error: None,
            raw: None,
        }
    }

    /// Returns the number of hits.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true when the call produced no hits.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_result_new() {
        let result = SearchResult::new("https://example.com/", "Title", "Snippet").unwrap();
        assert_eq!(result.url, "https://example.com/");
        assert_eq!(result.title, "Title");
        assert_eq!(result.snippet, "Snippet");
        assert!(result.source.is_none());
        assert!(result.rank.is_none());
        assert!(result.raw.is_none());
    }

    #[test]
    fn test_search_result_rejects_invalid_url() {
        assert!(SearchResult::new("not a url", "Title", "").is_err());
        assert!(SearchResult::new("", "Title", "").is_err());
    }

    #[test]
    fn test_search_result_rejects_relative_url() {
        assert!(SearchResult::new("/relative/path", "Title", "").is_err());
    }

    #[test]
    fn test_title_falls_back_to_url() {
        let result = SearchResult::new("https://example.com/", "", "snippet").unwrap();
        assert_eq!(result.title, "https://example.com/");

        let result = SearchResult::new("https://example.com/", "   ", "snippet").unwrap();
        assert_eq!(result.title, "https://example.com/");
    }

    #[test]
    fn test_search_result_with_source() {
        let result = SearchResult::new("https://example.com/", "t", "s")
            .unwrap()
            .with_source("example.com");
        assert_eq!(result.source, Some("example.com".to_string()));
    }

    #[test]
    fn test_search_result_with_rank() {
        let result = SearchResult::new("https://example.com/", "t", "s")
            .unwrap()
            .with_rank(3);
        assert_eq!(result.rank, Some(3));
    }

    #[test]
    fn test_search_result_with_raw() {
        let payload = json!({"title": "t", "url": "https://example.com/"});
        let result = SearchResult::new("https://example.com/", "t", "s")
            .unwrap()
            .with_raw(payload.clone());
        assert_eq!(result.raw, Some(payload));
    }

    #[test]
    fn test_search_results_new() {
        let results = SearchResults::new("rust", Backend::Brave);
        assert_eq!(results.query, "rust");
        assert_eq!(results.backend, Backend::Brave);
        assert!(results.is_empty());
        assert_eq!(results.len(), 0);
        assert!(results.total.is_none());
        assert!(results.summarizer_key.is_none());
        assert!(results.error.is_none());
        assert!(results.raw.is_none());
    }

    #[test]
    fn test_search_results_len() {
        let mut results = SearchResults::new("rust", Backend::Searxng);
        results
            .results
            .push(SearchResult::new("https://example.com/", "t", "s").unwrap());
        assert_eq!(results.len(), 1);
        assert!(!results.is_empty());
    }

    #[test]
    fn test_search_result_serialization() {
        let result = SearchResult::new("https://example.com/", "Title", "Snippet")
            .unwrap()
            .with_rank(1);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"url\":\"https://example.com/\""));
        assert!(json.contains("\"title\":\"Title\""));
        assert!(json.contains("\"rank\":1"));
    }

    #[test]
    fn test_search_results_serialization() {
        let results = SearchResults::new("rust", Backend::Searxng);
        let json = serde_json::to_string(&results).unwrap();
        assert!(json.contains("\"backend\":\"searxng\""));
        assert!(json.contains("\"query\":\"rust\""));
    }

    #[test]
    fn test_search_results_round_trip() {
        let mut results = SearchResults::new("rust", Backend::Brave);
        results.results.push(
            SearchResult::new("https://example.com/", "Title", "Snippet")
                .unwrap()
                .with_rank(1)
                .with_raw(json!({"title": "Title"})),
        );
        results.total = Some(1);

        let json = serde_json::to_string(&results).unwrap();
        let parsed: SearchResults = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, results);
    }
}

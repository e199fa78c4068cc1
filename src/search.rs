//! Unified search facade.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backends::{Backend, BraveClient, BraveQuery, SearxngClient, SearxngQuery};
use crate::config::AppConfig;
use crate::result::SearchResults;
use crate::selector::select_backend;
use crate::{Result, SearchError};

/// Options applied to a single search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum number of results to return.
    pub max_results: usize,
    /// Backend to prefer; the configuration decides when absent.
    pub backend: Option<Backend>,
}

impl SearchOptions {
    /// Creates options with default limits.
    pub fn new() -> Self {
        Self {
            max_results: 5,
            backend: None,
        }
    }

    /// Sets the maximum number of results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Sets the preferred backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point dispatching queries to the configured backends.
#[derive(Debug, Clone)]
pub struct Search {
    config: AppConfig,
    brave: Option<BraveClient>,
    searxng: Option<SearxngClient>,
}

impl Search {
    /// Creates the facade, building a client per configured backend.
    ///
    /// Construction succeeds even with no backend configured; the error
    /// surfaces when a search is attempted.
    pub fn new(config: AppConfig) -> Result<Self> {
        let brave = if config.brave.is_configured() {
            Some(BraveClient::new(&config.brave)?)
        } else {
            None
        };
        let searxng = if config.searxng.is_configured() {
            Some(SearxngClient::new(&config.searxng)?)
        } else {
            None
        };

        Ok(Self {
            config,
            brave,
            searxng,
        })
    }

    /// Backends this facade can dispatch to, in precedence order.
    pub fn available_backends(&self) -> Vec<Backend> {
        let mut backends = Vec::new();
        if self.brave.is_some() {
            backends.push(Backend::Brave);
        }
        if self.searxng.is_some() {
            backends.push(Backend::Searxng);
        }
        backends
    }

    /// Runs a search through the selected backend.
    ///
    /// Backend errors propagate unchanged; no retries, no fallback to the
    /// other backend.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResults> {
        let backend = select_backend(&self.config, options.backend)?;
        debug!("Dispatching query {:?} to {}", query, backend);

        match backend {
            Backend::Brave => {
                let client = self.brave.as_ref().ok_or(SearchError::NoBackend)?;
                let count = u32::try_from(options.max_results).unwrap_or(u32::MAX);
                client
                    .search(&BraveQuery::new(query).with_count(count))
                    .await
            }
            Backend::Searxng => {
                let client = self.searxng.as_ref().ok_or(SearchError::NoBackend)?;
                client
                    .search(&SearxngQuery::new(query).with_max_results(options.max_results))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BraveConfig, SearxngConfig};

    fn config(brave: bool, searxng: bool) -> AppConfig {
        AppConfig {
            brave: BraveConfig {
                api_key: brave.then(|| "brave-key-123".to_string()),
                ..Default::default()
            },
            searxng: SearxngConfig {
                base_url: searxng.then(|| "https://searx.example.org".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_options_defaults() {
        let options = SearchOptions::new();
        assert_eq!(options.max_results, 5);
        assert!(options.backend.is_none());
    }

    #[test]
    fn test_options_builder() {
        let options = SearchOptions::new()
            .with_max_results(10)
            .with_backend(Backend::Searxng);
        assert_eq!(options.max_results, 10);
        assert_eq!(options.backend, Some(Backend::Searxng));
    }

    #[test]
    fn test_clients_follow_configuration() {
        let search = Search::new(config(true, false)).unwrap();
        assert_eq!(search.available_backends(), vec![Backend::Brave]);

        let search = Search::new(config(false, true)).unwrap();
        assert_eq!(search.available_backends(), vec![Backend::Searxng]);

        let search = Search::new(config(true, true)).unwrap();
        assert_eq!(
            search.available_backends(),
            vec![Backend::Brave, Backend::Searxng]
        );
    }

    #[test]
    fn test_constructs_without_backends() {
        let search = Search::new(config(false, false)).unwrap();
        assert!(search.available_backends().is_empty());
    }

    #[tokio::test]
    async fn test_search_without_backends_is_error() {
        let search = Search::new(config(false, false)).unwrap();
        let err = search
            .search("rust", &SearchOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::NoBackend));
    }
}

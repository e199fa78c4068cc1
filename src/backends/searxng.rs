//! SearXNG metasearch backend.
//!
//! Talks to a self-hosted instance through its JSON API (`format=json` must
//! be enabled in the instance settings).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{timeout_duration, truncate_body, Backend, USER_AGENT};
use crate::config::SearxngConfig;
use crate::result::{SearchResult, SearchResults};
use crate::{Result, SearchError};

/// Parameters for a SearXNG search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearxngQuery {
    /// Search terms.
    pub query: String,
    /// Maximum results to keep; `0` keeps everything the instance returns.
    pub max_results: usize,
    /// One-based page number; values below 1 are clamped to 1.
    pub page: u32,
    /// Category override; the client defaults apply when absent or empty.
    pub categories: Option<Vec<String>>,
    /// Language override.
    pub language: Option<String>,
    /// Time range override, e.g. `day`, `week`, `month`, `year`.
    pub time_range: Option<String>,
}

impl SearxngQuery {
    /// Creates a query with default paging.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: 5,
            page: 1,
            categories: None,
            language: None,
            time_range: None,
        }
    }

    /// Sets the maximum number of results to keep.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the category list, overriding the client defaults.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Sets the language, overriding the client default.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the time range, overriding the client default.
    pub fn with_time_range(mut self, time_range: impl Into<String>) -> Self {
        self.time_range = Some(time_range.into());
        self
    }
}

/// Client for a self-hosted SearXNG instance.
#[derive(Debug, Clone)]
pub struct SearxngClient {
    base_url: String,
    default_categories: Vec<String>,
    default_language: Option<String>,
    default_time_range: Option<String>,
    client: Client,
}

impl SearxngClient {
    /// Creates a client from configuration.
    pub fn new(config: &SearxngConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout_duration(config.timeout)?)
            .build()
            .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))?;
        Self::with_client(config, client)
    }

    /// Creates a client reusing an existing HTTP client.
    pub fn with_client(config: &SearxngConfig, client: Client) -> Result<Self> {
        let base_url = config.base_url.as_deref().unwrap_or_default().trim();
        if base_url.is_empty() {
            return Err(SearchError::Config(
                "SearXNG base URL cannot be an empty string".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_categories: config.default_categories.clone(),
            default_language: config.default_language.clone(),
            default_time_range: config.default_time_range.clone(),
            client,
        })
    }

    /// Runs a search against the instance.
    ///
    /// A response without a usable results list is not an error: the
    /// returned [`SearchResults`] carries an empty list, a note in `error`,
    /// and the raw body. Transport failures, non-2xx statuses, and non-JSON
    /// bodies are errors.
    pub async fn search(&self, query: &SearxngQuery) -> Result<SearchResults> {
        if query.query.trim().is_empty() {
            return Err(SearchError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }

        let page = query.page.max(1);
        let url = format!("{}/search", self.base_url);
        let mut params: Vec<(&str, String)> = vec![
            ("q", query.query.clone()),
            ("format", "json".to_string()),
            ("pageno", page.to_string()),
        ];

        let categories = query
            .categories
            .as_ref()
            .filter(|categories| !categories.is_empty())
            .unwrap_or(&self.default_categories);
        if !categories.is_empty() {
            params.push(("categories", categories.join(",")));
        }
        if let Some(language) = query.language.as_ref().or(self.default_language.as_ref()) {
            params.push(("language", language.clone()));
        }
        if let Some(time_range) = query
            .time_range
            .as_ref()
            .or(self.default_time_range.as_ref())
        {
            params.push(("time_range", time_range.clone()));
        }

        debug!("Searching SearXNG for {:?} (page {})", query.query, page);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|source| SearchError::Transport {
                backend: Backend::Searxng,
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| SearchError::Transport {
                backend: Backend::Searxng,
                source,
            })?;

        if !status.is_success() {
            warn!("SearXNG returned HTTP {} for {:?}", status, query.query);
            return Err(SearchError::Http {
                backend: Backend::Searxng,
                status,
                body: truncate_body(&body),
            });
        }

        let data: Value = serde_json::from_str(&body).map_err(|e| SearchError::Decode {
            backend: Backend::Searxng,
            reason: e.to_string(),
        })?;
        if !data.is_object() {
            return Err(SearchError::Decode {
                backend: Backend::Searxng,
                reason: "response is not a JSON object".to_string(),
            });
        }

        Ok(self.parse_response(&query.query, data, query.max_results))
    }

    fn parse_response(&self, query: &str, data: Value, max_results: usize) -> SearchResults {
        let mut results = SearchResults::new(query, Backend::Searxng);

        match data.get("results").and_then(Value::as_array) {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Some(result) = self.parse_entry(index, item) {
                        results.results.push(result);
                    }
                }
            }
            None => {
                warn!("SearXNG response has no results list for {:?}", query);
            }
        }

        if max_results > 0 {
            results.results.truncate(max_results);
        }
        if results.results.is_empty() {
            results.error = Some("no results found in response".to_string());
        }

        results.total = Some(
            data.get("number_of_results")
                .and_then(Value::as_u64)
                .filter(|&total| total > 0)
                .unwrap_or(results.results.len() as u64),
        );
        results.raw = Some(data);

        results
    }

    fn parse_entry(&self, index: usize, item: &Value) -> Option<SearchResult> {
        if !item.is_object() {
            debug!("Skipping non-object SearXNG entry at index {}", index);
            return None;
        }

        let url = item.get("url").and_then(Value::as_str).unwrap_or_default();
        let title = item.get("title").and_then(Value::as_str).unwrap_or_default();
        let snippet = item
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let result = match SearchResult::new(url, title, snippet) {
            Ok(result) => result,
            Err(_) => {
                debug!("Skipping SearXNG entry with unusable URL {:?}", url);
                return None;
            }
        };

        let source = item
            .get("source")
            .and_then(Value::as_str)
            .filter(|source| !source.is_empty())
            .map(String::from)
            .or_else(|| parsed_url_hostname(item.get("parsed_url")));

        // An explicit position wins; otherwise the position in the list.
        let rank = item
            .get("position")
            .and_then(Value::as_u64)
            .and_then(|position| u32::try_from(position).ok())
            .unwrap_or(index as u32 + 1);

        let result = result.with_rank(rank).with_raw(item.clone());
        Some(match source {
            Some(source) => result.with_source(source),
            None => result,
        })
    }
}

/// Hostname from a `parsed_url` value.
///
/// Instances serialize it either as an object with a `hostname` field or as
/// a urlsplit-style array whose second element is the netloc.
fn parsed_url_hostname(parsed_url: Option<&Value>) -> Option<String> {
    let parsed_url = parsed_url?;

    if let Some(hostname) = parsed_url.get("hostname").and_then(Value::as_str) {
        if !hostname.is_empty() {
            return Some(hostname.to_string());
        }
    }

    parsed_url
        .get(1)
        .and_then(Value::as_str)
        .and_then(|netloc| netloc.split(':').next())
        .filter(|host| !host.is_empty())
        .map(String::from)
}

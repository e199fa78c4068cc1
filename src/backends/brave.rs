//! Brave Search API backend.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{timeout_duration, truncate_body, Backend, USER_AGENT};
use crate::config::BraveConfig;
use crate::result::{SearchResult, SearchResults};
use crate::{Result, SearchError};

/// Maximum results per request accepted by the API.
pub const BRAVE_MAX_COUNT: u32 = 20;

/// Safe search filtering level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    /// No filtering.
    #[default]
    Off,
    /// Moderate filtering.
    Moderate,
    /// Strict filtering.
    Strict,
}

impl SafeSearch {
    /// Wire value for the `safesearch` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SafeSearch::Off => "off",
            SafeSearch::Moderate => "moderate",
            SafeSearch::Strict => "strict",
        }
    }
}

/// Parameters for a Brave web search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BraveQuery {
    /// Search terms.
    pub query: String,
    /// Number of results to request, at most [`BRAVE_MAX_COUNT`].
    pub count: u32,
    /// Zero-based page offset.
    pub offset: u32,
    /// Two-letter country code, e.g. `US`.
    pub country: Option<String>,
    /// Preferred language code, e.g. `en`.
    pub language: Option<String>,
    /// Safe search level.
    pub safesearch: Option<SafeSearch>,
    /// Request an AI summarizer key alongside the results.
    pub summary: bool,
}

impl BraveQuery {
    /// Creates a query with default paging.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            count: 5,
            offset: 0,
            country: None,
            language: None,
            safesearch: None,
            summary: false,
        }
    }

    /// Sets the number of results to request.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets the page offset.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the country code.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the safe search level.
    pub fn with_safesearch(mut self, safesearch: SafeSearch) -> Self {
        self.safesearch = Some(safesearch);
        self
    }

    /// Requests a summarizer key alongside the results.
    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }
}

/// Client for the Brave Search API.
#[derive(Debug, Clone)]
pub struct BraveClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl BraveClient {
    /// Creates a client from configuration.
    pub fn new(config: &BraveConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout_duration(config.timeout)?)
            .build()
            .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))?;
        Self::with_client(config, client)
    }

    /// Creates a client reusing an existing HTTP client.
    pub fn with_client(config: &BraveConfig, client: Client) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        if api_key.is_empty() {
            return Err(SearchError::Config(
                "Brave API key cannot be an empty string".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Runs a web search.
    ///
    /// A response whose shape cannot be probed for results is not an error:
    /// the returned [`SearchResults`] carries an empty list, a note in
    /// `error`, and the raw body for inspection. Transport failures,
    /// non-2xx statuses, and non-JSON bodies are errors.
    pub async fn search(&self, query: &BraveQuery) -> Result<SearchResults> {
        if query.query.trim().is_empty() {
            return Err(SearchError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }
        if query.count > BRAVE_MAX_COUNT {
            return Err(SearchError::InvalidQuery(format!(
                "count {} exceeds the API maximum of {BRAVE_MAX_COUNT}",
                query.count
            )));
        }

        let url = format!("{}/res/v1/web/search", self.base_url);
        let mut params: Vec<(&str, String)> = vec![
            ("q", query.query.clone()),
            ("count", query.count.to_string()),
            ("offset", query.offset.to_string()),
        ];
        if let Some(country) = &query.country {
            params.push(("country", country.clone()));
        }
        if let Some(language) = &query.language {
            params.push(("language", language.clone()));
        }
        if let Some(safesearch) = query.safesearch {
            params.push(("safesearch", safesearch.as_str().to_string()));
        }
        if query.summary {
            params.push(("summary", "1".to_string()));
        }

        debug!(
            "Searching Brave for {:?} (count {})",
            query.query, query.count
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|source| SearchError::Transport {
                backend: Backend::Brave,
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| SearchError::Transport {
                backend: Backend::Brave,
                source,
            })?;

        if !status.is_success() {
            warn!("Brave returned HTTP {} for {:?}", status, query.query);
            return Err(SearchError::Http {
                backend: Backend::Brave,
                status,
                body: truncate_body(&self.scrub(&body)),
            });
        }

        let data: Value = serde_json::from_str(&body).map_err(|e| SearchError::Decode {
            backend: Backend::Brave,
            reason: e.to_string(),
        })?;
        if !data.is_object() {
            return Err(SearchError::Decode {
                backend: Backend::Brave,
                reason: "response is not a JSON object".to_string(),
            });
        }

        Ok(self.parse_response(&query.query, data))
    }

    /// Removes the API key from text destined for error messages.
    fn scrub(&self, text: &str) -> String {
        text.replace(&self.api_key, "[redacted]")
    }

    fn parse_response(&self, query: &str, data: Value) -> SearchResults {
        let mut results = SearchResults::new(query, Backend::Brave);

        match data
            .get("web")
            .and_then(|web| web.get("results"))
            .and_then(Value::as_array)
        {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Some(result) = self.parse_entry(index, item) {
                        results.results.push(result);
                    }
                }
            }
            None => {
                warn!("Brave response has no web results for {:?}", query);
                results.error = Some("no results found in response".to_string());
            }
        }

        results.total = Some(
            data.get("web")
                .and_then(|web| web.get("total"))
                .and_then(Value::as_u64)
                .filter(|&total| total > 0)
                .unwrap_or(results.results.len() as u64),
        );
        results.summarizer_key = data
            .get("summarizer")
            .and_then(|summarizer| summarizer.get("key"))
            .and_then(Value::as_str)
            .filter(|key| !key.is_empty())
            .map(String::from);
        results.raw = Some(data);

        results
    }

    fn parse_entry(&self, index: usize, item: &Value) -> Option<SearchResult> {
        if !item.is_object() {
            debug!("Skipping non-object Brave entry at index {}", index);
            return None;
        }

        let url = item.get("url").and_then(Value::as_str).unwrap_or_default();
        let title = item.get("title").and_then(Value::as_str).unwrap_or_default();
        let snippet = item
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let result = match SearchResult::new(url, title, snippet) {
            Ok(result) => result,
            Err(_) => {
                debug!("Skipping Brave entry with unusable URL {:?}", url);
                return None;
            }
        };

        let source = item
            .get("domain")
            .and_then(Value::as_str)
            .filter(|domain| !domain.is_empty())
            .map(String::from)
            .or_else(|| host_of(&result.url));

        // An explicit rank wins; otherwise the position in the list.
        let rank = item
            .get("rank")
            .and_then(Value::as_u64)
            .and_then(|rank| u32::try_from(rank).ok())
            .unwrap_or(index as u32 + 1);

        let result = result.with_rank(rank).with_raw(item.clone());
        Some(match source {
            Some(source) => result.with_source(source),
            None => result,
        })
    }
}

/// Host portion of a URL, when it has one.
fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(String::from))
}

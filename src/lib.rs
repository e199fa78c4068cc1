//! # websearch
//!
//! A unified client for web search over two backends: the Brave Search API
//! and a self-hosted SearXNG instance. Both return the same normalized
//! result model, so callers never depend on backend response shapes.
//!
//! - Defensive parsing: malformed entries are skipped, a response without
//!   results is an answer (with a note), not an error
//! - Deterministic backend selection with an optional per-call override
//! - Raw backend payloads preserved alongside the normalized results
//!
//! ## Example
//!
//! ```rust,no_run
//! use websearch::{AppConfig, Search, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let search = Search::new(config)?;
//!
//!     let results = search
//!         .search("rust programming", &SearchOptions::new().with_max_results(5))
//!         .await?;
//!
//!     for result in &results.results {
//!         println!("{}: {}", result.title, result.url);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod result;
mod search;
mod selector;

pub mod backends;

pub use backends::{
    Backend, BraveClient, BraveQuery, SafeSearch, SearxngClient, SearxngQuery, BRAVE_MAX_COUNT,
};
pub use config::{AppConfig, BraveConfig, SearxngConfig};
pub use error::{Result, SearchError};
pub use result::{SearchResult, SearchResults};
pub use search::{Search, SearchOptions};
pub use selector::select_backend;

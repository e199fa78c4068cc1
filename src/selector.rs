//! Deterministic backend selection.

use crate::backends::Backend;
use crate::config::AppConfig;
use crate::{Result, SearchError};

/// Picks the backend to serve a query.
///
/// An explicit preference wins when that backend is configured; a preference
/// for an unconfigured backend is ignored rather than failing. Without a
/// usable preference the choice follows configuration: the only configured
/// backend, or Brave when both are available. The same configuration and
/// preference always yield the same choice.
pub fn select_backend(config: &AppConfig, preference: Option<Backend>) -> Result<Backend> {
    match preference {
        Some(Backend::Brave) if config.brave.is_configured() => return Ok(Backend::Brave),
        Some(Backend::Searxng) if config.searxng.is_configured() => {
            return Ok(Backend::Searxng)
        }
        _ => {}
    }

    match (config.brave.is_configured(), config.searxng.is_configured()) {
        (true, false) => Ok(Backend::Brave),
        (false, true) => Ok(Backend::Searxng),
        // Brave takes precedence when both are configured.
        (true, true) => Ok(Backend::Brave),
        (false, false) => Err(SearchError::NoBackend),
    }
}

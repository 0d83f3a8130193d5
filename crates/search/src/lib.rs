//! Web search clients for the Upskiller.
//!
//! All clients implement `upskiller_core::WebSearch`.

pub mod duckduckgo;

use std::sync::Arc;
use upskiller_core::WebSearch;

pub use duckduckgo::DuckDuckGoSearch;

/// Build the configured web search client, or `None` when search is disabled.
///
/// A `None` here is not an error: the context assembler reports it in the
/// context the same way it reports a failed search.
pub fn build_from_config(config: &upskiller_config::SearchConfig) -> Option<Arc<dyn WebSearch>> {
    if !config.enabled {
        tracing::debug!("Web search disabled by configuration");
        return None;
    }
    Some(Arc::new(DuckDuckGoSearch::from_config(config)))
}

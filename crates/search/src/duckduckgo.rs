//! DuckDuckGo web search over the HTML results page.
//!
//! Uses `https://html.duckduckgo.com/html/?q=...`, which needs no API key
//! and returns ordinary web results (news included). Each organic result
//! is mapped to a [`SearchResult`]; ads are skipped.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;
use upskiller_core::search::{SearchFailure, SearchResult, WebSearch};

const USER_AGENT: &str = concat!("upskiller/", env!("CARGO_PKG_VERSION"));

/// Web search backed by DuckDuckGo's HTML endpoint.
pub struct DuckDuckGoSearch {
    endpoint: String,
    client: reqwest::Client,
}

impl DuckDuckGoSearch {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn from_config(config: &upskiller_config::SearchConfig) -> Self {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchFailure> {
        debug!(query = %query, max_results, "Web search request");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| SearchFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchFailure::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchFailure::Transport(e.to_string()))?;

        let results = parse_results(&body, max_results)?;
        debug!(count = results.len(), "Web search results");
        Ok(results)
    }
}

fn selector(css: &str) -> Result<Selector, SearchFailure> {
    Selector::parse(css).map_err(|e| SearchFailure::Decode(format!("bad selector {css}: {e:?}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a results page to at most `max_results` results.
///
/// A page without results (no hits, or a markup change) is an empty list.
fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchFailure> {
    let document = Html::parse_document(html);
    let result_sel = selector("div.result")?;
    let title_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let mut results = Vec::new();
    for result in document.select(&result_sel) {
        if results.len() >= max_results {
            break;
        }
        if result.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let Some(anchor) = result.select(&title_sel).next() else {
            continue;
        };
        let title = element_text(anchor);
        if title.is_empty() {
            continue;
        }

        let snippet = result.select(&snippet_sel).next().map(element_text).unwrap_or_default();
        let link = anchor.value().attr("href").map(resolve_link).unwrap_or_default();

        results.push(SearchResult {
            title,
            snippet,
            link,
        });
    }
    Ok(results)
}

/// Result links go through a `/l/?uddg=<target>` redirect; return the target.
fn resolve_link(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{href}")
    } else {
        href.to_string()
    };

    match reqwest::Url::parse(&absolute) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned())
            .unwrap_or(absolute),
        Err(_) => absolute,
    }
}

//! HTTP client for the MediaWiki query API.
//!
//! Two logical operations: search by query string, and fetch page content
//! by title. Both carry a per-request timeout supplied by config; callers
//! decide whether a failure is fatal (it never is for a single candidate).

use tokio::time::Duration;
use tracing::debug;

use super::types::{PagesResponse, SearchResponse, WikiPage};
use crate::config::{HttpConfig, WikiConfig};
use crate::error::Result;
use crate::TARGET_WEB_REQUEST;

pub struct WikiClient {
    client: reqwest::Client,
    url: String,
}

impl WikiClient {
    pub fn new(config: &WikiConfig, http: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Suggested page titles for a query, in the engine's relevance order.
    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        debug!(target: TARGET_WEB_REQUEST, "searching wiki for '{}'", query);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", query),
            ])
            .send()
            .await?;

        Ok(response.json().await?)
    }

    /// Extract, categories, canonical URL and thumbnail for one title.
    /// Returns None when the response carries no page object.
    pub async fn page_content(&self, title: &str) -> Result<Option<WikiPage>> {
        debug!(target: TARGET_WEB_REQUEST, "gathering page content for '{}'", title);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("titles", title),
                ("prop", "extracts|pageimages|info|categories"),
                ("exsentences", "10"),
                ("explaintext", "1"),
                ("pithumbsize", "100"),
                ("inprop", "url"),
                ("cllimit", "max"),
            ])
            .send()
            .await?;

        let payload: PagesResponse = response.json().await?;
        let page = payload
            .query
            .and_then(|q| q.pages.into_values().next());
        Ok(page)
    }
}

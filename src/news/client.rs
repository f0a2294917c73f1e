//! HTTP client for the daily top-headlines endpoint.

use tokio::time::Duration;
use tracing::{debug, error};

use super::types::NewsApiResponse;
use crate::config::{self, HttpConfig, NewsConfig};
use crate::error::{Error, Result};
use crate::TARGET_WEB_REQUEST;

pub struct NewsClient {
    client: reqwest::Client,
    url: String,
    country: String,
    page_size: u32,
    api_key: String,
}

impl NewsClient {
    /// Fails before any network call when the API key is absent.
    pub fn new(config: &NewsConfig, http: &HttpConfig) -> Result<Self> {
        let api_key = config::news_api_key()?;

        let client = reqwest::Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            country: config.country.clone(),
            page_size: config.page_size,
            api_key,
        })
    }

    /// Fetch the day's headlines. An API-reported error status escalates as
    /// `Error::NewsApi`; the batch must not continue on a silently empty
    /// result.
    pub async fn top_headlines(&self) -> Result<NewsApiResponse> {
        debug!(target: TARGET_WEB_REQUEST, "requesting top headlines from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("country", self.country.as_str()),
                ("pageSize", &self.page_size.to_string()),
                ("apiKey", &self.api_key),
            ])
            .send()
            .await?;

        let payload: NewsApiResponse = response.json().await?;
        check_status(payload)
    }
}

pub(crate) fn check_status(payload: NewsApiResponse) -> Result<NewsApiResponse> {
    if payload.status == "error" {
        let message = payload
            .message
            .unwrap_or_else(|| "unspecified error".to_string());
        error!(target: TARGET_WEB_REQUEST, "news API error: {}", message);
        return Err(Error::NewsApi(message));
    }
    Ok(payload)
}

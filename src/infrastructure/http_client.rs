//! HTTP client for fetching listing pages
//!
//! Sends browser-like headers so the store serves the same markup a
//! visitor would see. Non-200 statuses are returned to the caller, which
//! decides what they mean for pagination.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::errors::{ScrapeError, ScrapeResult};
use crate::domain::services::{FetchedPage, PageFetcher};
use crate::infrastructure::config::ScraperConfig;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const MAX_REDIRECTS: usize = 10;

/// HTTP client configuration for page fetching
#[derive(Debug, Clone, serde::Serialize)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
}

impl From<&ScraperConfig> for HttpClientConfig {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
            timeout_seconds: config.request_timeout_seconds,
            follow_redirects: config.follow_redirects,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from(&ScraperConfig::default())
    }
}

pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language).context("Invalid accept-language")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .cookie_store(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(MAX_REDIRECTS)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn from_scraper_config(config: &ScraperConfig) -> Result<Self> {
        Self::new(HttpClientConfig::from(config))
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn get(&self, url: &str) -> ScrapeResult<FetchedPage> {
        info!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::transport(url, e))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            warn!("HTTP {} for {}", status, url);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::transport(url, format!("failed to read body: {e}")))?;

        debug!("Fetched {} ({} chars, status {})", url, body.len(), status);
        Ok(FetchedPage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new(HttpClientConfig::default()).unwrap();
        assert_eq!(client.config().timeout_seconds, 30);
        assert!(client.config().follow_redirects);
        assert!(client.config().user_agent.contains("Mozilla"));
    }

    #[test]
    fn test_rejects_invalid_header_value() {
        let config = HttpClientConfig {
            user_agent: "bad\nagent".to_string(),
            ..HttpClientConfig::default()
        };
        assert!(HttpClient::new(config).is_err());
    }
}

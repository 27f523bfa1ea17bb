//! HTTP client for catalog pages using wreq for browser emulation.

use crate::config::Config;
use crate::error::{CrawlError, UnexpectedStatus};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use wreq::Client;
use wreq_util::Emulation;

/// A fetched listing page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against it.
    pub url: Url,
    pub html: String,
}

/// Source of listing pages - enables injecting fixtures in tests.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the page at `url`, failing on transport errors and non-success statuses.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, CrawlError>;
}

/// Catalog HTTP client with browser impersonation.
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for CatalogClient {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, CrawlError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-GB,en;q=0.9")
            .send()
            .await
            .map_err(|e| CrawlError::fetch(url.as_str(), e))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let cause = UnexpectedStatus { status: status.as_u16() };
            return Err(CrawlError::fetch(url.as_str(), cause));
        }

        let final_url = match Url::parse(&response.uri().to_string()) {
            Ok(final_url) => final_url,
            Err(_) => url.clone(),
        };
        if final_url.host_str() != url.host_str() {
            warn!("Redirected from {} to {}", url, final_url);
        }

        let html = response.text().await.map_err(|e| CrawlError::fetch(url.as_str(), e))?;

        Ok(FetchedPage { url: final_url, html })
    }
}

pub mod crawl;
pub mod discover;
pub mod document;
pub mod extract;
pub mod pages;

use async_trait::async_trait;
use qrent_core::{CrawlConfig, QrentError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub use crawl::{CrawlOrchestrator, CrawlOutcome, CrawlState};
pub use discover::ListingDiscoverer;
pub use document::{Document, Node};
pub use extract::FieldExtractor;
pub use pages::{PageCount, PageCounter};

/// Search-results query for long-term residential rentals in Qatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub origin: Url,
    pub page: u32,
}

impl SearchQuery {
    pub fn new(origin: Url) -> Self {
        Self { origin, page: 1 }
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn url(&self) -> Result<Url> {
        let mut url = self.origin.join("/en/search")?;
        url.query_pairs_mut()
            .append_pair("c", "2")
            .append_pair("l", "9")
            .append_pair("ob", "ba")
            .append_pair("page", &self.page.to_string())
            .append_pair("rp", "m");
        Ok(url)
    }
}

/// Single-attempt page fetch. A failure is reported, never retried.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| QrentError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QrentError::fetch(url, format!("status {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| QrentError::fetch(url, e))
    }
}

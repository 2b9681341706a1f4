use crate::{QrentError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_ORIGIN: &str = "https://www.propertyfinder.qa";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Settings for one crawl run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Site origin prepended to relative listing links and used for search URLs.
    pub origin: String,
    /// Write a checkpoint after every page number divisible by this. 0 disables checkpoints.
    pub checkpoint_interval: u32,
    /// Detail pages fetched at once within one results page. 1 keeps the crawl sequential.
    pub detail_concurrency: usize,
    pub request_timeout_secs: u64,
    /// Pause before each detail fetch.
    pub politeness_delay_ms: u64,
    /// Upper bound on results pages crawled, on top of the page count from the site.
    pub max_pages: Option<u32>,
    pub user_agent: String,
    pub output_dir: PathBuf,
    pub final_file_name: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            checkpoint_interval: 5,
            detail_concurrency: 1,
            request_timeout_secs: 30,
            politeness_delay_ms: 0,
            max_pages: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_dir: PathBuf::from("."),
            final_file_name: "final.csv".to_string(),
        }
    }
}

impl CrawlConfig {
    pub fn validate(&self) -> Result<()> {
        if self.detail_concurrency == 0 {
            return Err(QrentError::Config(
                "detail concurrency must be at least 1".to_string(),
            ));
        }
        if self.max_pages == Some(0) {
            return Err(QrentError::Config("max pages must be at least 1".to_string()));
        }
        if self.final_file_name.trim().is_empty() {
            return Err(QrentError::Config("final file name is empty".to_string()));
        }
        self.origin_url()?;
        Ok(())
    }

    pub fn origin_url(&self) -> Result<Url> {
        let url = Url::parse(&self.origin)
            .map_err(|e| QrentError::Config(format!("invalid origin {}: {}", self.origin, e)))?;
        if url.cannot_be_a_base() {
            return Err(QrentError::Config(format!("origin {} cannot be a base URL", self.origin)));
        }
        Ok(url)
    }

    /// Whether a checkpoint is due once `page` has been crawled.
    pub fn is_checkpoint_page(&self, page: u32) -> bool {
        self.checkpoint_interval != 0 && page % self.checkpoint_interval == 0
    }
}

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Counters and outputs of one crawl run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub total_results: u64,
    pub total_pages: u32,
    pub pages_crawled: u32,
    pub listings_discovered: usize,
    pub listings_accepted: usize,
    pub listings_excluded: usize,
    pub listings_failed: usize,
    pub checkpoints: Vec<PathBuf>,
    pub final_path: Option<PathBuf>,
}

impl CrawlReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            total_results: 0,
            total_pages: 0,
            pages_crawled: 0,
            listings_discovered: 0,
            listings_accepted: 0,
            listings_excluded: 0,
            listings_failed: 0,
            checkpoints: Vec::new(),
            final_path: None,
        }
    }

    pub fn finish(&mut self, finished_at: DateTime<Utc>) {
        self.finished_at = Some(finished_at);
    }

    pub fn elapsed_secs(&self) -> Option<i64> {
        self.finished_at.map(|end| (end - self.started_at).num_seconds())
    }

    pub fn format(&self) -> String {
        let mut result = String::new();

        result.push_str(&format!(
            "{} {} of {} pages ({} results)\n",
            "Crawled".bold(),
            self.pages_crawled,
            self.total_pages,
            self.total_results
        ));
        result.push_str(&format!(
            "{} listings: {} accepted, {} excluded, {} failed\n",
            self.listings_discovered,
            self.listings_accepted.to_string().green(),
            self.listings_excluded.to_string().yellow(),
            self.listings_failed.to_string().red()
        ));

        for checkpoint in &self.checkpoints {
            result.push_str(&format!("Checkpoint: {}\n", checkpoint.display()));
        }
        if let Some(path) = &self.final_path {
            result.push_str(&format!("{} {}\n", "Output:".bold(), path.display()));
        }
        if let Some(secs) = self.elapsed_secs() {
            result.push_str(&format!("Took {}s\n", secs));
        }

        result
    }
}

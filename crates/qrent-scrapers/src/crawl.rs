//! Page-by-page crawl of the search results.
//!
//! `Init → CountingPages → CrawlingPage(1) → … → CrawlingPage(n) → Done`, or
//! `Aborted` when the first page gives no usable result count.

use crate::document::Document;
use crate::{Fetcher, FieldExtractor, ListingDiscoverer, PageCounter, SearchQuery};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use qrent_core::{
    CrawlConfig, CrawlReport, Dataset, DatasetSink, ListingRecord, ListingSummary, QrentError,
    Result,
};
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Init,
    CountingPages,
    CrawlingPage(u32),
    Done,
    Aborted,
}

#[derive(Debug)]
pub struct CrawlOutcome {
    pub dataset: Dataset,
    pub report: CrawlReport,
}

enum ListingOutcome {
    Accepted(ListingRecord),
    Excluded,
    Failed,
}

pub struct CrawlOrchestrator<F, S> {
    fetcher: F,
    sink: S,
    config: CrawlConfig,
    origin: Url,
    discoverer: ListingDiscoverer,
    extractor: FieldExtractor,
    counter: PageCounter,
}

impl<F: Fetcher, S: DatasetSink> CrawlOrchestrator<F, S> {
    pub fn new(fetcher: F, sink: S, config: CrawlConfig) -> Result<Self> {
        config.validate()?;
        let origin = config.origin_url()?;
        Ok(Self {
            fetcher,
            sink,
            discoverer: ListingDiscoverer::new(&origin),
            extractor: FieldExtractor::new(),
            counter: PageCounter::new(),
            origin,
            config,
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Crawl every results page and hand the dataset to the sink.
    ///
    /// Fails when the result count is unusable or a results page cannot be fetched.
    /// Listings that fail to fetch or extract are skipped.
    pub async fn run(&self) -> Result<CrawlOutcome> {
        let mut report = CrawlReport::new(Utc::now());
        let mut dataset = Dataset::new();
        let mut state = CrawlState::Init;
        let mut query = SearchQuery::new(self.origin.clone());
        let mut first_page: Option<String> = None;
        let mut abort_reason: Option<QrentError> = None;

        loop {
            state = match state {
                CrawlState::Init => {
                    first_page = Some(self.fetch_results_page(&query).await?);
                    CrawlState::CountingPages
                }
                CrawlState::CountingPages => {
                    let body = first_page.as_deref().unwrap_or_default();
                    match self.count_pages(body) {
                        Ok((total_results, total_pages)) => {
                            report.total_results = total_results;
                            report.total_pages = total_pages;
                            info!("Total number of pages to be scraped: {}", total_pages);
                            CrawlState::CrawlingPage(1)
                        }
                        Err(e) => {
                            abort_reason = Some(e);
                            CrawlState::Aborted
                        }
                    }
                }
                CrawlState::CrawlingPage(page) => {
                    let body = match first_page.take() {
                        Some(body) if page == 1 => body,
                        _ => self.fetch_results_page(&query).await?,
                    };

                    info!("Page: {}", page);
                    self.crawl_page(&body, &mut dataset, &mut report).await?;
                    report.pages_crawled += 1;

                    if self.config.is_checkpoint_page(page) {
                        let path = self.sink.write_checkpoint(page, &dataset)?;
                        report.checkpoints.push(path);
                    }
                    info!("Listings collected until {}: {}", page, dataset.len());

                    query.next_page();
                    if self.should_crawl(query.page, report.total_pages) {
                        CrawlState::CrawlingPage(query.page)
                    } else {
                        CrawlState::Done
                    }
                }
                CrawlState::Done => {
                    let path = self.sink.write_final(&dataset)?;
                    report.final_path = Some(path);
                    report.listings_accepted = dataset.len();
                    report.finish(Utc::now());
                    info!("Scraped {} pages", report.pages_crawled);
                    return Ok(CrawlOutcome { dataset, report });
                }
                CrawlState::Aborted => {
                    let reason = abort_reason.take().unwrap_or_else(|| {
                        QrentError::MalformedCount("crawl aborted".to_string())
                    });
                    error!("Crawl aborted: {}", reason);
                    return Err(reason);
                }
            };
        }
    }

    fn should_crawl(&self, page: u32, total_pages: u32) -> bool {
        page < total_pages && self.config.max_pages.map_or(true, |max| page <= max)
    }

    async fn fetch_results_page(&self, query: &SearchQuery) -> Result<String> {
        let url = query.url()?;
        self.fetcher.fetch(&url).await.map_err(|e| {
            error!("Results page {} could not be fetched: {}", query.page, e);
            e
        })
    }

    fn count_pages(&self, body: &str) -> Result<(u64, u32)> {
        let document = Document::parse(body);
        let cards = self.discoverer.card_count(&document)?;
        let count = self.counter.count_pages(&document, cards)?;
        Ok((count.total_results, count.total_pages))
    }

    async fn crawl_page(&self, body: &str, dataset: &mut Dataset, report: &mut CrawlReport) -> Result<()> {
        let summaries = self.discoverer.discover(&Document::parse(body))?;
        report.listings_discovered += summaries.len();

        let outcomes: Vec<ListingOutcome> = stream::iter(summaries)
            .map(|summary| self.process_listing(summary))
            .buffered(self.config.detail_concurrency)
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                ListingOutcome::Accepted(record) => dataset.push(record),
                ListingOutcome::Excluded => report.listings_excluded += 1,
                ListingOutcome::Failed => report.listings_failed += 1,
            }
        }
        Ok(())
    }

    async fn process_listing(&self, summary: ListingSummary) -> ListingOutcome {
        if self.config.politeness_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.politeness_delay_ms)).await;
        }

        info!("Link: {}", summary.detail_url);
        let body = match self.fetcher.fetch(&summary.detail_url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Skipping {}: {}", summary.detail_url, e);
                return ListingOutcome::Failed;
            }
        };

        match self.extractor.extract_html(&body, &summary.raw_location) {
            Ok(record) if record.is_excluded() => {
                info!("Type of building not interested: {}", record.property_type);
                ListingOutcome::Excluded
            }
            Ok(record) => {
                info!(" - Data: {}", record);
                ListingOutcome::Accepted(record)
            }
            Err(e) => {
                warn!("Skipping {}: {}", summary.detail_url, e);
                ListingOutcome::Failed
            }
        }
    }
}

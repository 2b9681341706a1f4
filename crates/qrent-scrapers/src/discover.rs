use crate::document::{Document, Node};
use qrent_core::{ListingSummary, Result};
use tracing::debug;
use url::Url;

const CARD_CLASS: &str = "card-list__item";
const LINK_SELECTOR: &str = "a.card--clickable[href]";
const LOCATION_CLASS: &str = "card__location";

/// Finds the listing cards of one search-results page.
#[derive(Debug, Clone)]
pub struct ListingDiscoverer {
    origin: String,
}

impl ListingDiscoverer {
    pub fn new(origin: &Url) -> Self {
        Self {
            origin: origin.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Number of result cards on the page, linked or not.
    pub fn card_count(&self, document: &Document) -> Result<usize> {
        Ok(document.find_all_by_class(CARD_CLASS)?.len())
    }

    /// Summaries for every card with a resolvable detail link, in page order.
    pub fn discover(&self, document: &Document) -> Result<Vec<ListingSummary>> {
        let mut summaries = Vec::new();

        for (index, card) in document.find_all_by_class(CARD_CLASS)?.iter().enumerate() {
            let Some(detail_url) = self.detail_url(card)? else {
                debug!("Card {} has no resolvable listing link, skipping", index);
                continue;
            };

            let raw_location = card
                .find_first_by_class(LOCATION_CLASS)?
                .map(|node| node.inner_text())
                .unwrap_or_default();

            summaries.push(ListingSummary {
                detail_url,
                raw_location,
            });
        }

        Ok(summaries)
    }

    fn detail_url(&self, card: &Node<'_>) -> Result<Option<Url>> {
        let href = card
            .find_first(LINK_SELECTOR)?
            .and_then(|link| link.attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty());

        Ok(href.and_then(|href| {
            let url = if href.starts_with("http") {
                href.to_string()
            } else {
                format!("{}{}", self.origin, href)
            };
            Url::parse(&url).ok()
        }))
    }
}

use crate::document::Document;
use qrent_core::{QrentError, Result};

const COUNT_CLASS: &str = "property-header__list-count";
const COUNT_LABELS: [&str; 2] = ["results", "result"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCount {
    pub total_results: u64,
    pub total_pages: u32,
}

/// Works out how many results pages a search has from its first page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageCounter;

impl PageCounter {
    pub fn new() -> Self {
        Self
    }

    pub fn count_pages(&self, document: &Document, cards_on_first_page: usize) -> Result<PageCount> {
        let text = document
            .find_first_by_class(COUNT_CLASS)?
            .map(|node| node.inner_text())
            .ok_or_else(|| QrentError::MalformedCount("results count element not found".to_string()))?;

        let total_results = parse_result_count(&text)?;
        let total_pages = pages_for(total_results, cards_on_first_page)?;
        Ok(PageCount {
            total_results,
            total_pages,
        })
    }
}

/// `"482 results"` → 482.
pub fn parse_result_count(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let number = COUNT_LABELS
        .iter()
        .find_map(|label| trimmed.strip_suffix(label))
        .unwrap_or(trimmed);
    let cleaned: String = number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    cleaned
        .parse::<u64>()
        .map_err(|_| QrentError::MalformedCount(format!("{:?} is not a result count", trimmed)))
}

/// Pages needed when each page shows as many cards as the first one.
pub fn pages_for(total_results: u64, cards_per_page: usize) -> Result<u32> {
    if cards_per_page == 0 {
        return Err(QrentError::MalformedCount(
            "first results page has no listing cards".to_string(),
        ));
    }
    let pages = total_results.div_ceil(cards_per_page as u64);
    u32::try_from(pages)
        .map_err(|_| QrentError::MalformedCount(format!("{} pages is out of range", pages)))
}

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

mod config;
mod display;
mod error;
mod export;
mod report;

pub use config::{CrawlConfig, DEFAULT_ORIGIN, DEFAULT_USER_AGENT};
pub use display::{create_record_table, RecordTableRow};
pub use error::{ExtractionError, ExtractionFailure, ExtractionStage, QrentError, Result};
pub use export::{CsvSink, DatasetSink, CSV_HEADER};
pub use report::CrawlReport;

/// Property types that are never kept in the dataset, compared with case and
/// whitespace removed.
const EXCLUDED_TYPES: [&str; 2] = ["wholebuilding", "bulkrent"];

/// One search-results card, consumed right away by the detail fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub detail_url: Url,
    pub raw_location: String,
}

/// The size fact. Sites encode it as `"X sqft / Y sqm"`; anything else passes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AreaValue {
    Sqm(i64),
    Raw(String),
}

impl Default for AreaValue {
    fn default() -> Self {
        AreaValue::Raw(String::new())
    }
}

impl fmt::Display for AreaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaValue::Sqm(sqm) => write!(f, "{}", sqm),
            AreaValue::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub price: i64,
    pub property_type: String,
    pub area_sqm: AreaValue,
    pub bedrooms: String,
    pub bathrooms: String,
    pub furnishing: String,
    pub amenities: String,
    pub location: String,
}

impl ListingRecord {
    /// Whole-building and bulk-rent offers are not individual units.
    pub fn is_excluded(&self) -> bool {
        is_excluded_type(&self.property_type)
    }

    /// The record as one CSV row, in header order.
    pub fn to_row(&self) -> [String; 8] {
        [
            self.price.to_string(),
            self.property_type.clone(),
            self.area_sqm.to_string(),
            self.bedrooms.clone(),
            self.bathrooms.clone(),
            self.furnishing.clone(),
            self.amenities.clone(),
            self.location.clone(),
        ]
    }
}

impl fmt::Display for ListingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_row().join(", "))
    }
}

pub fn is_excluded_type(property_type: &str) -> bool {
    let normalized: String = property_type
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    EXCLUDED_TYPES.iter().any(|t| normalized.contains(t))
}

/// Accepted records of one crawl run, in the order they were accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<ListingRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ListingRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListingRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ListingRecord;
    type IntoIter = std::slice::Iter<'a, ListingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) fn sample_record(property_type: &str) -> ListingRecord {
    ListingRecord {
        price: 8500,
        property_type: property_type.to_string(),
        area_sqm: AreaValue::Sqm(111),
        bedrooms: "2".to_string(),
        bathrooms: "3".to_string(),
        furnishing: "Furnished".to_string(),
        amenities: "Balcony,Shared Pool".to_string(),
        location: "The Pearl".to_string(),
    }
}

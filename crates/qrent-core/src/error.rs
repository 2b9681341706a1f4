use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrentError {
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("Malformed results count: {0}")]
    MalformedCount(String),
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Invalid selector: {0}")]
    Selector(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl QrentError {
    pub fn fetch(url: impl fmt::Display, message: impl fmt::Display) -> Self {
        QrentError::Fetch {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QrentError>;

/// The part of a detail page that was being read when extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStage {
    Price,
    Facts,
    Amenities,
    Location,
}

impl fmt::Display for ExtractionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStage::Price => write!(f, "price"),
            ExtractionStage::Facts => write!(f, "facts"),
            ExtractionStage::Amenities => write!(f, "amenities"),
            ExtractionStage::Location => write!(f, "location"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("malformed price {0:?}")]
    MalformedPrice(String),
    #[error("malformed area {0:?}")]
    MalformedArea(String),
    #[error("malformed amenity {0:?}")]
    MalformedAmenity(String),
    #[error("malformed location {0:?}")]
    MalformedLocation(String),
}

/// A field-level failure for a single listing. Never fatal for the crawl.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} stage: {reason}")]
pub struct ExtractionError {
    pub stage: ExtractionStage,
    pub reason: ExtractionFailure,
}

impl ExtractionError {
    pub fn new(stage: ExtractionStage, reason: ExtractionFailure) -> Self {
        Self { stage, reason }
    }

    pub fn price(text: impl Into<String>) -> Self {
        Self::new(ExtractionStage::Price, ExtractionFailure::MalformedPrice(text.into()))
    }

    pub fn area(text: impl Into<String>) -> Self {
        Self::new(ExtractionStage::Facts, ExtractionFailure::MalformedArea(text.into()))
    }

    pub fn amenity(text: impl Into<String>) -> Self {
        Self::new(ExtractionStage::Amenities, ExtractionFailure::MalformedAmenity(text.into()))
    }

    pub fn location(text: impl Into<String>) -> Self {
        Self::new(ExtractionStage::Location, ExtractionFailure::MalformedLocation(text.into()))
    }
}

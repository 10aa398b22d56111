// ABOUTME: Error types for scraping operations
// ABOUTME: Defines ScrapeError enum covering all failure modes

use thiserror::Error;

/// Errors that can occur while scraping a jurisdiction
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// I/O error reading or writing files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field the page is expected to carry was not found
    #[error("Missing field '{field}' on {page}")]
    MissingField { field: String, page: String },

    /// A CSS selector failed to compile
    #[error("Selector error: {0}")]
    Selector(String),

    /// Page content could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// A page could not be retrieved
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Jurisdiction abbreviation is not known
    #[error("Unknown jurisdiction: {0}")]
    UnknownJurisdiction(String),

    /// Scrape configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    pub(crate) fn missing(field: impl Into<String>, page: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            page: page.into(),
        }
    }
}

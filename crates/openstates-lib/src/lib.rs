// ABOUTME: Core library for the openstates scrapers
// ABOUTME: Civic data model, Alaska action normalizer and vote parser, page extractors and sinks

pub mod ak;
pub mod config;
pub mod error;
pub mod fetch;
mod html;
pub mod jurisdiction;
pub mod model;
pub mod mt;
pub mod scrape;
pub mod sink;

pub use ak::{ActionNormalizer, CommitteeContext, NormalizedAction, VoteContext};
pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use fetch::{Fetch, MemoryFetcher, SnapshotFetcher};
pub use jurisdiction::{Jurisdiction, ScraperKind};
pub use model::{ActionType, Bill, Chamber, Person, Record, VoteEvent};
pub use sink::{JsonlSink, RecordSink};

/// Result type alias using [`ScrapeError`]
pub type Result<T> = std::result::Result<T, ScrapeError>;

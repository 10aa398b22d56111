// ABOUTME: Runs the scrapers a config selects against a fetcher
// ABOUTME: Emits organizations first, then bills with votes or people per chamber

use crate::ak::BillScraper;
use crate::config::ScrapeConfig;
use crate::fetch::Fetch;
use crate::jurisdiction::ScraperKind;
use crate::model::Record;
use crate::mt::PeopleScraper;
use crate::sink::RecordSink;
use crate::{Result, ScrapeError};

/// Run every selected scraper, returning the number of records emitted
pub fn run(config: &ScrapeConfig, fetcher: &dyn Fetch, sink: &mut dyn RecordSink) -> Result<usize> {
    let jurisdiction = config.jurisdiction()?;
    tracing::info!(jurisdiction = jurisdiction.abbr, scrapers = ?config.scrapers, "starting scrape");

    let mut emitted = 0;
    for org in jurisdiction.organizations() {
        sink.emit(Record::Organization(org))?;
        emitted += 1;
    }

    for &kind in &config.scrapers {
        emitted += match kind {
            ScraperKind::Bills => {
                let session = config.session.as_deref().ok_or_else(|| {
                    ScrapeError::Config("a session is required to scrape bills".to_string())
                })?;
                BillScraper::new(fetcher).scrape(session, &config.chambers, sink)?
            }
            ScraperKind::People => PeopleScraper::new(fetcher).scrape(&config.chambers, sink)?,
        };
    }

    tracing::info!(emitted, "scrape finished");
    Ok(emitted)
}

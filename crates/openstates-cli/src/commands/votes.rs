// ABOUTME: 'openstates votes' command implementation
// ABOUTME: Parses a saved roll-call page or report text and prints vote events

use super::print_json;
use chrono::NaiveDate;
use openstates_lib::ak::{parse_votes, votes_from_document};
use openstates_lib::{Chamber, Result, VoteContext};
use std::fs;
use std::path::PathBuf;

/// Configuration for votes command
pub struct VotesConfig {
    pub file: PathBuf,
    pub url: String,
    pub bill: String,
    pub chamber: Chamber,
    pub date: NaiveDate,
}

/// Print every vote event found in the file
pub fn run(config: &VotesConfig) -> Result<()> {
    let content = fs::read_to_string(&config.file)?;
    let context = VoteContext {
        bill: config.bill.clone(),
        chamber: config.chamber,
        date: config.date,
        source_url: config.url.clone(),
    };

    let votes = if content.contains("<pre") {
        votes_from_document(&content, &context)
    } else {
        parse_votes(&content, &context).collect()
    };
    tracing::debug!(count = votes.len(), file = %config.file.display(), "parsed votes");

    for vote in &votes {
        print_json(vote)?;
    }
    Ok(())
}

// ABOUTME: 'openstates bill' command implementation
// ABOUTME: Extracts a saved Alaska bill page and prints the bill as JSON

use super::print_json;
use openstates_lib::ak::parse_bill_page;
use openstates_lib::{ActionNormalizer, Chamber, Record, Result};
use std::fs;
use std::path::PathBuf;

/// Configuration for bill command
pub struct BillConfig {
    pub file: PathBuf,
    pub url: String,
    pub session: String,
    pub chamber: Chamber,
}

/// Print the bill record of a saved page
pub fn run(config: &BillConfig) -> Result<()> {
    let html = fs::read_to_string(&config.file)?;
    let page = parse_bill_page(
        &html,
        &config.url,
        config.chamber,
        &config.session,
        &ActionNormalizer::default(),
    )?;
    for roll_call in &page.roll_calls {
        tracing::info!(url = %roll_call.url, date = %roll_call.date, "roll call");
    }
    print_json(&Record::Bill(page.bill))
}

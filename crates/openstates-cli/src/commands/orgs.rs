// ABOUTME: 'openstates orgs' command implementation
// ABOUTME: Prints a jurisdiction's legislature and chamber organizations

use super::print_json;
use openstates_lib::{jurisdiction, Record, Result};

/// Configuration for orgs command
pub struct OrgsConfig {
    pub jurisdiction: String,
}

pub fn run(config: &OrgsConfig) -> Result<()> {
    let jurisdiction = jurisdiction::by_abbr(&config.jurisdiction)?;
    for org in jurisdiction.organizations() {
        print_json(&Record::Organization(org))?;
    }
    Ok(())
}

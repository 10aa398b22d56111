// ABOUTME: 'openstates people' command implementation
// ABOUTME: Extracts Montana legislators from a saved roster page

use super::print_json;
use openstates_lib::mt::{parse_legislators, PEOPLE_URL};
use openstates_lib::{Chamber, Record, Result};
use std::fs;
use std::path::PathBuf;

/// Configuration for people command
pub struct PeopleConfig {
    pub file: PathBuf,
    pub chamber: Option<Chamber>,
}

/// Print each legislator as a JSON line
pub fn run(config: &PeopleConfig) -> Result<()> {
    let html = fs::read_to_string(&config.file)?;
    let chambers = match config.chamber {
        Some(chamber) => vec![chamber],
        None => Chamber::both().to_vec(),
    };
    for chamber in chambers {
        for person in parse_legislators(&html, chamber, PEOPLE_URL)? {
            print_json(&Record::Person(person))?;
        }
    }
    Ok(())
}

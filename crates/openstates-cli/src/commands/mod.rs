// ABOUTME: Command implementations for the openstates CLI
// ABOUTME: Submodules for action, votes, bill, people, orgs and scrape commands

pub mod action;
pub mod bill;
pub mod orgs;
pub mod people;
pub mod scrape;
pub mod votes;

use openstates_lib::Result;
use serde::Serialize;

/// Print one value as a JSON line on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

// ABOUTME: 'openstates action' command implementation
// ABOUTME: Normalizes a bill's action list and prints each result as JSON

use super::print_json;
use openstates_lib::{ActionNormalizer, Result};
use std::io::BufRead;

/// Configuration for action command
pub struct ActionConfig {
    pub actions: Vec<String>,
}

/// Normalize the given actions, or stdin lines when none were given
pub fn run(config: &ActionConfig) -> Result<()> {
    let actions = if config.actions.is_empty() {
        std::io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<String>>>()?
    } else {
        config.actions.clone()
    };

    let normalizer = ActionNormalizer::default();
    for action in normalizer.normalize_all(actions.iter().map(String::as_str)) {
        print_json(&action)?;
    }
    Ok(())
}

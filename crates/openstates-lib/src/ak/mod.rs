// ABOUTME: Alaska Legislature scrapers
// ABOUTME: Action normalization, roll-call parsing and bill page extraction

pub mod actions;
pub mod bills;
pub mod tables;
pub mod votes;

pub use actions::{ActionNormalizer, CommitteeContext, NormalizedAction};
pub use bills::{bill_list_url, classify_bill, parse_bill_page, BillPage, BillScraper, RollCallRef};
pub use votes::{parse_votes, votes_from_document, Tally, VoteContext};

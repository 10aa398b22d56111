// ABOUTME: Montana Legislature scrapers
// ABOUTME: Currently the legislator roster

pub mod people;

pub use people::{parse_legislators, PeopleScraper, PEOPLE_URL};

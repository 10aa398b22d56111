// ABOUTME: Jurisdictions known to the scrapers and their legislatures
// ABOUTME: Builds the legislature and chamber organizations with their posts

use crate::model::{Chamber, Organization, Post};
use crate::{Result, ScrapeError};
use std::fmt;
use uuid::Uuid;

/// How a chamber's seats are labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seats {
    /// One seat per letter, e.g. Alaska Senate districts A..T
    Lettered(&'static str),
    /// Seats 1..=n
    Numbered(u32),
}

impl Seats {
    fn labels(&self) -> Vec<String> {
        match self {
            Self::Lettered(letters) => letters.chars().map(|c| c.to_string()).collect(),
            Self::Numbered(n) => (1..=*n).map(|i| i.to_string()).collect(),
        }
    }
}

/// One chamber of a legislature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChamberSpec {
    pub name: &'static str,
    /// Member title, used as the role of each post
    pub title: &'static str,
    pub seats: Seats,
}

/// Scrapers a jurisdiction provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScraperKind {
    Bills,
    People,
}

impl fmt::Display for ScraperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bills => "bills",
            Self::People => "people",
        })
    }
}

/// A state and its legislature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jurisdiction {
    pub abbr: &'static str,
    pub name: &'static str,
    pub division_id: &'static str,
    pub url: &'static str,
    pub legislature_name: &'static str,
    pub upper: ChamberSpec,
    pub lower: ChamberSpec,
    pub scrapers: &'static [ScraperKind],
}

pub const ALASKA: Jurisdiction = Jurisdiction {
    abbr: "ak",
    name: "Alaska",
    division_id: "ocd-division/country:us/state:ak",
    url: "http://w3.legis.state.ak.us/",
    legislature_name: "Alaska State Legislature",
    upper: ChamberSpec {
        name: "Senate",
        title: "Senator",
        seats: Seats::Lettered("ABCDEFGHIJKLMNOPQRST"),
    },
    lower: ChamberSpec {
        name: "House",
        title: "Representative",
        seats: Seats::Numbered(40),
    },
    scrapers: &[ScraperKind::Bills],
};

pub const MONTANA: Jurisdiction = Jurisdiction {
    abbr: "mt",
    name: "Montana",
    division_id: "ocd-division/country:us/state:mt",
    url: "http://leg.mt.gov/",
    legislature_name: "Montana Legislature",
    upper: ChamberSpec {
        name: "Senate",
        title: "Senator",
        seats: Seats::Numbered(50),
    },
    lower: ChamberSpec {
        name: "House",
        title: "Representative",
        seats: Seats::Numbered(100),
    },
    scrapers: &[ScraperKind::People],
};

/// All supported jurisdictions
pub fn all() -> &'static [Jurisdiction] {
    &[ALASKA, MONTANA]
}

/// Look a jurisdiction up by its two-letter abbreviation
pub fn by_abbr(abbr: &str) -> Result<&'static Jurisdiction> {
    all()
        .iter()
        .find(|j| j.abbr.eq_ignore_ascii_case(abbr))
        .ok_or_else(|| ScrapeError::UnknownJurisdiction(abbr.to_string()))
}

impl Jurisdiction {
    pub fn chamber(&self, chamber: Chamber) -> &ChamberSpec {
        match chamber {
            Chamber::Upper => &self.upper,
            Chamber::Lower => &self.lower,
        }
    }

    pub fn provides(&self, scraper: ScraperKind) -> bool {
        self.scrapers.contains(&scraper)
    }

    /// The legislature followed by its upper and lower chambers
    pub fn organizations(&self) -> Vec<Organization> {
        let legislature = Organization {
            id: new_org_id(),
            name: self.legislature_name.to_string(),
            classification: "legislature".to_string(),
            parent_id: None,
            posts: Vec::new(),
        };

        let chambers = Chamber::both().iter().map(|&chamber| {
            let spec = self.chamber(chamber);
            let district_type = match chamber {
                Chamber::Upper => "sldu",
                Chamber::Lower => "sldl",
            };
            let posts = spec
                .seats
                .labels()
                .into_iter()
                .map(|label| Post {
                    division_id: format!(
                        "{}/{}:{}",
                        self.division_id,
                        district_type,
                        label.to_lowercase()
                    ),
                    role: spec.title.to_string(),
                    label,
                })
                .collect();
            Organization {
                id: new_org_id(),
                name: spec.name.to_string(),
                classification: chamber.to_string(),
                parent_id: Some(legislature.id.clone()),
                posts,
            }
        });

        let mut orgs: Vec<Organization> = chambers.collect();
        orgs.insert(0, legislature);
        orgs
    }
}

fn new_org_id() -> String {
    format!("ocd-organization/{}", Uuid::new_v4())
}

// ABOUTME: Civic data records produced by the scrapers
// ABOUTME: Bills, actions, vote events, people and organizations in the shared schema

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Legislative chamber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chamber {
    Upper,
    Lower,
}

impl Chamber {
    /// Both chambers, upper first
    pub fn both() -> &'static [Self] {
        &[Self::Upper, Self::Lower]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chamber {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            other => Err(format!("unknown chamber '{other}' (expected upper or lower)")),
        }
    }
}

/// Canonical action classification tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "introduction")]
    Introduction,
    #[serde(rename = "reading-1")]
    Reading1,
    #[serde(rename = "reading-2")]
    Reading2,
    #[serde(rename = "reading-3")]
    Reading3,
    #[serde(rename = "executive-receipt")]
    ExecutiveReceipt,
    #[serde(rename = "executive-signature")]
    ExecutiveSignature,
    #[serde(rename = "committee-passage")]
    CommitteePassage,
    #[serde(rename = "committee-failure")]
    CommitteeFailure,
    #[serde(rename = "passage")]
    Passage,
    #[serde(rename = "referral-committee")]
    ReferralCommittee,
    #[serde(rename = "filing")]
    Filing,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Reading1 => "reading-1",
            Self::Reading2 => "reading-2",
            Self::Reading3 => "reading-3",
            Self::ExecutiveReceipt => "executive-receipt",
            Self::ExecutiveSignature => "executive-signature",
            Self::CommitteePassage => "committee-passage",
            Self::CommitteeFailure => "committee-failure",
            Self::Passage => "passage",
            Self::ReferralCommittee => "referral-committee",
            Self::Filing => "filing",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record was scraped from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
}

/// A single media link of a version or document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub media_type: String,
}

/// A named bill text or supporting document with its links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub note: String,
    pub links: Vec<Link>,
}

/// Sponsor of a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsorship {
    pub name: String,
    pub entity_type: String,
    /// "primary" or "cosponsor"
    pub classification: String,
    pub primary: bool,
}

/// A dated event in a bill's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAction {
    pub description: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chamber: Option<Chamber>,
    pub classification: Vec<ActionType>,
}

/// A bill or resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub identifier: String,
    pub title: String,
    pub legislative_session: String,
    pub chamber: Chamber,
    pub classification: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_titles: Vec<String>,
    pub sponsorships: Vec<Sponsorship>,
    pub actions: Vec<BillAction>,
    pub versions: Vec<DocumentLink>,
    pub documents: Vec<DocumentLink>,
    pub subject: Vec<String>,
    pub sources: Vec<Source>,
}

impl Bill {
    /// Create an empty bill
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        chamber: Chamber,
        classification: impl Into<String>,
        legislative_session: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            legislative_session: legislative_session.into(),
            chamber,
            classification: vec![classification.into()],
            other_titles: Vec::new(),
            sponsorships: Vec::new(),
            actions: Vec::new(),
            versions: Vec::new(),
            documents: Vec::new(),
            subject: Vec::new(),
            sources: Vec::new(),
        }
    }

    pub fn add_source(&mut self, url: impl Into<String>) {
        self.sources.push(Source { url: url.into() });
    }

    pub fn add_sponsorship(&mut self, name: impl Into<String>, primary: bool) {
        self.sponsorships.push(Sponsorship {
            name: name.into(),
            entity_type: "person".to_string(),
            classification: if primary { "primary" } else { "cosponsor" }.to_string(),
            primary,
        });
    }

    /// Add a link to the version named `note`, creating the version if needed
    pub fn add_version_link(&mut self, note: &str, url: impl Into<String>, media_type: &str) {
        push_link(&mut self.versions, note, url.into(), media_type);
    }

    /// Add a link to the document named `note`, creating the document if needed
    pub fn add_document_link(&mut self, note: &str, url: impl Into<String>, media_type: &str) {
        push_link(&mut self.documents, note, url.into(), media_type);
    }

    /// Whether any version already links to `url`
    pub fn has_version_url(&self, url: &str) -> bool {
        self.versions
            .iter()
            .flat_map(|v| v.links.iter())
            .any(|l| l.url == url)
    }
}

fn push_link(docs: &mut Vec<DocumentLink>, note: &str, url: String, media_type: &str) {
    let link = Link {
        url,
        media_type: media_type.to_string(),
    };
    match docs.iter_mut().find(|d| d.note == note) {
        Some(doc) => doc.links.push(link),
        None => docs.push(DocumentLink {
            note: note.to_string(),
            links: vec![link],
        }),
    }
}

/// Outcome of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteResult {
    Pass,
    Fail,
}

/// How a legislator voted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOption {
    Yes,
    No,
    Other,
}

/// Aggregate count for one vote option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    pub option: VoteOption,
    pub value: u32,
}

/// One legislator's recorded choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonVote {
    pub option: VoteOption,
    pub voter_name: String,
}

/// A roll-call vote on a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEvent {
    /// Stable identity used to deduplicate re-scrapes of the same document
    pub identifier: String,
    pub bill: String,
    pub start_date: NaiveDate,
    pub chamber: Chamber,
    pub motion_text: String,
    pub result: VoteResult,
    pub classification: Vec<String>,
    pub counts: Vec<VoteCount>,
    pub votes: Vec<PersonVote>,
    pub sources: Vec<Source>,
}

impl VoteEvent {
    /// Count recorded for `option`, zero when absent
    pub fn count(&self, option: VoteOption) -> u32 {
        self.counts
            .iter()
            .find(|c| c.option == option)
            .map_or(0, |c| c.value)
    }

    /// Names recorded with `option`, in document order
    pub fn voters(&self, option: VoteOption) -> Vec<&str> {
        self.votes
            .iter()
            .filter(|v| v.option == option)
            .map(|v| v.voter_name.as_str())
            .collect()
    }
}

/// A legislator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub party: String,
    pub chamber: Chamber,
    pub district: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub sources: Vec<Source>,
}

/// A seat within a chamber
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub label: String,
    pub role: String,
    pub division_id: String,
}

/// A legislature or one of its chambers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    /// "legislature", "upper" or "lower"
    pub classification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Any record a scraper emits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "snake_case")]
pub enum Record {
    Bill(Bill),
    VoteEvent(VoteEvent),
    Person(Person),
    Organization(Organization),
}

impl Record {
    /// Short type name, also used to name output files
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bill(_) => "bill",
            Self::VoteEvent(_) => "vote_event",
            Self::Person(_) => "person",
            Self::Organization(_) => "organization",
        }
    }
}

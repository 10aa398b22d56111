// ABOUTME: Parses Alaska journal roll-call reports into vote events
// ABOUTME: Splits a report into motion blocks, reads tallies and per-member choices

use crate::html::{selector, text_of};
use crate::model::{Chamber, PersonVote, Source, VoteCount, VoteEvent, VoteOption, VoteResult};
use chrono::NaiveDate;
use regex_lite::{CaptureMatches, Regex};
use scraper::Html;
use std::iter::Peekable;
use std::sync::LazyLock;

static MOTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)The question (?:being|to be reconsidered):\s*"(.*?\?)""#)
        .expect("valid regex")
});

static TALLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([YNEA])[A-Z]+:\s{0,3}(\d{1,3}|-)?").expect("valid regex"));

// Journal page header, repeated mid-report on long documents
static PAGE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2}-\d{2}-\d{4}\s{10,}\w{0,20} Journal\s{10,}\d{0,6}\s{0,4}")
        .expect("valid regex")
});

/// What a vote report is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteContext {
    /// Bill identifier, e.g. "HB 1"
    pub bill: String,
    pub chamber: Chamber,
    pub date: NaiveDate,
    /// Url of the vote document, also the base of each vote's identity
    pub source_url: String,
}

/// Text of the roll-call report on a vote page, the second `<pre>` block
///
/// Returns `None` when the page has fewer than two preformatted blocks.
pub fn report_text(html: &str) -> Option<String> {
    let pre = selector("pre").ok()?;
    let doc = Html::parse_document(html);
    doc.select(&pre).nth(1).map(text_of)
}

/// Vote events of a vote page, empty when the page carries no report
pub fn votes_from_document(html: &str, context: &VoteContext) -> Vec<VoteEvent> {
    match report_text(html) {
        Some(text) => parse_votes(&text, context).collect(),
        None => Vec::new(),
    }
}

/// Lazily parse every motion block of a report
pub fn parse_votes<'a>(text: &'a str, context: &'a VoteContext) -> VoteEvents<'a> {
    VoteEvents {
        text,
        context,
        motions: MOTION.captures_iter(text).peekable(),
        ordinal: 0,
    }
}

/// Iterator over the vote events of one report, one per motion
pub struct VoteEvents<'a> {
    text: &'a str,
    context: &'a VoteContext,
    motions: Peekable<CaptureMatches<'static, 'a>>,
    ordinal: usize,
}

impl Iterator for VoteEvents<'_> {
    type Item = VoteEvent;

    fn next(&mut self) -> Option<VoteEvent> {
        let caps = self.motions.next()?;
        let start = caps.get(0).map_or(0, |m| m.end());
        let end = self
            .motions
            .peek()
            .and_then(|next| next.get(0))
            .map_or(self.text.len(), |m| m.start());
        let motion = caps.get(1).map_or("", |m| m.as_str());

        self.ordinal += 1;
        Some(build_vote(
            motion,
            &self.text[start..end],
            self.ordinal,
            self.context,
        ))
    }
}

/// Yes/no/other totals of a motion block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub yes: u32,
    pub no: u32,
    pub other: u32,
}

impl Tally {
    pub fn result(&self) -> VoteResult {
        if self.yes > self.no {
            VoteResult::Pass
        } else {
            VoteResult::Fail
        }
    }
}

/// Read `YEAS: n  NAYS: n  EXCUSED: n  ABSENT: n` style counts
pub fn parse_tally(block: &str) -> Tally {
    let mut tally = Tally::default();
    for caps in TALLY.captures_iter(block) {
        let count = caps
            .get(2)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        match &caps[1] {
            "Y" => tally.yes += count,
            "N" => tally.no += count,
            _ => tally.other += count,
        }
    }
    tally
}

/// Assign member names to the list they are printed under
pub fn parse_member_votes(block: &str) -> Vec<PersonVote> {
    let body = PAGE_HEADER.replace_all(block, "");
    let mut votes = Vec::new();
    let mut bucket = None;

    for line in body.lines() {
        let names = if let Some(rest) = line.strip_prefix("Yeas: ") {
            bucket = Some(VoteOption::Yes);
            rest
        } else if let Some(rest) = line.strip_prefix("Nays: ") {
            bucket = Some(VoteOption::No);
            rest
        } else if let Some(rest) = line.strip_prefix("Excused: ") {
            bucket = Some(VoteOption::Other);
            rest
        } else if let Some(rest) = line.strip_prefix("Absent: ") {
            bucket = Some(VoteOption::Other);
            rest
        } else {
            if line.trim().is_empty() {
                bucket = None;
            }
            line
        };

        let Some(option) = bucket else { continue };
        votes.extend(
            names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| PersonVote {
                    option,
                    voter_name: name.to_string(),
                }),
        );
    }
    votes
}

fn build_vote(motion: &str, block: &str, ordinal: usize, context: &VoteContext) -> VoteEvent {
    let tally = parse_tally(block);
    let identifier = if ordinal > 1 {
        format!("{} {}", context.source_url, ordinal)
    } else {
        context.source_url.clone()
    };

    VoteEvent {
        identifier,
        bill: context.bill.clone(),
        start_date: context.date,
        chamber: context.chamber,
        motion_text: motion.split_whitespace().collect::<Vec<_>>().join(" "),
        result: tally.result(),
        classification: vec!["passage".to_string()],
        counts: vec![
            VoteCount {
                option: VoteOption::Yes,
                value: tally.yes,
            },
            VoteCount {
                option: VoteOption::No,
                value: tally.no,
            },
            VoteCount {
                option: VoteOption::Other,
                value: tally.other,
            },
        ],
        votes: parse_member_votes(block),
        sources: vec![Source {
            url: context.source_url.clone(),
        }],
    }
}

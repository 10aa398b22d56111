// ABOUTME: Normalizes Alaska bill action text and classifies it
// ABOUTME: Ordered rewrite rules plus phrase rules that attach action type tags

use super::tables::{lookup_or_default, CodeTable, COMMITTEES, COMMITTEE_VOTE_TYPES, FISCAL_DEPARTMENTS};
use crate::model::ActionType;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Last committee named by a committee action line
///
/// Committee reports (`DP: ...`, `NR: ...`) do not repeat the committee, so the
/// code is carried forward from an earlier action of the same bill. Use one
/// context per bill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitteeContext {
    current: Option<String>,
}

impl CommitteeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committee code seen most recently, if any
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

/// Human-readable action text with its classification tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAction {
    pub description: String,
    pub classification: Vec<ActionType>,
}

type Rewrite = fn(&ActionNormalizer, String, &mut CommitteeContext) -> String;

/// Text rewrites in application order. Later rules see the output of earlier ones.
const REWRITES: &[(&str, Rewrite)] = &[
    ("fiscal-note", ActionNormalizer::expand_fiscal_note),
    ("committee-context", ActionNormalizer::capture_committee),
    ("committee-vote", ActionNormalizer::expand_committee_vote),
    ("cosponsors", ActionNormalizer::expand_cosponsors),
    ("referral", ActionNormalizer::expand_referral),
    ("whitespace", ActionNormalizer::collapse_whitespace),
];

#[derive(Debug, Clone, Copy)]
enum Trigger {
    Contains(&'static str),
    StartsWith(&'static str),
}

/// Fixed phrase: optional replacement for the phrase plus tags it implies
#[derive(Debug, Clone, Copy)]
struct PhraseRule {
    trigger: Trigger,
    replacement: Option<&'static str>,
    tags: &'static [ActionType],
}

impl PhraseRule {
    const fn contains(
        phrase: &'static str,
        replacement: Option<&'static str>,
        tags: &'static [ActionType],
    ) -> Self {
        Self {
            trigger: Trigger::Contains(phrase),
            replacement,
            tags,
        }
    }

    fn apply(&self, text: &mut String, tags: &mut Vec<ActionType>) {
        let phrase = match self.trigger {
            Trigger::Contains(p) if text.contains(p) => p,
            Trigger::StartsWith(p) if text.starts_with(p) => p,
            _ => return,
        };
        for tag in self.tags {
            if !tags.contains(tag) {
                tags.push(*tag);
            }
        }
        if let Some(replacement) = self.replacement {
            *text = text.replace(phrase, replacement);
        }
    }
}

const PHRASE_RULES: &[PhraseRule] = &[
    PhraseRule::contains("PREFILE RELEASED", Some("Prefile released"), &[]),
    PhraseRule::contains(
        "READ THE FIRST TIME",
        Some("Read the first time"),
        &[ActionType::Introduction, ActionType::Reading1],
    ),
    PhraseRule::contains(
        "READ THE SECOND TIME",
        Some("Read the second time"),
        &[ActionType::Reading2],
    ),
    PhraseRule::contains(
        "READ THE THIRD TIME",
        Some("Read the third time"),
        &[ActionType::Reading3],
    ),
    PhraseRule::contains(
        "TRANSMITTED TO GOVERNOR",
        Some("Transmitted to Governor"),
        &[ActionType::ExecutiveReceipt],
    ),
    PhraseRule::contains(
        "SIGNED INTO LAW",
        Some("Signed into law"),
        &[ActionType::ExecutiveSignature],
    ),
    PhraseRule::contains("Do Pass", None, &[ActionType::CommitteePassage]),
    PhraseRule::contains("Do Not Pass", None, &[ActionType::CommitteeFailure]),
    PhraseRule {
        trigger: Trigger::StartsWith("PASSED"),
        replacement: None,
        tags: &[ActionType::Passage],
    },
    PhraseRule::contains(
        "REFERRED TO",
        Some("Referred to"),
        &[ActionType::ReferralCommittee],
    ),
    PhraseRule::contains("Prefile released", None, &[ActionType::Filing]),
];

/// Rewrites raw Alaska action strings into readable, classified actions
#[derive(Debug, Clone)]
pub struct ActionNormalizer {
    committees: CodeTable,
    fiscal_departments: CodeTable,
    vote_types: CodeTable,
    fiscal_note: Regex,
    committee_line: Regex,
    committee_vote: Regex,
    cosponsors: Regex,
    dual_referral: Regex,
    single_referral: Regex,
    referral: Regex,
    whitespace: Regex,
}

impl Default for ActionNormalizer {
    fn default() -> Self {
        Self::new(COMMITTEES, FISCAL_DEPARTMENTS, COMMITTEE_VOTE_TYPES)
    }
}

impl ActionNormalizer {
    /// Build a normalizer over the given lookup tables
    pub fn new(committees: CodeTable, fiscal_departments: CodeTable, vote_types: CodeTable) -> Self {
        let committee_line = format!(r"^({})\s", alternation(committees));
        let committee_vote = format!(r"^({}):\s(.*)$", alternation(vote_types));

        Self {
            committees,
            fiscal_departments,
            vote_types,
            fiscal_note: Regex::new(r"^FN(\d+):\s+(ZERO|INDETERMINATE)?\((\w+)\)")
                .expect("valid regex"),
            committee_line: Regex::new(&committee_line).expect("valid regex"),
            committee_vote: Regex::new(&committee_vote).expect("valid regex"),
            cosponsors: Regex::new(r"^COSPONSOR\(S\):\s+(.*)$").expect("valid regex"),
            dual_referral: Regex::new(r"^\s*(?:REFERRED\s+TO\s+)?([A-Z]{3}),\s+([A-Z]{3})\s*$")
                .expect("valid regex"),
            single_referral: Regex::new(r"^\s*(?:REFERRED\s+TO\s+)?([A-Z]{3})\s*$")
                .expect("valid regex"),
            referral: Regex::new(r"^\s*REFERRED\s+TO\s+(.*)$").expect("valid regex"),
            whitespace: Regex::new(r"\s+").expect("valid regex"),
        }
    }

    /// Normalize one action, reading and updating the committee context
    pub fn normalize(&self, raw: &str, context: &mut CommitteeContext) -> NormalizedAction {
        let mut text = REWRITES
            .iter()
            .fold(raw.to_string(), |text, (_, rewrite)| rewrite(self, text, context));

        let mut classification = Vec::new();
        for rule in PHRASE_RULES {
            rule.apply(&mut text, &mut classification);
        }

        NormalizedAction {
            description: text,
            classification,
        }
    }

    /// Normalize one bill's actions in order, threading a fresh committee context
    pub fn normalize_all<'a, I>(&self, actions: I) -> Vec<NormalizedAction>
    where
        I: IntoIterator<Item = &'a str>,
    {
        actions
            .into_iter()
            .fold(
                (CommitteeContext::new(), Vec::new()),
                |(mut context, mut out), raw| {
                    out.push(self.normalize(raw, &mut context));
                    (context, out)
                },
            )
            .1
    }

    fn expand_fiscal_note(&self, text: String, _: &mut CommitteeContext) -> String {
        let Some(caps) = self.fiscal_note.captures(&text) else {
            return text;
        };
        let impact = match caps.get(2).map(|m| m.as_str()) {
            Some("ZERO") => "No fiscal impact",
            Some("INDETERMINATE") => "Indeterminate fiscal impact",
            _ => "",
        };
        let dept = lookup_or_default(self.fiscal_departments, &caps[3]);
        format!("Fiscal Note {}: {} ({})", &caps[1], impact, dept)
    }

    fn capture_committee(&self, text: String, context: &mut CommitteeContext) -> String {
        if let Some(caps) = self.committee_line.captures(&text) {
            context.current = Some(caps[1].to_string());
        }
        text
    }

    fn expand_committee_vote(&self, text: String, context: &mut CommitteeContext) -> String {
        let Some(caps) = self.committee_vote.captures(&text) else {
            return text;
        };
        let vote_type = lookup_or_default(self.vote_types, &caps[1]);
        match context.current() {
            Some(committee) => format!("{} {}: {}", committee, vote_type, &caps[2]),
            None => format!("{}: {}", vote_type, &caps[2]),
        }
    }

    fn expand_cosponsors(&self, text: String, _: &mut CommitteeContext) -> String {
        match self.cosponsors.captures(&text) {
            Some(caps) => format!("Cosponsors added: {}", &caps[1]),
            None => text,
        }
    }

    /// Committee shorthand expands to table names, which are kept as written.
    /// Any other referral has its committee list title-cased.
    fn expand_referral(&self, text: String, _: &mut CommitteeContext) -> String {
        if let Some(caps) = self.dual_referral.captures(&text) {
            return format!(
                "REFERRED TO {} and {}",
                lookup_or_default(self.committees, &caps[1]),
                lookup_or_default(self.committees, &caps[2])
            );
        }
        if let Some(caps) = self.single_referral.captures(&text) {
            return format!(
                "REFERRED TO {}",
                lookup_or_default(self.committees, &caps[1])
            );
        }
        match self.referral.captures(&text) {
            Some(caps) => {
                let committees = self.whitespace.replace_all(&caps[1], " ");
                format!(
                    "REFERRED TO {}",
                    title_case(&committees).replace(" And ", " and ")
                )
            }
            None => text,
        }
    }

    fn collapse_whitespace(&self, text: String, _: &mut CommitteeContext) -> String {
        self.whitespace.replace_all(&text, " ").into_owned()
    }
}

fn alternation(table: CodeTable) -> String {
    table
        .iter()
        .map(|(code, _)| regex_lite::escape(code))
        .collect::<Vec<_>>()
        .join("|")
}

/// Upper-case the first letter of every run of letters, lower-case the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

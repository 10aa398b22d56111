// ABOUTME: Alaska bill scraper: bill list, bill detail pages and their roll calls
// ABOUTME: Extracts labeled fields, sponsors, actions, versions, documents and subjects

use super::actions::{ActionNormalizer, CommitteeContext};
use super::votes::{votes_from_document, VoteContext};
use crate::fetch::Fetch;
use crate::html::{absolutize, children_named, first_attr, first_text, selector, text_of};
use crate::model::{Bill, BillAction, Chamber, Record};
use crate::sink::RecordSink;
use crate::{Result, ScrapeError};
use chrono::NaiveDate;
use regex_lite::Regex;
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

pub const BASE_URL: &str = "http://www.akleg.gov/";

static SENATE_SPONSORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SENATOR[\(S\)]*\s*(.*)").expect("valid regex"));

static HOUSE_SPONSORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^REPRESENTATIVE[\(S\)]*\s*(.*)").expect("valid regex"));

// Actions carrying a yes count, e.g. "PASSED Y21 N15"
static ROLL_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bY\d+\b").expect("valid regex"));

/// Range page listing every bill of a session
pub fn bill_list_url(session: &str) -> String {
    // H1 -> H25 returns all bills, Senate included
    format!("{BASE_URL}basis/Bill/Range/{session}?session=&billH1=1&bill2=H25")
}

/// Bill type from an identifier like "HB 1" or "SJR 4"
pub fn classify_bill(identifier: &str) -> Result<&'static str> {
    let prefix: String = identifier
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    match prefix.get(1..).unwrap_or("") {
        "B" => Ok("bill"),
        "R" => Ok("resolution"),
        "JR" => Ok("joint resolution"),
        "CR" => Ok("concurrent resolution"),
        _ => Err(ScrapeError::Parse(format!(
            "could not categorize bill id '{identifier}'"
        ))),
    }
}

/// Link from an action to the journal page holding its roll call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollCallRef {
    pub url: String,
    pub chamber: Chamber,
    pub date: NaiveDate,
    /// Normalized text of the action that links to it
    pub motion: String,
}

/// A parsed bill page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillPage {
    pub bill: Bill,
    pub roll_calls: Vec<RollCallRef>,
}

/// Bill detail page links for one chamber from the range page
pub fn parse_bill_list(html: &str, chamber: Chamber) -> Result<Vec<String>> {
    let row_class = match chamber {
        Chamber::Upper => "Senate",
        Chamber::Lower => "House",
    };
    let links = selector(&format!(
        r#"div[class*="content-page"] > div > table tr[class*="{row_class}"] > td:first-child > nobr > a[href]"#
    ))?;
    let base = base_url()?;
    let doc = Html::parse_document(html);
    Ok(doc
        .select(&links)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| absolutize(&base, href))
        .collect())
}

/// Extract a bill and its roll-call links from a bill detail page
pub fn parse_bill_page(
    html: &str,
    url: &str,
    chamber: Chamber,
    session: &str,
    normalizer: &ActionNormalizer,
) -> Result<BillPage> {
    let doc = Html::parse_document(html);
    let page = BillPageDoc {
        doc: &doc,
        url,
        base: base_url()?,
    };

    let identifier = page.field("Bill")?.replace("   ", " ");
    let short_title = page.field("Short Title")?;
    let long_title = page.field("Title")?;
    let sponsors = page.field("Sponsor(S)")?;

    let mut bill = Bill::new(
        identifier.as_str(),
        short_title,
        chamber,
        classify_bill(&identifier)?,
        session,
    );
    if !long_title.is_empty() {
        bill.other_titles.push(long_title);
    }
    bill.add_source(url);

    add_sponsors(&mut bill, &sponsors);
    let roll_calls = page.actions(&mut bill, normalizer)?;
    page.versions(&mut bill)?;
    page.fiscal_notes(&mut bill)?;
    page.amendments(&mut bill)?;
    page.subjects(&mut bill)?;

    Ok(BillPage { bill, roll_calls })
}

fn base_url() -> Result<Url> {
    Url::parse(BASE_URL).map_err(|e| ScrapeError::Parse(format!("{BASE_URL}: {e}")))
}

/// Primary sponsors are printed in upper case, cosponsors are not
fn add_sponsors(bill: &mut Bill, sponsors: &str) {
    let names = SENATE_SPONSORS
        .captures(sponsors)
        .or_else(|| HOUSE_SPONSORS.captures(sponsors))
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str());

    for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        bill.add_sponsorship(name, is_upper(name));
    }
}

fn is_upper(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && !s.chars().any(char::is_lowercase)
}

fn chamber_of_action(text: &str) -> Option<Chamber> {
    if text.contains("(S)") {
        Some(Chamber::Upper)
    } else if text.contains("(H)") {
        Some(Chamber::Lower)
    } else {
        None
    }
}

struct BillPageDoc<'a> {
    doc: &'a Html,
    url: &'a str,
    base: Url,
}

impl BillPageDoc<'_> {
    fn missing(&self, field: &str) -> ScrapeError {
        ScrapeError::missing(field, self.url)
    }

    /// Value of a `<li><span>Label</span><strong>Value</strong></li>` field
    fn field(&self, label: &str) -> Result<String> {
        let items = selector("li")?;
        self.doc
            .select(&items)
            .find(|li| children_named(*li, "span").any(|span| text_of(span).trim() == label))
            .and_then(|li| children_named(li, "strong").next())
            .map(|strong| text_of(strong).trim().to_string())
            .ok_or_else(|| self.missing(label))
    }

    /// Rows containing a cell with the given `data-label`
    fn rows_with_cell(&self, label: &str) -> Result<Vec<ElementRef<'_>>> {
        let rows = selector("tr")?;
        let cell = selector(&format!(r#"td[data-label="{label}"]"#))?;
        Ok(self
            .doc
            .select(&rows)
            .filter(|row| row.select(&cell).next().is_some())
            .collect())
    }

    fn href(&self, scope: ElementRef<'_>, css: &str) -> Result<Option<String>> {
        Ok(first_attr(scope, &selector(css)?, "href").map(|href| absolutize(&self.base, &href)))
    }

    fn actions(&self, bill: &mut Bill, normalizer: &ActionNormalizer) -> Result<Vec<RollCallRef>> {
        let rows = selector(r#"tr[class*="floorAction"], tr[class*="committeeAction"]"#)?;
        let time = selector("time")?;
        let span = selector("span")?;
        let link = selector("a[href]")?;

        let mut context = CommitteeContext::new();
        let mut roll_calls = Vec::new();

        for row in self.doc.select(&rows) {
            let cells: Vec<ElementRef<'_>> = children_named(row, "td").collect();
            let datetime = cells
                .first()
                .and_then(|td| td.select(&time).next())
                .and_then(|t| t.value().attr("datetime"))
                .ok_or_else(|| self.missing("action date"))?;
            let date = NaiveDate::parse_from_str(datetime.trim(), "%Y-%m-%d")
                .map_err(|e| ScrapeError::Parse(format!("action date '{datetime}': {e}")))?;
            let raw = cells
                .get(2)
                .and_then(|td| first_text(*td, &span))
                .ok_or_else(|| self.missing("action text"))?;

            let chamber = chamber_of_action(&raw);
            if chamber.is_none() {
                tracing::warn!(bill = %bill.identifier, action = %raw, "unable to determine chamber for action");
            }

            let normalized = normalizer.normalize(&raw, &mut context);

            if ROLL_CALL.is_match(&normalized.description) {
                if let Some(href) = first_attr(row, &link, "href") {
                    roll_calls.push(RollCallRef {
                        url: absolutize(&self.base, &href),
                        chamber: chamber.unwrap_or(bill.chamber),
                        date,
                        motion: normalized.description.clone(),
                    });
                }
            }

            bill.actions.push(BillAction {
                description: normalized.description,
                date,
                chamber,
                classification: normalized.classification,
            });
        }

        Ok(roll_calls)
    }

    /// Each version is published as html, plain text and pdf
    fn versions(&self, bill: &mut Bill) -> Result<()> {
        let version_link = selector(r#"td[data-label="Version"] span a"#)?;
        let amended_name = selector(r#"td[data-label="Amended Name"] span"#)?;

        for row in self.rows_with_cell("Version")? {
            let link = row
                .select(&version_link)
                .next()
                .ok_or_else(|| self.missing("version link"))?;
            let version_name = text_of(link).trim().to_string();
            let html_url = link
                .value()
                .attr("href")
                .map(|href| absolutize(&self.base, href))
                .ok_or_else(|| self.missing("version href"))?;
            let plain_url = html_url.replace("Text", "Plaintext");
            let amended = first_text(row, &amended_name).ok_or_else(|| self.missing("amended name"))?;
            let pdf_url = self
                .href(row, r#"td[data-label="PDF"] span a"#)?
                .ok_or_else(|| self.missing("version pdf"))?;

            let note = format!("{amended} ({version_name})");
            bill.add_version_link(&note, html_url, "text/html");
            bill.add_version_link(&note, plain_url, "text/plain");
            bill.add_version_link(&note, pdf_url, "application/pdf");
        }
        Ok(())
    }

    fn fiscal_notes(&self, bill: &mut Bill) -> Result<()> {
        let cell = selector(r#"td[data-label="Fiscal Note"] span"#)?;
        for row in self.rows_with_cell("Fiscal Note")? {
            let pdf_url = self
                .href(row, r#"td[data-label="Fiscal Note"] span a"#)?
                .ok_or_else(|| self.missing("fiscal note pdf"))?;
            let name = first_text(row, &cell)
                .ok_or_else(|| self.missing("fiscal note name"))?
                .replace("pdf ", "");
            bill.add_document_link(&name, pdf_url, "application/pdf");
        }
        Ok(())
    }

    /// Amendments with posted text, added as pdf versions
    fn amendments(&self, bill: &mut Bill) -> Result<()> {
        let name_cell = selector(r#"td[data-label="Amendment"] span"#)?;
        let chamber_cell = selector(r#"td[data-label="Chamber"] span"#)?;

        for row in self.rows_with_cell("Amendment")? {
            let Some(pdf_url) = self.href(row, r#"td > a[class*="pdf"]"#)? else {
                continue;
            };
            let name = first_text(row, &name_cell).ok_or_else(|| self.missing("amendment name"))?;
            let chamber = first_text(row, &chamber_cell)
                .ok_or_else(|| self.missing("amendment chamber"))?;
            let chamber = match chamber.as_str() {
                "H" => "House",
                "S" => "Senate",
                other => other,
            };
            if bill.has_version_url(&pdf_url) {
                continue;
            }
            bill.add_version_link(&format!("{chamber} {name}"), pdf_url, "application/pdf");
        }
        Ok(())
    }

    fn subjects(&self, bill: &mut Bill) -> Result<()> {
        let subjects = selector(r#"ul[class*="list-links"] > li:nth-child(n+2) > a"#)?;
        bill.subject.extend(
            self.doc
                .select(&subjects)
                .map(|a| text_of(a).trim().to_string())
                .filter(|s| !s.is_empty()),
        );
        Ok(())
    }
}

/// Scrapes bills of one session, fetching pages through a [`Fetch`]
pub struct BillScraper<'a> {
    fetcher: &'a dyn Fetch,
    normalizer: ActionNormalizer,
    bill_list: Option<String>,
}

impl<'a> BillScraper<'a> {
    pub fn new(fetcher: &'a dyn Fetch) -> Self {
        Self {
            fetcher,
            normalizer: ActionNormalizer::default(),
            bill_list: None,
        }
    }

    /// Emit every bill of `session` in `chambers` with its vote events
    pub fn scrape(
        &mut self,
        session: &str,
        chambers: &[Chamber],
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        let mut emitted = 0;
        for &chamber in chambers {
            tracing::info!(session, %chamber, "scraping Alaska bills");
            for link in self.bill_links(session, chamber)? {
                emitted += self.scrape_bill(&link, chamber, session, sink)?;
            }
        }
        Ok(emitted)
    }

    fn bill_links(&mut self, session: &str, chamber: Chamber) -> Result<Vec<String>> {
        // One range page covers both chambers
        let list = match self.bill_list.take() {
            Some(list) => list,
            None => self.fetcher.get(&bill_list_url(session))?,
        };
        let links = parse_bill_list(&list, chamber);
        self.bill_list = Some(list);
        links
    }

    /// Emit one bill followed by the votes of its roll-call links
    pub fn scrape_bill(
        &self,
        url: &str,
        chamber: Chamber,
        session: &str,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        let html = self.fetcher.get(url)?;
        let BillPage { bill, roll_calls } =
            parse_bill_page(&html, url, chamber, session, &self.normalizer)?;
        tracing::debug!(bill = %bill.identifier, actions = bill.actions.len(), "parsed bill");

        let identifier = bill.identifier.clone();
        sink.emit(Record::Bill(bill))?;
        let mut emitted = 1;

        let mut seen = HashSet::new();
        for roll_call in roll_calls {
            if !seen.insert(roll_call.url.clone()) {
                continue;
            }
            let html = self.fetcher.get(&roll_call.url)?;
            let context = VoteContext {
                bill: identifier.clone(),
                chamber: roll_call.chamber,
                date: roll_call.date,
                source_url: roll_call.url,
            };
            for vote in votes_from_document(&html, &context) {
                sink.emit(Record::VoteEvent(vote))?;
                emitted += 1;
            }
        }
        Ok(emitted)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use crate::model::{ActionType, VoteOption};

    pub(crate) const BILL_URL: &str = "http://www.akleg.gov/basis/Bill/Detail/31?Root=HB%20%201";
    pub(crate) const VOTE_URL: &str =
        "http://www.akleg.gov/basis/Journal/Pages/31?Chamber=H&Page=0123";

    pub(crate) const LIST_PAGE: &str = r#"<html><body>
<div class="content-page"><div><table>
<tr class="House odd"><td><nobr><a href="/basis/Bill/Detail/31?Root=HB%20%201">HB 1</a></nobr></td><td>SHORT TITLE</td></tr>
<tr class="Senate even"><td><nobr><a href="/basis/Bill/Detail/31?Root=SJR%20%204">SJR 4</a></nobr></td><td>OTHER</td></tr>
</table></div></div>
</body></html>"#;

    pub(crate) const BILL_PAGE: &str = r#"<html><body>
<ul class="information">
  <li><span>Bill </span><strong>HB   1</strong></li>
  <li><span>Short Title </span><strong>APPROP: OPERATING BUDGET</strong></li>
  <li><span>Title</span><strong>"An Act making appropriations for the operating expenses of state government."</strong></li>
  <li><span>Sponsor(S) </span><strong>REPRESENTATIVE(S) FOSTER, Wilson, Kito</strong></li>
</ul>
<ul class="list-links">
  <li>Subjects</li>
  <li><a href="/subject/1">APPROPRIATIONS</a></li>
  <li><a href="/subject/2"> BUDGET </a></li>
</ul>
<table>
<tr class="floorAction"><td><time datetime="2019-01-16">01/16/2019</time></td><td>0012</td><td><span>(H) READ THE FIRST TIME - REFERRALS</span></td></tr>
<tr class="committeeAction"><td><time datetime="2019-01-16">01/16/2019</time></td><td>0012</td><td><span>(H) FIN</span></td></tr>
<tr class="committeeAction"><td><time datetime="2019-03-05">03/05/2019</time></td><td></td><td><span>FIN RPT 7DP 3NR</span></td></tr>
<tr class="committeeAction"><td><time datetime="2019-03-05">03/05/2019</time></td><td></td><td><span>DP: WILSON, FOSTER</span></td></tr>
<tr class="floorAction"><td><time datetime="2019-05-01">05/01/2019</time></td><td><a href="/basis/Journal/Pages/31?Chamber=H&amp;Page=0123">0123</a></td><td><span>(H) PASSED Y21 N15 E4</span></td></tr>
</table>
<table>
<tr><td data-label="Version"><span><a href="/basis/Bill/Text/31?Hsid=HB0001A">HB 1</a></span></td><td data-label="Amended Name"><span>HB 1</span></td><td data-label="PDF"><span><a href="http://www.legis.state.ak.us/PDF/31/Bills/HB0001A.PDF">pdf</a></span></td></tr>
</table>
<table>
<tr><td data-label="Fiscal Note"><span><a href="http://www.legis.state.ak.us/PDF/31/F/HB0001-1-2-011619-ADM-N.PDF">pdf </a>HB0001-1-2-011619-ADM-N</span></td></tr>
</table>
<table>
<tr><td data-label="Amendment"><span>A.1</span></td><td data-label="Chamber"><span>H</span></td><td><a class="pdf-link" href="http://www.legis.state.ak.us/PDF/31/A/HB0001-A1.PDF">pdf</a></td></tr>
<tr><td data-label="Amendment"><span>A.2</span></td><td data-label="Chamber"><span>S</span></td><td></td></tr>
</table>
</body></html>"#;

    pub(crate) const VOTE_PAGE: &str = r#"<html><body><pre>House Journal</pre><pre>
The question being: "Shall HB 1 pass the House?"

YEAS:  21   NAYS:  15   EXCUSED:  4   ABSENT:  0

Yeas:  Austerman, Chenault

Nays:  Gara
</pre></body></html>"#;

    fn parse() -> BillPage {
        parse_bill_page(
            BILL_PAGE,
            BILL_URL,
            Chamber::Lower,
            "31",
            &ActionNormalizer::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_classify_bill() {
        assert_eq!(classify_bill("HB 1").unwrap(), "bill");
        assert_eq!(classify_bill("SR 2").unwrap(), "resolution");
        assert_eq!(classify_bill("HJR 3").unwrap(), "joint resolution");
        assert_eq!(classify_bill("SCR 4").unwrap(), "concurrent resolution");
        assert!(classify_bill("HX 5").is_err());
    }

    #[test]
    fn test_bill_list_by_chamber() {
        let house = parse_bill_list(LIST_PAGE, Chamber::Lower).unwrap();
        assert_eq!(house, vec![BILL_URL.to_string()]);
        let senate = parse_bill_list(LIST_PAGE, Chamber::Upper).unwrap();
        assert_eq!(
            senate,
            vec!["http://www.akleg.gov/basis/Bill/Detail/31?Root=SJR%20%204".to_string()]
        );
    }

    #[test]
    fn test_fields_and_sponsors() {
        let bill = parse().bill;
        assert_eq!(bill.identifier, "HB 1");
        assert_eq!(bill.title, "APPROP: OPERATING BUDGET");
        assert_eq!(bill.classification, vec!["bill"]);
        assert_eq!(bill.legislative_session, "31");
        assert_eq!(bill.other_titles.len(), 1);
        assert_eq!(bill.sources[0].url, BILL_URL);

        let sponsors: Vec<(&str, bool)> = bill
            .sponsorships
            .iter()
            .map(|s| (s.name.as_str(), s.primary))
            .collect();
        assert_eq!(
            sponsors,
            vec![("FOSTER", true), ("Wilson", false), ("Kito", false)]
        );
        assert_eq!(bill.sponsorships[1].classification, "cosponsor");
    }

    #[test]
    fn test_actions_are_normalized() {
        let page = parse();
        let actions = &page.bill.actions;
        assert_eq!(actions.len(), 5);

        assert_eq!(actions[0].description, "(H) Read the first time - REFERRALS");
        assert_eq!(
            actions[0].classification,
            vec![ActionType::Introduction, ActionType::Reading1]
        );
        assert_eq!(actions[0].chamber, Some(Chamber::Lower));
        assert_eq!(actions[0].date, NaiveDate::from_ymd_opt(2019, 1, 16).unwrap());

        assert_eq!(actions[2].chamber, None);
        assert_eq!(actions[3].description, "FIN Do Pass: WILSON, FOSTER");
        assert_eq!(actions[3].classification, vec![ActionType::CommitteePassage]);
    }

    #[test]
    fn test_roll_call_links() {
        let page = parse();
        assert_eq!(
            page.roll_calls,
            vec![RollCallRef {
                url: VOTE_URL.to_string(),
                chamber: Chamber::Lower,
                date: NaiveDate::from_ymd_opt(2019, 5, 1).unwrap(),
                motion: "(H) PASSED Y21 N15 E4".to_string(),
            }]
        );
    }

    #[test]
    fn test_versions_documents_subjects() {
        let bill = parse().bill;
        assert_eq!(bill.versions.len(), 2);

        let version = &bill.versions[0];
        assert_eq!(version.note, "HB 1 (HB 1)");
        let urls: Vec<&str> = version.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://www.akleg.gov/basis/Bill/Text/31?Hsid=HB0001A",
                "http://www.akleg.gov/basis/Bill/Plaintext/31?Hsid=HB0001A",
                "http://www.legis.state.ak.us/PDF/31/Bills/HB0001A.PDF",
            ]
        );

        assert_eq!(bill.versions[1].note, "House A.1");
        assert_eq!(bill.documents.len(), 1);
        assert_eq!(bill.documents[0].note, "HB0001-1-2-011619-ADM-N");
        assert_eq!(bill.subject, vec!["APPROPRIATIONS", "BUDGET"]);
    }

    #[test]
    fn test_missing_field_is_error() {
        let err = parse_bill_page(
            "<html><body></body></html>",
            BILL_URL,
            Chamber::Lower,
            "31",
            &ActionNormalizer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScrapeError::MissingField { .. }));
    }

    #[test]
    fn test_scraper_emits_bill_then_votes() {
        let fetcher = MemoryFetcher::new()
            .with_page(bill_list_url("31"), LIST_PAGE)
            .with_page(BILL_URL, BILL_PAGE)
            .with_page(VOTE_URL, VOTE_PAGE);
        let mut scraper = BillScraper::new(&fetcher);
        let mut records: Vec<Record> = Vec::new();

        let emitted = scraper.scrape("31", &[Chamber::Lower], &mut records).unwrap();
        assert_eq!(emitted, 2);

        let Record::VoteEvent(vote) = &records[1] else {
            panic!("expected a vote event, got {:?}", records[1]);
        };
        assert_eq!(vote.bill, "HB 1");
        assert_eq!(vote.identifier, VOTE_URL);
        assert_eq!(vote.count(VoteOption::Yes), 21);
        assert_eq!(vote.voters(VoteOption::No), vec!["Gara"]);
    }
}

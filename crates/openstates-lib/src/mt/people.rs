// ABOUTME: Montana legislator roster extraction
// ABOUTME: One page lists both chambers; rows are filtered by seat code

use crate::fetch::Fetch;
use crate::html::selector;
use crate::model::{Chamber, Person, Record, Source};
use crate::sink::RecordSink;
use crate::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

pub const PEOPLE_URL: &str = "https://leg.mt.gov/legislator-information/?session_select=111";

fn seat_code(chamber: Chamber) -> &'static str {
    match chamber {
        Chamber::Upper => "SD",
        Chamber::Lower => "HD",
    }
}

fn party_name(code: &str) -> Result<&'static str> {
    match code {
        "D" => Ok("Democratic"),
        "R" => Ok("Republican"),
        "I" => Ok("Independent"),
        other => Err(ScrapeError::Parse(format!("unknown party code '{other}'"))),
    }
}

struct Cells {
    seat: Selector,
    name: Selector,
    party: Selector,
    phone: Selector,
    email: Selector,
    link: Selector,
}

impl Cells {
    fn new() -> Result<Self> {
        Ok(Self {
            seat: selector(r#"td[class*="seatCell"]"#)?,
            name: selector(r#"td[class*="nameCell"]"#)?,
            party: selector(r#"td[class*="partyCell"]"#)?,
            phone: selector(r#"td[class*="phoneCell"]"#)?,
            email: selector(r#"td[class*="emailCell"]"#)?,
            link: selector("a")?,
        })
    }

    /// First text of the cell's link, or of the cell itself
    fn text(&self, row: ElementRef<'_>, cell: &Selector) -> Option<String> {
        let td = row.select(cell).next()?;
        let scope = td.select(&self.link).next().unwrap_or(td);
        scope
            .text()
            .map(|t| t.replace('\n', "").trim().to_string())
            .find(|t| !t.is_empty())
    }
}

/// Legislators of `chamber` listed on the roster page
pub fn parse_legislators(html: &str, chamber: Chamber, source_url: &str) -> Result<Vec<Person>> {
    let rows = selector("table#reports-table > tbody > tr")?;
    let cells = Cells::new()?;
    let code = seat_code(chamber);
    let doc = Html::parse_document(html);

    let mut people = Vec::new();
    for row in doc.select(&rows) {
        let Some(seat) = cells.text(row, &cells.seat) else {
            continue;
        };
        if !seat.contains(code) {
            continue;
        }

        let name = cells
            .text(row, &cells.name)
            .ok_or_else(|| ScrapeError::missing("name", source_url))?;
        let party = cells
            .text(row, &cells.party)
            .ok_or_else(|| ScrapeError::missing("party", source_url))?;
        let district = seat.replace(code, "").trim().to_string();

        people.push(Person {
            name,
            party: party_name(&party)?.to_string(),
            chamber,
            district,
            phone: cells.text(row, &cells.phone),
            email: cells.text(row, &cells.email),
            sources: vec![Source {
                url: source_url.to_string(),
            }],
        });
    }
    Ok(people)
}

/// Emits Montana legislators for the requested chambers
pub struct PeopleScraper<'a> {
    fetcher: &'a dyn Fetch,
}

impl<'a> PeopleScraper<'a> {
    pub fn new(fetcher: &'a dyn Fetch) -> Self {
        Self { fetcher }
    }

    pub fn scrape(&self, chambers: &[Chamber], sink: &mut dyn RecordSink) -> Result<usize> {
        // Both chambers share one page
        let html = self.fetcher.get(PEOPLE_URL)?;
        let mut emitted = 0;
        for &chamber in chambers {
            let people = parse_legislators(&html, chamber, PEOPLE_URL)?;
            tracing::info!(%chamber, count = people.len(), "scraped Montana legislators");
            for person in people {
                sink.emit(Record::Person(person))?;
                emitted += 1;
            }
        }
        Ok(emitted)
    }
}

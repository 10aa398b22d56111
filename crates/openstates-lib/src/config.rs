// ABOUTME: Scrape run configuration loaded from JSON
// ABOUTME: Selects jurisdiction, session, chambers and scrapers plus input and output dirs

use crate::jurisdiction::{self, Jurisdiction, ScraperKind};
use crate::model::Chamber;
use crate::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One scrape run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeConfig {
    /// Schema version
    pub schema_version: String,
    /// Jurisdiction abbreviation, e.g. "ak"
    pub jurisdiction: String,
    /// Legislative session, required by the bills scraper
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default = "default_chambers")]
    pub chambers: Vec<Chamber>,
    /// Scrapers to run, all the jurisdiction provides when omitted
    #[serde(default)]
    pub scrapers: Vec<ScraperKind>,
    /// Directory of saved pages, see [`crate::fetch::SnapshotFetcher`]
    pub snapshot_dir: PathBuf,
    /// Directory the JSONL record files are written to
    pub output_dir: PathBuf,
}

fn default_chambers() -> Vec<Chamber> {
    Chamber::both().to_vec()
}

impl ScrapeConfig {
    /// Load and validate a config file
    ///
    /// Relative directories are resolved against the file's own directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&content)?;
        if let Some(base) = path.parent() {
            config.snapshot_dir = base.join(&config.snapshot_dir);
            config.output_dir = base.join(&config.output_dir);
        }
        Ok(config)
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the selection against the jurisdiction and fill default scrapers
    pub fn validate(&mut self) -> Result<()> {
        let jurisdiction = jurisdiction::by_abbr(&self.jurisdiction)
            .map_err(|e| ScrapeError::Config(e.to_string()))?;

        if self.scrapers.is_empty() {
            self.scrapers = jurisdiction.scrapers.to_vec();
        }
        if let Some(kind) = self.scrapers.iter().find(|k| !jurisdiction.provides(**k)) {
            return Err(ScrapeError::Config(format!(
                "{} has no {kind} scraper",
                jurisdiction.name
            )));
        }
        if self.scrapers.contains(&ScraperKind::Bills) && self.session.is_none() {
            return Err(ScrapeError::Config(
                "a session is required to scrape bills".to_string(),
            ));
        }
        if self.chambers.is_empty() {
            return Err(ScrapeError::Config("no chambers selected".to_string()));
        }
        Ok(())
    }

    /// The configured jurisdiction
    pub fn jurisdiction(&self) -> Result<&'static Jurisdiction> {
        jurisdiction::by_abbr(&self.jurisdiction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_jurisdiction() {
        let config = ScrapeConfig::from_json(
            r#"{
                "schemaVersion": "1.0",
                "jurisdiction": "mt",
                "snapshotDir": "pages",
                "outputDir": "out"
            }"#,
        )
        .unwrap();
        assert_eq!(config.chambers, vec![Chamber::Upper, Chamber::Lower]);
        assert_eq!(config.scrapers, vec![ScraperKind::People]);
        assert_eq!(config.jurisdiction().unwrap().name, "Montana");
    }

    #[test]
    fn test_bills_need_session() {
        let err = ScrapeConfig::from_json(
            r#"{"schemaVersion": "1.0", "jurisdiction": "ak", "snapshotDir": "p", "outputDir": "o"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));

        let config = ScrapeConfig::from_json(
            r#"{"schemaVersion": "1.0", "jurisdiction": "ak", "session": "31",
                "chambers": ["lower"], "snapshotDir": "p", "outputDir": "o"}"#,
        )
        .unwrap();
        assert_eq!(config.chambers, vec![Chamber::Lower]);
        assert_eq!(config.scrapers, vec![ScraperKind::Bills]);
    }

    #[test]
    fn test_rejects_unknown_jurisdiction_and_scraper() {
        let unknown = ScrapeConfig::from_json(
            r#"{"schemaVersion": "1.0", "jurisdiction": "zz", "snapshotDir": "p", "outputDir": "o"}"#,
        );
        assert!(matches!(unknown, Err(ScrapeError::Config(_))));

        let unsupported = ScrapeConfig::from_json(
            r#"{"schemaVersion": "1.0", "jurisdiction": "mt", "scrapers": ["bills"],
                "session": "2019", "snapshotDir": "p", "outputDir": "o"}"#,
        )
        .unwrap_err();
        assert!(unsupported.to_string().contains("no bills scraper"));
    }

    #[test]
    fn test_from_file_resolves_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scrape.json");
        std::fs::write(
            &path,
            r#"{"schemaVersion": "1.0", "jurisdiction": "mt", "snapshotDir": "pages", "outputDir": "out"}"#,
        )
        .unwrap();

        let config = ScrapeConfig::from_file(&path).unwrap();
        assert_eq!(config.snapshot_dir, dir.path().join("pages"));
        assert_eq!(config.output_dir, dir.path().join("out"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ScrapeConfig::from_json("{"),
            Err(ScrapeError::Json(_))
        ));
    }
}

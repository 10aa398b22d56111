// ABOUTME: 'openstates scrape' command implementation
// ABOUTME: Runs configured scrapers over saved pages and writes JSONL output

use openstates_lib::{scrape, JsonlSink, Result, ScrapeConfig, SnapshotFetcher};

/// Configuration for scrape command
pub struct ScrapeCommandConfig {
    pub config: std::path::PathBuf,
}

/// Run a scrape and report where records were written
pub fn run(config: &ScrapeCommandConfig) -> Result<()> {
    let scrape_config = ScrapeConfig::from_file(&config.config)?;
    let fetcher = SnapshotFetcher::new(&scrape_config.snapshot_dir);
    let mut sink = JsonlSink::create(&scrape_config.output_dir)?;

    scrape::run(&scrape_config, &fetcher, &mut sink)?;
    let written = sink.finish()?;

    println!(
        "Wrote {written} records to {}",
        scrape_config.output_dir.display()
    );
    Ok(())
}

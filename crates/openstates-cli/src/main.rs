// ABOUTME: openstates CLI entry point
// ABOUTME: Provides subcommands: action, votes, bill, people, orgs, scrape

mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use openstates_lib::Chamber;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// openstates - legislative data scrapers for Alaska and Montana
#[derive(Parser)]
#[command(name = "openstates")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize one bill's Alaska actions, in order (stdin lines if none given)
    Action {
        /// Raw action strings
        text: Vec<String>,
    },
    /// Parse an Alaska journal roll-call page or report into vote events
    Votes {
        /// Vote page html or plain report text
        file: PathBuf,
        /// Url of the vote document
        #[arg(long)]
        url: String,
        /// Bill identifier, e.g. "HB 1"
        #[arg(long)]
        bill: String,
        /// Chamber that voted (upper or lower)
        #[arg(long)]
        chamber: Chamber,
        /// Date of the vote (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Extract an Alaska bill detail page
    Bill {
        /// Saved bill page
        file: PathBuf,
        /// Url the page was fetched from
        #[arg(long)]
        url: String,
        /// Legislative session, e.g. "31"
        #[arg(long)]
        session: String,
        /// Chamber of origin (upper or lower)
        #[arg(long)]
        chamber: Chamber,
    },
    /// Extract Montana legislators from a saved roster page
    People {
        /// Saved roster page
        file: PathBuf,
        /// Only this chamber (both if omitted)
        #[arg(long)]
        chamber: Option<Chamber>,
    },
    /// Print a jurisdiction's legislature and chambers
    Orgs {
        /// Jurisdiction abbreviation (ak or mt)
        jurisdiction: String,
    },
    /// Run the scrapers selected by a config over a snapshot directory
    Scrape {
        /// Path to the scrape config
        #[arg(long)]
        config: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Action { text } => {
            commands::action::run(&commands::action::ActionConfig { actions: text })
        }
        Commands::Votes {
            file,
            url,
            bill,
            chamber,
            date,
        } => commands::votes::run(&commands::votes::VotesConfig {
            file,
            url,
            bill,
            chamber,
            date,
        }),
        Commands::Bill {
            file,
            url,
            session,
            chamber,
        } => commands::bill::run(&commands::bill::BillConfig {
            file,
            url,
            session,
            chamber,
        }),
        Commands::People { file, chamber } => {
            commands::people::run(&commands::people::PeopleConfig { file, chamber })
        }
        Commands::Orgs { jurisdiction } => {
            commands::orgs::run(&commands::orgs::OrgsConfig { jurisdiction })
        }
        Commands::Scrape { config } => {
            commands::scrape::run(&commands::scrape::ScrapeCommandConfig { config })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

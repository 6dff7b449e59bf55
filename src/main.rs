//! Journal-Harvest main entry point
//!
//! This is the command-line interface for the Journal-Harvest article
//! index scraper.

use clap::Parser;
use journal_harvest::config::{
    load_config_with_hash, parse_year_selection, select_journals, validate, Config,
};
use journal_harvest::harvest::{Harvester, HttpFetcher, JournalJob};
use journal_harvest::output::{print_statistics, CsvSink};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Journal-Harvest: bibliographic records from journal article indexes
///
/// Journal-Harvest reads each selected journal's article index, collects
/// the articles of the selected years, follows every article to its detail
/// page for the abstract and publisher link, and writes one CSV file per
/// journal and year.
#[derive(Parser, Debug)]
#[command(name = "journal-harvest")]
#[command(version)]
#[command(about = "Harvest article records from journal indexes", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Journal to harvest: 1-based catalog index, exact name, or "all" (repeatable)
    #[arg(short, long = "journal", value_name = "SELECTOR")]
    journals: Vec<String>,

    /// Years to harvest for every selected journal: "all" or a list like "2023,2022"
    #[arg(short = 'y', long, value_name = "YEARS")]
    years: Option<String>,

    /// Directory for the CSV files (overrides the configuration)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print the numbered journal catalog and exit
    #[arg(long, conflicts_with = "list_years")]
    list_journals: bool,

    /// Print the years each selected journal offers and exit without harvesting
    #[arg(long, conflicts_with = "list_journals")]
    list_years: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if let Some(dir) = &cli.output_dir {
        config.harvest.output_dir = dir.display().to_string();
        validate(&config)?;
    }

    let catalog = config.catalog();

    if cli.list_journals {
        handle_list_journals(&config);
        return Ok(());
    }

    let mut jobs: Vec<JournalJob> = select_journals(&catalog, &cli.journals)?
        .iter()
        .map(JournalJob::from)
        .collect();

    if let Some(years) = &cli.years {
        let selection = parse_year_selection(years)?;
        for job in &mut jobs {
            job.years = selection.clone();
        }
    }

    let fetcher = HttpFetcher::new(
        &config.user_agent,
        Duration::from_secs(config.harvest.request_timeout_secs),
    )?;
    let harvester = Harvester::new(fetcher, &config.harvest);

    if cli.list_years {
        handle_list_years(&harvester, &jobs).await;
    } else {
        handle_harvest(&harvester, &jobs, &config).await;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("journal_harvest=info,warn"),
            1 => EnvFilter::new("journal_harvest=debug,info"),
            2 => EnvFilter::new("journal_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --list-journals: prints the numbered catalog
fn handle_list_journals(config: &Config) {
    println!("Available journals:");
    for (i, entry) in config.catalog().iter().enumerate() {
        println!("{}. {}", i + 1, entry.name);
        println!("   {}", entry.url);
    }
}

/// Handles --list-years: resolves and prints each journal's year index
async fn handle_list_years(harvester: &Harvester<HttpFetcher>, jobs: &[JournalJob]) {
    for job in jobs {
        match harvester.resolve_index(&job.source).await {
            Ok(landing) if landing.index.is_empty() => {
                println!("{}: no years found", job.source.name);
            }
            Ok(landing) => {
                let years: Vec<String> = landing
                    .index
                    .years_desc()
                    .iter()
                    .map(u32::to_string)
                    .collect();
                println!("{}: {}", job.source.name, years.join(" "));
            }
            Err(e) => {
                tracing::error!("Error processing {}: {}", job.source.name, e);
            }
        }
    }
}

/// Handles the main harvest operation
async fn handle_harvest(harvester: &Harvester<HttpFetcher>, jobs: &[JournalJob], config: &Config) {
    tracing::info!(
        "Harvesting {} journals into {}",
        jobs.len(),
        config.harvest.output_dir
    );

    let mut sink = CsvSink::new(&config.harvest.output_dir);
    let stats = harvester.run(jobs, &mut sink).await;

    tracing::info!(
        "Scraping complete. Data saved to individual files in '{}'",
        sink.output_dir().display()
    );

    println!();
    print_statistics(&stats);
}

//! Link-Tally main entry point
//!
//! This is the command-line interface for the Link-Tally internal link counter.

use clap::error::ErrorKind;
use clap::Parser;
use link_tally::config::{load_config_or_default, Config};
use link_tally::crawler::{crawl, StderrReporter};
use link_tally::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Link-Tally: an internal link counter
///
/// Crawls every page reachable from BASE_URL on the same host and prints how
/// many times each page is linked to, least-linked first.
#[derive(Parser, Debug)]
#[command(name = "link-tally")]
#[command(version)]
#[command(about = "Counts internal links across a website", long_about = None)]
struct Cli {
    /// Seed URL; its host defines which links count as internal
    #[arg(value_name = "BASE_URL")]
    base_url: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(cfg) => {
            if let Some(path) = &cli.config {
                tracing::info!("Configuration loaded from: {}", path.display());
            }
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    handle_crawl(&cli.base_url, &config).await
}

/// Parses arguments; usage errors exit with status 1, help and version with 0
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the report on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_tally=info,warn"),
            1 => EnvFilter::new("link_tally=debug,info"),
            2 => EnvFilter::new("link_tally=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the main crawl operation
async fn handle_crawl(base_url: &str, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let links = match crawl(base_url, config, &StderrReporter).await {
        Ok(links) => links,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_report(&links)?;

    Ok(())
}

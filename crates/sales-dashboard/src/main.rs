//! Sales Dashboard
//!
//! Generates a synthetic sales log, applies the selected filters and renders
//! the resulting metrics and tables to the console or to CSV files.

mod config;
mod constants;
mod reports;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sales_analytics::{Category, Product, Region, Session};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, FileConfig, Overrides};

/// Load the config file, falling back to defaults when the default path is absent
fn load_config_file(path: Option<&Path>) -> Result<FileConfig> {
    load_config_from(path, Path::new(constants::CONFIG_FILE))
}

fn load_config_from(path: Option<&Path>, default_path: &Path) -> Result<FileConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!(
                    "Config file '{}' not found.\n\n\
                    Omit --config to use the built-in defaults, or see\n\
                    config.toml.example for the expected format.",
                    path.display()
                );
            }
            FileConfig::load(path)
        }
        None => {
            if default_path.exists() {
                FileConfig::load(default_path)
            } else {
                debug!("no {} found, using built-in defaults", default_path.display());
                Ok(FileConfig::default())
            }
        }
    }
}

/// Initialize tracing from SALES_DASHBOARD_LOG, defaulting to "info" ("debug" when verbose)
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(constants::LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[derive(Parser, Debug)]
#[command(name = "sales-dashboard")]
#[command(about = "Sales dashboard over a synthetic transaction log")]
struct Args {
    /// Config file (default: ./config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for generated CSV reports
    #[arg(short, long, default_value = "./output", global = true)]
    output_dir: PathBuf,

    /// Random seed for the synthetic log
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// First day of the selection (YYYY-MM-DD)
    #[arg(long, global = true)]
    start: Option<NaiveDate>,

    /// Last day of the selection (YYYY-MM-DD)
    #[arg(long, global = true)]
    end: Option<NaiveDate>,

    /// Category to include (repeatable; default: all)
    #[arg(long = "category", global = true)]
    categories: Vec<Category>,

    /// Region to include (repeatable; default: all)
    #[arg(long = "region", global = true)]
    regions: Vec<Region>,

    /// Product to include (repeatable; default: all)
    #[arg(long = "product", global = true)]
    products: Vec<Product>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print key metrics and grouped tables (default)
    Summary {
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Write every table to CSV files in the output directory
    Export,

    /// List the date range and filter values available in the log
    Options,

    /// Print matching transactions, newest first
    Records {
        /// Maximum rows to print
        #[arg(long, default_value_t = constants::DEFAULT_RECORD_LIMIT)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let file_config = load_config_file(args.config.as_deref())?;
    let overrides = Overrides {
        seed: args.seed,
        start_date: args.start,
        end_date: args.end,
        categories: args.categories,
        regions: args.regions,
        products: args.products,
    };
    let config = Config::from_file(&file_config, &overrides)?;

    let mut session = Session::new(config.params);
    let log = session.log();
    info!(
        seed = session.params().seed,
        transactions = log.len(),
        "sales log ready"
    );

    match args.command.unwrap_or(Command::Summary { json: false }) {
        Command::Options => reports::print_options(&log),
        command => {
            let selection = config.filters.resolve(&log)?;
            let view = session.on_selection_change(&selection);
            debug!(cache = %session.cache_stats(), "view computed");

            match command {
                Command::Summary { json: true } => {
                    println!("{}", reports::summary_json(&view, &selection)?);
                }
                Command::Export => {
                    println!("Generating reports...");
                    reports::generate_all_reports(&args.output_dir, &view)?;
                    println!("\nDone! Reports written to: {}", args.output_dir.display());
                }
                Command::Records { limit } => reports::print_records(&view, limit),
                Command::Summary { json: false } | Command::Options => {
                    reports::print_summary(&view, &selection)
                }
            }
        }
    }

    Ok(())
}

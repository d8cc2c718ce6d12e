use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use supercar_analytics::analytics::{DashboardReport, ListingFilter, DEFAULT_BINS};
use supercar_analytics::config::{Settings, SourceSettings};
use supercar_analytics::models::RawSchemaVariant;
use supercar_analytics::pipeline::clean_sources;
use supercar_analytics::scrapers::{scraper_for, CollectOptions};
use supercar_analytics::storage::{CsvStorage, TableStore};
use supercar_analytics::utils::http::create_client;

#[derive(Debug, Parser)]
#[command(name = "supercar-analytics", version, about = "Supercar listing collection and cleaning")]
struct Cli {
    /// Configuration file (defaults to ./supercar.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scrape a configured site into its raw CSV file
    Collect {
        /// Site key from the configuration, e.g. `supercartrader`
        site: String,
    },
    /// Clean raw sources into the canonical table
    Clean {
        /// Raw input as VARIANT=PATH; replaces the configured sources
        #[arg(long = "source", value_parser = parse_source)]
        sources: Vec<SourceSettings>,

        /// Canonical table destination
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print dashboard views of the canonical table as JSON
    Report {
        /// Canonical table to read; defaults to the configured output
        #[arg(long)]
        table: Option<PathBuf>,

        #[arg(long = "brand")]
        brands: Vec<String>,

        #[arg(long = "dealer")]
        dealers: Vec<String>,

        #[arg(long)]
        min_year: Option<i32>,

        #[arg(long)]
        max_year: Option<i32>,

        #[arg(long)]
        min_price: Option<u64>,

        #[arg(long)]
        max_price: Option<u64>,

        /// Histogram buckets
        #[arg(long, default_value_t = DEFAULT_BINS)]
        bins: usize,
    },
}

fn parse_source(arg: &str) -> std::result::Result<SourceSettings, String> {
    let (variant, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected VARIANT=PATH, got {:?}", arg))?;
    let variant = RawSchemaVariant::from_key(variant)
        .ok_or_else(|| format!("unknown variant {:?} (embedded_brand or separate_brand)", variant))?;
    let path = PathBuf::from(path);
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SourceSettings { name, path, variant })
}

fn bounds<T: Copy>(min: Option<T>, max: Option<T>, lowest: T, highest: T) -> Option<(T, T)> {
    match (min, max) {
        (None, None) => None,
        (min, max) => Some((min.unwrap_or(lowest), max.unwrap_or(highest))),
    }
}

const DEFAULT_LOG_DIRECTIVE: &str = "supercar_analytics=info";

/// `RUST_LOG` when it parses, the crate-level info default otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

fn init_logging(json: bool) {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let storage = CsvStorage::new();

    info!("Starting run at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    match cli.command {
        Command::Collect { site } => {
            let site_settings = settings
                .collector
                .sites
                .get(&site)
                .with_context(|| format!("No site {:?} in configuration", site))?;
            let scraper = scraper_for(&site).with_context(|| format!("No scraper for site {:?}", site))?;

            let client = create_client(&settings.collector.user_agent)?;
            let options = CollectOptions::from(&settings.collector);

            info!("Scraping {} ({} queries)", site, site_settings.queries.len());
            let records = scraper.collect(&client, site_settings, &options).await?;
            storage.save_raw(&site_settings.output_path, &records)?;

            info!(
                "Collected {} {} records into {}",
                records.len(),
                scraper.variant(),
                site_settings.output_path.display()
            );
        }
        Command::Clean { sources, output } => {
            let sources = if sources.is_empty() { settings.sources.clone() } else { sources };
            let output = output.unwrap_or_else(|| settings.output_path.clone());
            let vocabulary = settings.vocabulary();

            clean_sources(&storage, &sources, &vocabulary, &output)?;
        }
        Command::Report {
            table,
            brands,
            dealers,
            min_year,
            max_year,
            min_price,
            max_price,
            bins,
        } => {
            let path = table.unwrap_or_else(|| settings.output_path.clone());
            let table = storage.load_table_or_empty(&path)?;

            let filter = ListingFilter {
                brands,
                dealers,
                year_range: bounds(min_year, max_year, i32::MIN, i32::MAX),
                price_range: bounds(min_price, max_price, u64::MIN, u64::MAX),
            };

            let report = DashboardReport::build(&table, &filter, bins);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

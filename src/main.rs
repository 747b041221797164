//! Regional Purchasing Power (RPP)
//!
//! Builds the province purchasing power dataset consumed by the map front end.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use rpp::build_info;
use rpp::config::IndexConfig;
use rpp::index::{BasketMode, BuildOptions, IndexBuilder};
use rpp::report;
use rpp::store;

const DEFAULT_LISTINGS_PATH: &str = "data/raw_supermarket_data.json";
const DEFAULT_OUTPUT_PATH: &str = "public/data/rpp_final.json";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BasketModeArg {
    Estimates,
    Tiers,
}

impl From<BasketModeArg> for BasketMode {
    fn from(value: BasketModeArg) -> Self {
        match value {
            BasketModeArg::Estimates => BasketMode::Estimates,
            BasketModeArg::Tiers => BasketMode::Tiers,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "rpp",
    disable_help_subcommand = true,
    about = "Build the province purchasing power index",
    long_about = "Normalize captured supermarket listings to a per-jin price, price the survival basket per province, and rank provinces by hourly wage per basket.",
    after_help = "Paths are resolved in order by explicit arg, environment variables, then project defaults."
)]
struct Cli {
    #[arg(
        long,
        value_name = "PATH",
        env = "RPP_LISTINGS_PATH",
        default_value = DEFAULT_LISTINGS_PATH,
        help = "Captured listings JSON; provinces fall back to estimates when missing"
    )]
    listings: PathBuf,
    #[arg(
        long = "no-listings",
        help = "Ignore captured listings and use estimates for every province"
    )]
    no_listings: bool,
    #[arg(
        long,
        value_name = "PATH",
        env = "RPP_OUTPUT_PATH",
        default_value = DEFAULT_OUTPUT_PATH,
        help = "Where to write the ranked dataset"
    )]
    output: PathBuf,
    #[arg(
        long,
        value_name = "PATH",
        env = "RPP_CONFIG_PATH",
        help = "Optional JSON file overriding the built-in tables"
    )]
    config: Option<PathBuf>,
    #[arg(
        long = "basket-mode",
        value_enum,
        default_value = "estimates",
        help = "Basket source for provinces without listings"
    )]
    basket_mode: BasketModeArg,
    #[arg(
        long = "real-wage",
        help = "Add real_wage and real_index fields and rank by real_index"
    )]
    real_wage: bool,
    #[arg(long, value_name = "PATH", help = "Also write a PNG ranking chart")]
    chart: Option<PathBuf>,
    #[arg(long = "chart-width", default_value_t = 1200)]
    chart_width: u32,
    #[arg(long = "chart-height", default_value_t = 600)]
    chart_height: u32,
}

fn load_listings(cli: &Cli) -> Result<Option<Vec<rpp::models::Listing>>, store::StoreError> {
    if cli.no_listings {
        tracing::info!("Listings disabled, using estimates for all provinces");
        return Ok(None);
    }
    if !cli.listings.exists() {
        tracing::warn!(
            "{} not found. Using estimated data for all provinces.",
            cli.listings.display()
        );
        return Ok(None);
    }
    store::load_listings(&cli.listings).map(Some)
}

fn write_chart(records: &[rpp::models::IndexRecord], path: &Path, width: u32, height: u32) {
    let result = report::render_ranking_chart(records, width, height)
        .and_then(|png| store::write_bytes(path, &png).map_err(|e| e.to_string()));
    match result {
        Ok(()) => tracing::info!("Saved ranking chart to {}", path.display()),
        Err(e) => tracing::warn!("Chart not written: {}", e),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rpp=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    build_info::print_startup_banner("index");

    let config = IndexConfig::load_or_default(cli.config.as_deref())?;
    let listings = load_listings(&cli)?;

    let builder = IndexBuilder::new(
        &config,
        BuildOptions {
            mode: cli.basket_mode.into(),
            real_wage: cli.real_wage,
        },
    );
    let records = builder.build(listings.as_deref());

    store::write_records(&cli.output, &records)?;
    report::log_summary(&records);

    if let Some(path) = &cli.chart {
        write_chart(&records, path, cli.chart_width, cli.chart_height);
    }

    Ok(())
}

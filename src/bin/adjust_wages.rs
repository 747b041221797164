//! Utility to add real wage fields to an existing dataset
//! Usage: cargo run --bin adjust_wages -- [path] [--config config.json]

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use rpp::config::IndexConfig;
use rpp::models::sort_by_ranking;

#[derive(Debug, Parser)]
#[command(
    name = "adjust_wages",
    about = "Add real_wage and real_index to a written dataset and re-rank it"
)]
struct Cli {
    #[arg(
        value_name = "PATH",
        env = "RPP_OUTPUT_PATH",
        default_value = "public/data/rpp_final.json"
    )]
    path: PathBuf,
    #[arg(long, value_name = "PATH", env = "RPP_CONFIG_PATH")]
    config: Option<PathBuf>,
}

/// Info logging for the library and for this binary's own target
fn log_filter(base: EnvFilter) -> Result<EnvFilter, ParseError> {
    Ok(base
        .add_directive("rpp=info".parse()?)
        .add_directive("adjust_wages=info".parse()?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(EnvFilter::from_default_env())?)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    rpp::build_info::print_startup_banner("adjust_wages");
    let config = IndexConfig::load_or_default(cli.config.as_deref())?;

    let records = rpp::store::load_records(&cli.path)?;
    tracing::info!("Loaded {} provinces from {}", records.len(), cli.path.display());

    let mut adjusted: Vec<_> = records
        .into_iter()
        .map(|record| record.with_real_wage(config.real_wage_multiplier))
        .collect();
    sort_by_ranking(&mut adjusted);

    rpp::report::log_summary(&adjusted);
    rpp::store::write_records(&cli.path, &adjusted)?;
    tracing::info!(
        "Added fields real_wage, real_index (multiplier: {})",
        config.real_wage_multiplier
    );

    Ok(())
}

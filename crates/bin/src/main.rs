//! Hearth CLI binary.
//!
//! Runs the full valuation pipeline in one pass: fetch the five input
//! tables, join them, derive the valuation features, back out the intrinsic
//! prices, and publish the history and latest-snapshot tables.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use hearth_data::{DataHost, county, files, series};
use hearth_model::{HousingTable, ValuationConfig, features, valuation};
use hearth_output::{export, snapshot};
use log::info;

#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Intrinsic housing valuation by US county", long_about = None)]
#[command(version)]
struct Cli {
    /// Base location of the input tables: an http(s) URL or a directory
    #[arg(long, default_value = "http://127.0.0.1:8887")]
    data_host: String,

    /// Directory the output tables are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Cross-sectional quantile that defines the base home
    #[arg(long, default_value_t = 0.3)]
    base_quantile: f64,

    /// Minimum rows a date needs to qualify as the snapshot date
    #[arg(long, default_value_t = 1000)]
    coverage_threshold: usize,
}

fn main() {
    pretty_env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let host = DataHost::new(&cli.data_host);
    info!("loading inputs from {:?}", host);

    let prices = county::read_prices(host.fetch(files::PRICE)?.as_bytes(), files::PRICE)?;
    let rents = county::read_rents(host.fetch(files::RENT)?.as_bytes(), files::RENT)?;
    let rates =
        series::read_mortgage_rates(host.fetch(files::MORTGAGE)?.as_bytes(), files::MORTGAGE)?;
    let growth = series::read_gdp_growth(host.fetch(files::GROWTH)?.as_bytes(), files::GROWTH)?;
    let tax = county::read_property_tax(
        host.fetch(files::PROPERTY_TAX)?.as_bytes(),
        files::PROPERTY_TAX,
    )?;

    let config = ValuationConfig::default();
    let mut table = HousingTable::join(prices, &rents, &growth, &rates, &tax, cli.base_quantile);
    features::prepare(&mut table, &config);
    valuation::apply(&mut table, &config);

    let history_path = export::write_history(&cli.output_dir, &table)?;
    println!(
        "Valuation history: {} rows -> {}",
        table.len(),
        history_path.display()
    );

    let (date, snapshot_path) =
        snapshot::write_snapshot(&cli.output_dir, &table, cli.coverage_threshold)?;
    println!("Latest snapshot:   {} -> {}", date, snapshot_path.display());

    Ok(())
}

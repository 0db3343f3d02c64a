//! forecast_upload - forecast every category of a CSV upload
//!
//! Prints one section per parent category and optionally writes
//! `forecast_coicop_<code>.csv` files. A category without a usable model is
//! reported inline; only upload, configuration and horizon problems make the
//! command fail.

use clap::Parser;
use demand_forecast::{
    DataLoader, FileModelRegistry, ForecastConfig, ForecastError, ForecastPipeline,
};
use retail_calendar::category_label;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "forecast_upload", version, about = "Quarterly retail demand forecast per COICOP category")]
struct Args {
    /// CSV upload with ds, coicop_code, volume, price, deflator, unemployment_rate, is_holiday
    #[arg(short, long)]
    input: PathBuf,

    /// Quarters to forecast
    #[arg(long, default_value_t = 8)]
    horizon: usize,

    /// TOML configuration file
    #[arg(short, long, env = "DEMAND_FORECAST_CONFIG")]
    config: Option<PathBuf>,

    /// Directory with fitted model artifacts, overrides the configuration
    #[arg(short, long, env = "DEMAND_FORECAST_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// Write one forecast CSV per successful category into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("Starting {} v{}", demand_forecast::NAME, demand_forecast::VERSION);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ForecastError> {
    let mut config = match &args.config {
        Some(path) => ForecastConfig::from_toml_file(path)?,
        None => ForecastConfig::default(),
    };
    if let Some(dir) = args.model_dir {
        config = config.with_model_dir(dir);
    }

    let registry = FileModelRegistry::from_config(&config);
    match registry.available_codes() {
        Ok(codes) => info!(dir = %registry.model_dir().display(), ?codes, "models available"),
        Err(e) => info!(dir = %registry.model_dir().display(), "cannot list models: {}", e),
    }

    let table = DataLoader::from_csv(&args.input, &config.columns)?;
    let pipeline = ForecastPipeline::new(config, registry)?;
    let report = pipeline.run(&table, args.horizon)?;

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    for (code, outcome) in report.outcomes() {
        println!("COICOP {} - {}", code, category_label(code).unwrap_or_default());
        match outcome {
            Ok(forecast) => {
                for (quarter, volume) in forecast.series() {
                    println!("  {}  {:.2}", quarter, volume);
                }
                if let Some(dir) = &args.output_dir {
                    let path = dir.join(forecast.export_file_name());
                    forecast.write_csv(BufWriter::new(File::create(&path)?))?;
                    info!(path = %path.display(), "forecast written");
                }
            }
            Err(e) => println!("  error: {}", e),
        }
    }

    println!(
        "{} of {} categories forecast over {} quarters",
        report.successes().len(),
        report.outcomes().len(),
        report.horizon()
    );

    Ok(())
}

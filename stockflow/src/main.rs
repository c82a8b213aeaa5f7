//! # stockflow
//!
//! Command-line demand forecasting: write a template, forecast an uploaded
//! table with SMA, WMA or exponential smoothing, and export the results.

use clap::{Args, Parser, Subcommand};
use demand_forecast::export::{self, RESULTS_SHEET, TEMPLATE_SHEET};
use demand_forecast::{
    forecast_table, DataLoader, DemandTable, ForecastConfig, ForecastError, Method,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "stockflow", version, about = "StockFlow: Demand Forecasting")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write an example demand file (Month, Demand)
    Template {
        /// Output file (.xlsx or .csv)
        #[arg(short, long, default_value = "template_demand.xlsx")]
        output: PathBuf,
    },
    /// Forecast the Demand column of a file
    Forecast(ForecastArgs),
}

#[derive(Debug, Args)]
struct ForecastArgs {
    /// Input file with a `Demand` column (.xlsx or .csv)
    #[arg(short, long)]
    input: PathBuf,

    /// JSON file with forecast settings; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Forecasting method: sma, wma or exp
    #[arg(short, long)]
    method: Option<Method>,

    /// Number of periods for SMA (2-10)
    #[arg(long)]
    window: Option<usize>,

    /// WMA weights for t-1, t-2, t-3, most recent first
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    weights: Option<Vec<f64>>,

    /// Smoothing constant for exponential smoothing (0-1)
    #[arg(long, allow_negative_numbers = true)]
    alpha: Option<f64>,

    /// Initial forecast (F1); defaults to the first demand value
    #[arg(long, allow_negative_numbers = true)]
    initial_forecast: Option<f64>,

    /// Export the results table (.xlsx or .csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl ForecastArgs {
    /// Settings from the config file (or defaults) with flags applied on top
    fn settings(&self) -> demand_forecast::Result<ForecastConfig> {
        let mut config = match &self.config {
            Some(path) => ForecastConfig::from_json_file(path)?,
            None => ForecastConfig::default(),
        };

        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(weights) = &self.weights {
            config.weights = match weights.as_slice() {
                &[w1, w2, w3] => [w1, w2, w3],
                _ => {
                    return Err(ForecastError::ConfigError(format!(
                        "Expected 3 weights, got {}",
                        weights.len()
                    )))
                }
            };
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if self.initial_forecast.is_some() {
            config.initial_forecast = self.initial_forecast;
        }
        Ok(config)
    }
}

fn write_template(output: &Path) -> demand_forecast::Result<()> {
    let template = DemandTable::template()?;
    export::write_path(&template, output, TEMPLATE_SHEET)?;
    println!("Template written to {}", output.display());
    Ok(())
}

fn run_forecast(args: &ForecastArgs) -> demand_forecast::Result<()> {
    let config = args.settings()?;
    tracing::debug!(?config, "forecast settings");
    let mut table = DataLoader::from_path(&args.input)?;
    let report = forecast_table(&mut table, &config)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("Results & Forecasts ({})", report.method);
        println!("{}", table.dataframe());
        println!("{}", report.headline());
        if let Some(accuracy) = &report.accuracy {
            println!(
                "In-sample fit over {} periods: MAE {:.2}, RMSE {:.2}",
                accuracy.periods, accuracy.mae, accuracy.rmse
            );
        }
    }

    if let Some(output) = &args.output {
        export::write_path(&table, output, RESULTS_SHEET)?;
        if !args.json {
            println!("Results written to {}", output.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockflow=info,demand_forecast=info".into()),
        )
        .init();

    let cli = Cli::parse();
    ExitCode::from(exit_status(run(&cli)))
}

fn run(cli: &Cli) -> demand_forecast::Result<()> {
    match &cli.command {
        Command::Template { output } => write_template(output),
        Command::Forecast(args) => run_forecast(args),
    }
}

/// Process exit status for a command result; errors are reported on stderr
fn exit_status(result: demand_forecast::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {}", err);
            1
        }
    }
}

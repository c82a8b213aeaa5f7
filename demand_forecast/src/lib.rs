//! # Demand Forecast
//!
//! Classical demand forecasting transforms for inventory planning.
//!
//! ## Features
//!
//! - Simple Moving Average, Weighted Moving Average (three periods) and
//!   Exponential Smoothing with user-supplied parameters
//! - An annotated column aligned with the history, `None` where a method
//!   lacks enough trailing periods
//! - A single next-period forecast
//! - CSV and xlsx input/output with the demand held in a `Demand` column
//!
//! ## Quick Start
//!
//! ```rust
//! use demand_forecast::{DemandSeries, ForecastEngine, MethodParameters};
//!
//! let series = DemandSeries::new(vec![120.0, 130.0, 110.0, 140.0, 160.0]);
//! let params = MethodParameters::Sma { window: 3 };
//!
//! let outcome = ForecastEngine::new().run(&series, &params)?;
//! assert_eq!(outcome.annotated.get(3), Some(120.0));
//! assert_eq!(format!("{:.2}", outcome.next_period), "136.67");
//! # Ok::<(), demand_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod report;
pub mod series;

// Re-export commonly used types
pub use crate::config::{ForecastConfig, Method};
pub use crate::data::{DataLoader, DemandTable};
pub use crate::error::{ForecastError, Result};
pub use crate::models::exponential_smoothing::compute_exponential_smoothing;
pub use crate::models::moving_average::compute_sma;
pub use crate::models::weighted_moving_average::compute_wma;
pub use crate::models::{ForecastEngine, ForecastModel, ForecastOutcome, MethodParameters};
pub use crate::report::ForecastReport;
pub use crate::series::{AnnotatedSeries, DemandSeries};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Forecast the table's demand with `config` and append the annotated column.
///
/// The table is left untouched when the forecast fails.
pub fn forecast_table(table: &mut DemandTable, config: &ForecastConfig) -> Result<ForecastReport> {
    let series = table.demand_series()?;
    let params = config.resolve(&series)?;
    let outcome = ForecastEngine::new().run(&series, &params)?;

    table.with_forecast_column(&params.column_name(), &outcome.annotated)?;
    ForecastReport::new(&series, &params, &outcome)
}

//! # StockFlow
//!
//! Workspace facade for the StockFlow demand forecasting crates.
//!
//! ## Example
//!
//! ```
//! use stockflow_workspace::demand_forecast::{compute_wma, ForecastError};
//!
//! let outcome = compute_wma(&[120.0, 130.0, 110.0, 140.0, 160.0], &[3.0, 2.0, 1.0])?;
//! assert_eq!(outcome.next_period, 145.0);
//! # Ok::<(), ForecastError>(())
//! ```

pub use demand_forecast;

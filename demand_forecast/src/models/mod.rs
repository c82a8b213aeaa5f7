//! Forecasting models for demand series

use crate::error::{ForecastError, Result};
use crate::series::{AnnotatedSeries, DemandSeries};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Annotated history plus the forecast for the period after the last observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastOutcome {
    /// Fitted value for every observed period
    pub annotated: AnnotatedSeries,
    /// Forecast for period `n`, one past the last observed period
    pub next_period: f64,
}

impl ForecastOutcome {
    pub fn new(annotated: AnnotatedSeries, next_period: f64) -> Self {
        Self {
            annotated,
            next_period,
        }
    }
}

/// Common interface for the forecasting methods
pub trait ForecastModel: Debug {
    /// Human readable name of the model
    fn name(&self) -> &str;

    /// Header of the column added to the results table
    fn column_name(&self) -> String;

    /// Annotate every period of `series` and forecast the next one
    fn forecast(&self, series: &DemandSeries) -> Result<ForecastOutcome>;
}

/// Method selection together with its user-supplied parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum MethodParameters {
    /// Simple moving average over the trailing `window` periods
    Sma { window: usize },
    /// Weighted moving average over three periods, weights most-recent-first
    Wma { weights: [f64; 3] },
    /// Exponential smoothing seeded with `initial_forecast`
    ExponentialSmoothing { alpha: f64, initial_forecast: f64 },
}

impl MethodParameters {
    /// Check the parameters without looking at any data
    pub fn validate(&self) -> Result<()> {
        match *self {
            MethodParameters::Sma { window } => moving_average::validate_window(window),
            MethodParameters::Wma { weights } => {
                weighted_moving_average::validate_weights(&weights)
            }
            MethodParameters::ExponentialSmoothing {
                alpha,
                initial_forecast,
            } => exponential_smoothing::validate_parameters(alpha, initial_forecast),
        }
    }

    /// Header of the column holding the annotated series
    pub fn column_name(&self) -> String {
        match *self {
            MethodParameters::Sma { window } => format!("SMA_{}", window),
            MethodParameters::Wma { .. } => {
                format!("WMA_{}", weighted_moving_average::WMA_WINDOW)
            }
            // Debug formatting keeps the trailing ".0" on whole numbers
            MethodParameters::ExponentialSmoothing { alpha, .. } => {
                format!("Exp_Smoothing_{:?}", alpha)
            }
        }
    }

    /// Display name of the selected method
    pub fn label(&self) -> &'static str {
        match self {
            MethodParameters::Sma { .. } => "Simple Moving Average (SMA)",
            MethodParameters::Wma { .. } => "Weighted Moving Average (WMA)",
            MethodParameters::ExponentialSmoothing { .. } => "Exponential Smoothing",
        }
    }

    /// Build the model object for these parameters
    pub fn into_model(self) -> Result<Box<dyn ForecastModel>> {
        Ok(match self {
            MethodParameters::Sma { window } => {
                Box::new(moving_average::SimpleMovingAverage::new(window)?)
            }
            MethodParameters::Wma { weights } => {
                Box::new(weighted_moving_average::WeightedMovingAverage::new(weights)?)
            }
            MethodParameters::ExponentialSmoothing {
                alpha,
                initial_forecast,
            } => Box::new(exponential_smoothing::ExponentialSmoothing::new(
                alpha,
                initial_forecast,
            )?),
        })
    }
}

/// Stateless dispatcher from method parameters to the matching computation
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastEngine;

impl ForecastEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run the selected method over `series`
    pub fn run(&self, series: &DemandSeries, params: &MethodParameters) -> Result<ForecastOutcome> {
        tracing::debug!(
            method = params.label(),
            periods = series.len(),
            "computing forecast"
        );

        let values = series.as_slice();
        match *params {
            MethodParameters::Sma { window } => moving_average::compute_sma(values, window),
            MethodParameters::Wma { weights } => {
                weighted_moving_average::compute_wma(values, &weights)
            }
            MethodParameters::ExponentialSmoothing {
                alpha,
                initial_forecast,
            } => exponential_smoothing::compute_exponential_smoothing(
                values,
                alpha,
                initial_forecast,
            ),
        }
    }
}

/// Error for a series shorter than `needed` observations
pub(crate) fn insufficient(method: &str, needed: usize, got: usize) -> ForecastError {
    ForecastError::InsufficientData(format!(
        "Not enough data for {}. Need at least {} observations, have {}.",
        method, needed, got
    ))
}

pub mod exponential_smoothing;
pub mod moving_average;
pub mod weighted_moving_average;

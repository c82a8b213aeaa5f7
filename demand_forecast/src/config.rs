//! User-facing forecast configuration
//!
//! Holds the values a user picks (method, window, weights, alpha, seed) with
//! the defaults and ranges offered on the input form, and turns them into
//! engine [`MethodParameters`].

use crate::error::{ForecastError, Result};
use crate::models::MethodParameters;
use crate::series::DemandSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Window choices offered for the simple moving average
pub const WINDOW_RANGE: std::ops::RangeInclusive<usize> = 2..=10;

pub const DEFAULT_WINDOW: usize = 3;
pub const DEFAULT_WEIGHTS: [f64; 3] = [3.0, 2.0, 1.0];
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Forecasting method selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    #[default]
    Sma,
    Wma,
    #[serde(alias = "exp")]
    ExponentialSmoothing,
}

impl FromStr for Method {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sma" => Ok(Method::Sma),
            "wma" => Ok(Method::Wma),
            "exp" | "es" | "exponential_smoothing" => Ok(Method::ExponentialSmoothing),
            other => Err(ForecastError::ConfigError(format!(
                "Unknown forecasting method: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Sma => "sma",
            Method::Wma => "wma",
            Method::ExponentialSmoothing => "exp",
        };
        f.write_str(name)
    }
}

/// Forecast settings as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub method: Method,
    /// Periods averaged by the simple moving average
    pub window: usize,
    /// Weights for t-1, t-2, t-3
    pub weights: [f64; 3],
    /// Smoothing constant
    pub alpha: f64,
    /// Seed forecast for the first period; the first demand value when unset
    pub initial_forecast: Option<f64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            window: DEFAULT_WINDOW,
            weights: DEFAULT_WEIGHTS,
            alpha: DEFAULT_ALPHA,
            initial_forecast: None,
        }
    }
}

impl ForecastConfig {
    /// Default settings for `method`
    pub fn for_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Load settings from a JSON file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ForecastConfig = serde_json::from_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), method = %config.method, "loaded forecast config");
        Ok(config)
    }

    /// Check the ranges offered on the input form
    pub fn validate(&self) -> Result<()> {
        match self.method {
            Method::Sma if !WINDOW_RANGE.contains(&self.window) => {
                Err(ForecastError::ConfigError(format!(
                    "Window must be between {} and {}, got {}",
                    WINDOW_RANGE.start(),
                    WINDOW_RANGE.end(),
                    self.window
                )))
            }
            Method::ExponentialSmoothing if !(0.0..=1.0).contains(&self.alpha) => Err(
                ForecastError::ConfigError(format!("Alpha must be between 0 and 1, got {}", self.alpha)),
            ),
            _ => Ok(()),
        }
    }

    /// Turn the settings into engine parameters for `series`
    pub fn resolve(&self, series: &DemandSeries) -> Result<MethodParameters> {
        self.validate()?;

        let params = match self.method {
            Method::Sma => MethodParameters::Sma {
                window: self.window,
            },
            Method::Wma => MethodParameters::Wma {
                weights: self.weights,
            },
            Method::ExponentialSmoothing => {
                let initial_forecast = match (self.initial_forecast, series.first()) {
                    (Some(seed), _) => seed,
                    (None, Some(first)) => {
                        tracing::debug!(seed = first, "initial forecast defaults to first demand value");
                        first
                    }
                    (None, None) => {
                        tracing::warn!("empty demand series and no initial forecast, seeding with 0");
                        0.0
                    }
                };
                MethodParameters::ExponentialSmoothing {
                    alpha: self.alpha,
                    initial_forecast,
                }
            }
        };

        params.validate()?;
        Ok(params)
    }
}

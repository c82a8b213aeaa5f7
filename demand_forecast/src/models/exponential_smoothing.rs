//! Exponential smoothing seeded with a user-supplied initial forecast

use crate::error::{ForecastError, Result};
use crate::models::{insufficient, ForecastModel, ForecastOutcome};
use crate::series::{AnnotatedSeries, DemandSeries};

/// Simple exponential smoothing model
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    /// Name of the model
    name: String,
    /// Smoothing parameter
    alpha: f64,
    /// Forecast for the first period
    initial_forecast: f64,
}

impl ExponentialSmoothing {
    /// Create a new exponential smoothing model
    pub fn new(alpha: f64, initial_forecast: f64) -> Result<Self> {
        validate_parameters(alpha, initial_forecast)?;

        Ok(Self {
            name: format!("Exponential Smoothing (alpha={})", alpha),
            alpha,
            initial_forecast,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn initial_forecast(&self) -> f64 {
        self.initial_forecast
    }
}

impl ForecastModel for ExponentialSmoothing {
    fn name(&self) -> &str {
        &self.name
    }

    fn column_name(&self) -> String {
        format!("Exp_Smoothing_{:?}", self.alpha)
    }

    fn forecast(&self, series: &DemandSeries) -> Result<ForecastOutcome> {
        compute_exponential_smoothing(series.as_slice(), self.alpha, self.initial_forecast)
    }
}

pub(crate) fn validate_parameters(alpha: f64, initial_forecast: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ForecastError::InvalidParameter(format!(
            "Alpha must be between 0 and 1, got {}",
            alpha
        )));
    }

    if !initial_forecast.is_finite() {
        return Err(ForecastError::InvalidParameter(
            "Initial forecast must be a finite number".to_string(),
        ));
    }

    Ok(())
}

/// One smoothing step: move the prior forecast toward the prior actual
fn smooth(forecast: f64, actual: f64, alpha: f64) -> f64 {
    forecast + alpha * (actual - forecast)
}

/// Build the forecast sequence `F[0] = initial_forecast`,
/// `F[i] = F[i-1] + alpha * (series[i-1] - F[i-1])` and take one more step
/// from the last observation for the next period.
pub fn compute_exponential_smoothing(
    series: &[f64],
    alpha: f64,
    initial_forecast: f64,
) -> Result<ForecastOutcome> {
    validate_parameters(alpha, initial_forecast)?;
    let Some(&last) = series.last() else {
        return Err(insufficient("exponential smoothing", 1, 0));
    };

    let mut forecasts = Vec::with_capacity(series.len());
    let mut current = initial_forecast;
    forecasts.push(Some(current));
    for &actual in &series[..series.len() - 1] {
        current = smooth(current, actual, alpha);
        forecasts.push(Some(current));
    }

    let next_period = smooth(current, last, alpha);

    Ok(ForecastOutcome::new(AnnotatedSeries::new(forecasts), next_period))
}

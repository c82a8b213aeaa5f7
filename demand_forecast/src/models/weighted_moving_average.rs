//! Weighted moving average over a fixed three-period window

use crate::error::{ForecastError, Result};
use crate::models::{insufficient, ForecastModel, ForecastOutcome};
use crate::series::{AnnotatedSeries, DemandSeries};

/// Number of trailing periods combined by the weighted average
pub const WMA_WINDOW: usize = 3;

/// Weighted Moving Average model
///
/// Weights are ordered most-recent-first: `[w(t-1), w(t-2), w(t-3)]`.
#[derive(Debug, Clone)]
pub struct WeightedMovingAverage {
    /// Name of the model
    name: String,
    /// Weights for t-1, t-2 and t-3
    weights: [f64; WMA_WINDOW],
}

impl WeightedMovingAverage {
    /// Create a new Weighted Moving Average model
    pub fn new(weights: [f64; WMA_WINDOW]) -> Result<Self> {
        validate_weights(&weights)?;

        Ok(Self {
            name: format!(
                "Weighted Moving Average (weights={}/{}/{})",
                weights[0], weights[1], weights[2]
            ),
            weights,
        })
    }

    pub fn weights(&self) -> &[f64; WMA_WINDOW] {
        &self.weights
    }
}

impl ForecastModel for WeightedMovingAverage {
    fn name(&self) -> &str {
        &self.name
    }

    fn column_name(&self) -> String {
        format!("WMA_{}", WMA_WINDOW)
    }

    fn forecast(&self, series: &DemandSeries) -> Result<ForecastOutcome> {
        compute_wma(series.as_slice(), &self.weights)
    }
}

pub(crate) fn validate_weights(weights: &[f64; WMA_WINDOW]) -> Result<()> {
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "WMA weights must be finite and non-negative, got {}",
            w
        )));
    }

    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        return Err(ForecastError::InvalidParameter(
            "WMA weights must not sum to zero".to_string(),
        ));
    }
    if !total.is_finite() {
        return Err(ForecastError::InvalidParameter(
            "WMA weights sum overflows".to_string(),
        ));
    }

    Ok(())
}

/// Weighted combination of the three observations preceding `end`
fn weighted_average(series: &[f64], end: usize, weights: &[f64; WMA_WINDOW], total: f64) -> f64 {
    let combined: f64 = weights
        .iter()
        .enumerate()
        .map(|(lag, w)| series[end - 1 - lag] * w)
        .sum();
    combined / total
}

/// Annotate each period from period 3 on with the normalized weighted average
/// of the three periods before it, and forecast the next period from the
/// last three observations.
pub fn compute_wma(series: &[f64], weights: &[f64; WMA_WINDOW]) -> Result<ForecastOutcome> {
    validate_weights(weights)?;
    if series.len() < WMA_WINDOW {
        return Err(insufficient("WMA", WMA_WINDOW, series.len()));
    }

    let total: f64 = weights.iter().sum();
    let annotated = (0..series.len())
        .map(|i| (i >= WMA_WINDOW).then(|| weighted_average(series, i, weights, total)))
        .collect::<Vec<_>>();

    let next_period = weighted_average(series, series.len(), weights, total);

    Ok(ForecastOutcome::new(AnnotatedSeries::new(annotated), next_period))
}

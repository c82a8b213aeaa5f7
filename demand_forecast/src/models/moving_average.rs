//! Simple moving average forecasting

use crate::error::{ForecastError, Result};
use crate::models::{insufficient, ForecastModel, ForecastOutcome};
use crate::series::{AnnotatedSeries, DemandSeries};

/// Smallest window the moving average accepts; a window of one is a naive
/// carry-forward and is not offered
pub const MIN_WINDOW: usize = 2;

/// Simple Moving Average model
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
}

impl SimpleMovingAverage {
    /// Create a new Simple Moving Average model
    pub fn new(window: usize) -> Result<Self> {
        validate_window(window)?;

        Ok(Self {
            name: format!("Simple Moving Average (window={})", window),
            window,
        })
    }

    /// Get the window size
    pub fn window(&self) -> usize {
        self.window
    }
}

impl ForecastModel for SimpleMovingAverage {
    fn name(&self) -> &str {
        &self.name
    }

    fn column_name(&self) -> String {
        format!("SMA_{}", self.window)
    }

    fn forecast(&self, series: &DemandSeries) -> Result<ForecastOutcome> {
        compute_sma(series.as_slice(), self.window)
    }
}

pub(crate) fn validate_window(window: usize) -> Result<()> {
    if window < MIN_WINDOW {
        return Err(ForecastError::InvalidParameter(format!(
            "SMA window must be at least {}, got {}",
            MIN_WINDOW, window
        )));
    }
    Ok(())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Annotate each period with the mean of the `window` observations before it
/// and forecast the next period as the mean of the last `window` observations.
///
/// Period `i` never sees its own observation, so periods `0..window` are
/// undefined.
pub fn compute_sma(series: &[f64], window: usize) -> Result<ForecastOutcome> {
    validate_window(window)?;
    if series.len() < window {
        return Err(insufficient("SMA", window, series.len()));
    }

    let annotated = (0..series.len())
        .map(|i| (i >= window).then(|| mean(&series[i - window..i])))
        .collect::<Vec<_>>();

    let next_period = mean(&series[series.len() - window..]);

    Ok(ForecastOutcome::new(AnnotatedSeries::new(annotated), next_period))
}

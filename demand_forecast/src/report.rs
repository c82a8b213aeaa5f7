//! Presentation of a forecast run: headline metric and JSON summary

use crate::error::Result;
use crate::metrics::{fit_accuracy, FitAccuracy};
use crate::models::{ForecastOutcome, MethodParameters};
use crate::series::{AnnotatedSeries, DemandSeries};
use serde::Serialize;

/// Label shown next to the next-period forecast
pub const FORECAST_LABEL: &str = "Forecast for Next Period";

/// Render a forecast value with two decimals
pub fn format_forecast(value: f64) -> String {
    format!("{:.2}", value)
}

/// Summary of one forecast run
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    /// Display name of the method
    pub method: String,
    /// Parameters the run used
    pub parameters: MethodParameters,
    /// Header of the annotated column
    pub column: String,
    /// 1-based number of the forecast period
    pub next_period_number: usize,
    pub next_period_forecast: f64,
    pub annotated: AnnotatedSeries,
    pub accuracy: Option<FitAccuracy>,
}

impl ForecastReport {
    pub fn new(
        series: &DemandSeries,
        parameters: &MethodParameters,
        outcome: &ForecastOutcome,
    ) -> Result<Self> {
        let accuracy = fit_accuracy(series, &outcome.annotated)?;

        Ok(Self {
            method: parameters.label().to_string(),
            parameters: parameters.clone(),
            column: parameters.column_name(),
            next_period_number: series.len() + 1,
            next_period_forecast: outcome.next_period,
            annotated: outcome.annotated.clone(),
            accuracy,
        })
    }

    /// `Forecast for Next Period (6): 136.67`
    pub fn headline(&self) -> String {
        format!(
            "{} ({}): {}",
            FORECAST_LABEL,
            self.next_period_number,
            format_forecast(self.next_period_forecast)
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

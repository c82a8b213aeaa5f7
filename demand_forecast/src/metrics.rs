//! Metrics for evaluating how closely an annotated series tracks actual demand

use crate::error::{ForecastError, Result};
use crate::series::{AnnotatedSeries, DemandSeries};
use serde::Serialize;

/// In-sample accuracy over the periods that carry a fitted value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitAccuracy {
    /// Number of periods compared
    pub periods: usize,
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error (percent), skipping zero actuals
    pub mape: Option<f64>,
}

/// Compare each defined annotation with the actual demand of its period.
///
/// Returns `Ok(None)` when no period carries a value.
pub fn fit_accuracy(
    series: &DemandSeries,
    annotated: &AnnotatedSeries,
) -> Result<Option<FitAccuracy>> {
    if series.len() != annotated.len() {
        return Err(ForecastError::DataError(format!(
            "Annotated length ({}) doesn't match series length ({})",
            annotated.len(),
            series.len()
        )));
    }

    let actual = series.as_slice();
    let errors: Vec<(f64, f64)> = annotated
        .iter_defined()
        .map(|(i, fitted)| (actual[i], actual[i] - fitted))
        .collect();

    if errors.is_empty() {
        return Ok(None);
    }

    let n = errors.len() as f64;
    let mae = errors.iter().map(|(_, e)| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|(_, e)| e * e).sum::<f64>() / n;

    let percentage: Vec<f64> = errors
        .iter()
        .filter(|(a, _)| *a != 0.0)
        .map(|(a, e)| (e / a).abs())
        .collect();
    let mape = (!percentage.is_empty())
        .then(|| percentage.iter().sum::<f64>() / percentage.len() as f64 * 100.0);

    Ok(Some(FitAccuracy {
        periods: errors.len(),
        mae,
        mse,
        rmse: mse.sqrt(),
        mape,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_regression_metrics() {
        let series = DemandSeries::new(vec![10.0, 20.0, 30.0, 40.0]);
        let annotated = AnnotatedSeries::new(vec![None, Some(18.0), Some(33.0), Some(40.0)]);

        let accuracy = fit_accuracy(&series, &annotated).unwrap().unwrap();
        assert_eq!(accuracy.periods, 3);
        assert_relative_eq!(accuracy.mae, 5.0 / 3.0);
        assert_relative_eq!(accuracy.mse, 13.0 / 3.0);
        assert_relative_eq!(accuracy.rmse, (13.0f64 / 3.0).sqrt());
        // (10% + 10% + 0%) / 3
        assert_relative_eq!(accuracy.mape.unwrap(), 20.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nothing_defined() {
        let series = DemandSeries::new(vec![1.0, 2.0]);
        let annotated = AnnotatedSeries::new(vec![None, None]);
        assert_eq!(fit_accuracy(&series, &annotated).unwrap(), None);
    }

    #[test]
    fn test_zero_actuals_skip_mape() {
        let series = DemandSeries::new(vec![0.0, 0.0]);
        let annotated = AnnotatedSeries::new(vec![Some(1.0), Some(1.0)]);
        let accuracy = fit_accuracy(&series, &annotated).unwrap().unwrap();
        assert_eq!(accuracy.mape, None);
        assert_relative_eq!(accuracy.mae, 1.0);
    }

    #[test]
    fn test_length_mismatch() {
        let series = DemandSeries::new(vec![1.0, 2.0]);
        let annotated = AnnotatedSeries::new(vec![None]);
        assert!(fit_accuracy(&series, &annotated).is_err());
    }
}

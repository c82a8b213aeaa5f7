//! Demand series and the annotated column produced by a forecast

use serde::{Deserialize, Serialize};

/// Chronological sequence of observed demand, index 0 being the oldest period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DemandSeries {
    values: Vec<f64>,
}

impl DemandSeries {
    /// Create a demand series from observations in chronological order
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Observations as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of observed periods
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no observations
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The oldest observation, if any
    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }
}

impl From<Vec<f64>> for DemandSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for DemandSeries {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}

/// One fitted value per input period, aligned index-for-index with the demand
/// series. `None` marks periods without enough trailing history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotatedSeries {
    values: Vec<Option<f64>>,
}

impl AnnotatedSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    /// All annotations, undefined periods included
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Annotation for period `index`; `None` both for undefined periods and
    /// out-of-range indices
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of periods carrying a value
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// `(index, value)` pairs of the periods carrying a value
    pub fn iter_defined(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|value| (i, value)))
    }

    pub fn into_inner(self) -> Vec<Option<f64>> {
        self.values
    }
}

impl From<Vec<Option<f64>>> for AnnotatedSeries {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self::new(values)
    }
}

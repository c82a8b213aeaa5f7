//! Tabular demand data: loading, validation and the annotated results table

use crate::error::{ForecastError, Result};
use crate::series::{AnnotatedSeries, DemandSeries};
use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Column holding the demand observations
pub const DEMAND_COLUMN: &str = "Demand";
/// Optional period column, passed through untouched
pub const MONTH_COLUMN: &str = "Month";

/// Demand data as loaded from a file, including any pass-through columns
#[derive(Debug, Clone)]
pub struct DemandTable {
    df: DataFrame,
}

/// Data loader for demand tables
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load demand data from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<DemandTable> {
        let file = File::open(path.as_ref())?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        tracing::info!(path = %path.as_ref().display(), rows = df.height(), "loaded CSV");
        Ok(DemandTable::new(df))
    }

    /// Load demand data from the first worksheet of a spreadsheet; the first
    /// row holds the column names
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<DemandTable> {
        let mut workbook = open_workbook_auto(path.as_ref())?;
        let range = workbook.worksheet_range_at(0).ok_or_else(|| {
            ForecastError::SpreadsheetError("Workbook contains no worksheets".to_string())
        })??;

        let mut rows = range.rows();
        let header = rows.next().ok_or_else(|| {
            ForecastError::DataError("Worksheet is empty, expected a header row".to_string())
        })?;
        let body: Vec<&[Data]> = rows.collect();

        let columns = header
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let name = match cell {
                    Data::Empty => format!("column_{}", col + 1),
                    Data::String(s) => s.trim().to_string(),
                    other => other.to_string(),
                };
                let cells: Vec<&Data> = body
                    .iter()
                    .map(|row| row.get(col).unwrap_or(&Data::Empty))
                    .collect();
                sheet_column(&name, &cells)
            })
            .collect::<Vec<_>>();

        let df = DataFrame::new(columns)?;
        tracing::info!(path = %path.as_ref().display(), rows = df.height(), "loaded spreadsheet");
        Ok(DemandTable::new(df))
    }

    /// Load demand data, choosing the reader from the file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<DemandTable> {
        match extension(path.as_ref()).as_deref() {
            Some("csv") => Self::from_csv(path),
            Some("xlsx" | "xlsm" | "xls" | "ods") => Self::from_xlsx(path),
            _ => Err(ForecastError::DataError(format!(
                "Unsupported input file: {} (expected .xlsx or .csv)",
                path.as_ref().display()
            ))),
        }
    }

    /// Wrap an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> DemandTable {
        DemandTable::new(df)
    }
}

/// Lower-cased file extension
pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Build a typed column from worksheet cells: whole numbers that fit in i64
/// become Int64, other numbers Float64, anything else text. Empty cells
/// become nulls.
fn sheet_column(name: &str, cells: &[&Data]) -> Series {
    let numbers: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| match cell {
            Data::Empty => Some(None),
            Data::Int(i) => Some(Some(*i as f64)),
            Data::Float(f) => Some(Some(*f)),
            _ => None,
        })
        .collect();

    match numbers {
        Some(values) if values.iter().flatten().all(|v| fits_i64(*v)) => {
            let ints: Vec<Option<i64>> = values.iter().map(|v| v.map(|v| v as i64)).collect();
            Series::new(name, ints)
        }
        Some(values) => Series::new(name, values),
        None => {
            let text: Vec<Option<String>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Empty => None,
                    other => Some(other.to_string()),
                })
                .collect();
            Series::new(name, text)
        }
    }
}

/// Whole number within i64 range; 2^63 itself is excluded since it is not
/// representable as i64
fn fits_i64(v: f64) -> bool {
    v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64
}

impl DemandTable {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Sample table offered to users as a starting point
    pub fn template() -> Result<Self> {
        let df = DataFrame::new(vec![
            Series::new(MONTH_COLUMN, vec![1i64, 2, 3, 4, 5]),
            Series::new(DEMAND_COLUMN, vec![120i64, 130, 110, 140, 160]),
        ])?;
        Ok(Self::new(df))
    }

    /// Underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of rows (periods)
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_names().contains(&name)
    }

    /// Extract the demand observations.
    ///
    /// Fails with `MissingColumn` when there is no `Demand` column and with
    /// `DataError` when a demand cell is empty or not a finite number.
    pub fn demand_series(&self) -> Result<DemandSeries> {
        let column = self
            .df
            .column(DEMAND_COLUMN)
            .map_err(|_| ForecastError::MissingColumn(DEMAND_COLUMN.to_string()))?;
        let column = column.cast(&DataType::Float64)?;

        let mut values = Vec::with_capacity(column.len());
        for (row, value) in column.f64()?.into_iter().enumerate() {
            match value {
                Some(v) if v.is_finite() => values.push(v),
                _ => {
                    return Err(ForecastError::DataError(format!(
                        "Demand value in row {} is missing or not numeric",
                        row + 1
                    )))
                }
            }
        }

        Ok(DemandSeries::new(values))
    }

    /// Append `annotated` as a new column named `name`, undefined periods as
    /// nulls. A column with the same name is replaced.
    pub fn with_forecast_column(&mut self, name: &str, annotated: &AnnotatedSeries) -> Result<()> {
        if annotated.len() != self.df.height() {
            return Err(ForecastError::DataError(format!(
                "Annotated length ({}) doesn't match table rows ({})",
                annotated.len(),
                self.df.height()
            )));
        }

        self.df
            .with_column(Series::new(name, annotated.values().to_vec()))?;
        Ok(())
    }

    /// Values of a Float64-castable column, nulls kept
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self
            .df
            .column(name)
            .map_err(|_| ForecastError::MissingColumn(name.to_string()))?
            .cast(&DataType::Float64)?;
        let values = column.f64()?.into_iter().collect();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_series() {
        let table = DemandTable::template().unwrap();
        assert_eq!(table.height(), 5);
        assert!(table.has_column(MONTH_COLUMN));
        assert_eq!(
            table.demand_series().unwrap().as_slice(),
            &[120.0, 130.0, 110.0, 140.0, 160.0]
        );
    }

    #[test]
    fn test_missing_demand_column() {
        let df = DataFrame::new(vec![Series::new("Sales", vec![1.0, 2.0])]).unwrap();
        let err = DataLoader::from_dataframe(df).demand_series().unwrap_err();
        assert!(matches!(err, ForecastError::MissingColumn(ref c) if c == "Demand"));
    }

    #[test]
    fn test_null_demand_rejected() {
        let df = DataFrame::new(vec![Series::new(
            DEMAND_COLUMN,
            vec![Some(1.0), None, Some(3.0)],
        )])
        .unwrap();
        let err = DemandTable::new(df).demand_series().unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_forecast_column_alignment() {
        let mut table = DemandTable::template().unwrap();
        let annotated = AnnotatedSeries::new(vec![None, None, Some(1.0), Some(2.0), Some(3.0)]);
        table.with_forecast_column("SMA_2", &annotated).unwrap();

        assert_eq!(
            table.numeric_column("SMA_2").unwrap(),
            vec![None, None, Some(1.0), Some(2.0), Some(3.0)]
        );

        let short = AnnotatedSeries::new(vec![None]);
        assert!(table.with_forecast_column("SMA_2", &short).is_err());
    }

    #[test]
    fn test_whole_number_range() {
        assert!(fits_i64(120.0));
        assert!(fits_i64(-3.0));
        assert!(!fits_i64(0.5));
        assert!(!fits_i64(1e19));
        assert!(!fits_i64(i64::MAX as f64));
        assert!(!fits_i64(f64::NAN));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(DataLoader::from_path("demand.txt").is_err());
    }
}

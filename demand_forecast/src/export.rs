//! Writing demand tables to CSV and spreadsheet files

use crate::data::{extension, DemandTable};
use crate::error::{ForecastError, Result};
use polars::prelude::*;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs::File;
use std::path::Path;

/// Sheet name used for the downloadable template
pub const TEMPLATE_SHEET: &str = "Sheet1";
/// Sheet name used for exported forecast results
pub const RESULTS_SHEET: &str = "Forecast_Results";

/// Write the table as CSV with a header row; nulls become empty fields
pub fn write_csv<P: AsRef<Path>>(table: &DemandTable, path: P) -> Result<()> {
    let mut df = table.dataframe().clone();
    let mut file = File::create(path.as_ref())?;
    CsvWriter::new(&mut file).has_header(true).finish(&mut df)?;

    tracing::info!(path = %path.as_ref().display(), rows = df.height(), "wrote CSV");
    Ok(())
}

/// Render the table as an xlsx workbook with a single sheet
pub fn xlsx_bytes(table: &DemandTable, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table, sheet_name)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write the table as an xlsx workbook with a single sheet
pub fn write_xlsx<P: AsRef<Path>>(table: &DemandTable, path: P, sheet_name: &str) -> Result<()> {
    let mut workbook = build_workbook(table, sheet_name)?;
    workbook.save(path.as_ref())?;

    tracing::info!(
        path = %path.as_ref().display(),
        sheet = sheet_name,
        rows = table.height(),
        "wrote spreadsheet"
    );
    Ok(())
}

/// Write the table, choosing the format from the file extension
pub fn write_path<P: AsRef<Path>>(table: &DemandTable, path: P, sheet_name: &str) -> Result<()> {
    match extension(path.as_ref()).as_deref() {
        Some("csv") => write_csv(table, path),
        Some("xlsx") => write_xlsx(table, path, sheet_name),
        _ => Err(ForecastError::DataError(format!(
            "Unsupported output file: {} (expected .xlsx or .csv)",
            path.as_ref().display()
        ))),
    }
}

fn build_workbook(table: &DemandTable, sheet_name: &str) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (col, series) in table.dataframe().get_columns().iter().enumerate() {
            let col = u16::try_from(col).map_err(|_| {
                ForecastError::SpreadsheetError("Too many columns for a worksheet".to_string())
            })?;
            worksheet.write_string(0, col, series.name())?;
            write_column(worksheet, col, series)?;
        }
    }
    Ok(workbook)
}

/// Write one column below its header; null cells are left blank
fn write_column(worksheet: &mut Worksheet, col: u16, series: &Series) -> Result<()> {
    if series.dtype().is_numeric() {
        let values = series.cast(&DataType::Float64)?;
        for (row, value) in values.f64()?.into_iter().enumerate() {
            if let Some(v) = value {
                worksheet.write_number(sheet_row(row)?, col, v)?;
            }
        }
    } else {
        let values = series.cast(&DataType::Utf8)?;
        for (row, value) in values.utf8()?.into_iter().enumerate() {
            if let Some(text) = value {
                worksheet.write_string(sheet_row(row)?, col, text)?;
            }
        }
    }
    Ok(())
}

/// Worksheet row for data row `row` (row 0 holds the header)
fn sheet_row(row: usize) -> Result<u32> {
    u32::try_from(row + 1)
        .map_err(|_| ForecastError::SpreadsheetError("Too many rows for a worksheet".to_string()))
}

//! CSV input and diagnostics output.
//!
//! Price files are wide: one timestamp column plus one numeric column per
//! instrument. Empty or unparseable price cells load as NaN and are left
//! for the screener to reject.

use crate::error::DataError;
use crate::types::PriceFrame;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading or writing CSV data
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or frame construction error
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// A requested column is not present in the file
    #[error("Column not found: {0}")]
    MissingColumn(String),

    /// A timestamp cell that is neither a date, a datetime, nor epoch seconds
    #[error("Cannot parse timestamp {value:?} at row {row}")]
    TimestampParse { row: usize, value: String },

    /// The loaded data violates the price frame invariants
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Where and how to read a wide price file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvSource {
    /// Timestamp column; the first column when `None`
    pub timestamp_column: Option<String>,
    /// Instrument columns to keep; every other column when `None`
    pub symbols: Option<Vec<String>>,
}

/// Parse one timestamp cell into Unix seconds.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, RFC 3339, or integer seconds.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<i64>() {
        return Some(seconds);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.timestamp())
}

fn timestamp_index(column: &Series) -> Result<Vec<i64>, LoadError> {
    if column.dtype() == &DataType::String {
        column
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                let cell = cell.unwrap_or_default();
                parse_timestamp(cell).ok_or_else(|| LoadError::TimestampParse {
                    row,
                    value: cell.to_string(),
                })
            })
            .collect()
    } else {
        let cast = column.cast(&DataType::Int64)?;
        cast.i64()?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.ok_or_else(|| LoadError::TimestampParse {
                    row,
                    value: String::new(),
                })
            })
            .collect()
    }
}

fn float_column(column: &Series) -> Result<Vec<f64>, LoadError> {
    let cast = column.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

fn read_csv(path: &Path) -> Result<DataFrame, LoadError> {
    info!(path = %path.display(), "Loading CSV data");
    let file = File::open(path)?;
    Ok(CsvReader::new(file).finish()?)
}

/// Load a wide price file into an aligned frame.
pub fn load_price_frame(path: &Path, source: &CsvSource) -> Result<PriceFrame, LoadError> {
    let df = read_csv(path)?;
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

    let ts_name = match &source.timestamp_column {
        Some(name) => name.clone(),
        None => names
            .first()
            .cloned()
            .ok_or_else(|| LoadError::MissingColumn("timestamp".to_string()))?,
    };
    let ts_column = df
        .column(&ts_name)
        .map_err(|_| LoadError::MissingColumn(ts_name.clone()))?;
    let index = timestamp_index(ts_column)?;

    let wanted: Vec<String> = match &source.symbols {
        Some(symbols) => symbols.clone(),
        None => names.into_iter().filter(|n| *n != ts_name).collect(),
    };

    let mut columns = Vec::with_capacity(wanted.len());
    for symbol in wanted {
        let column = df
            .column(&symbol)
            .map_err(|_| LoadError::MissingColumn(symbol.clone()))?;
        columns.push((symbol, float_column(column)?));
    }

    let frame = PriceFrame::new(index, columns)?;
    info!(
        symbols = frame.width(),
        rows = frame.len(),
        "Price frame loaded"
    );
    Ok(frame)
}

/// Load a single numeric column, e.g. for a digit-distribution check.
pub fn load_column(path: &Path, column: &str) -> Result<Vec<f64>, LoadError> {
    let df = read_csv(path)?;
    let series = df
        .column(column)
        .map_err(|_| LoadError::MissingColumn(column.to_string()))?;
    let values = float_column(series)?;
    debug!(column, values = values.len(), "Column loaded");
    Ok(values)
}

/// Write the per-step ratio and z-score of a simulation.
///
/// Undefined z-scores are written as empty cells.
pub fn write_zscore_csv(
    path: &Path,
    index: &[i64],
    ratios: &[f64],
    zscores: &[Option<f64>],
) -> Result<(), LoadError> {
    let mut df = df! {
        "timestamp" => index,
        "ratio" => ratios,
        "zscore" => zscores,
    }?;

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    info!(path = %path.display(), rows = df.height(), "Z-score diagnostics written");
    Ok(())
}

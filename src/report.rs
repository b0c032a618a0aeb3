//! JSON reports for screening, simulation, sweep, and Benford runs.
//!
//! Monetary amounts are carried as `Decimal` rounded to six places and
//! serialized as strings.

use crate::benford::BenfordReport;
use crate::screening::ScreenResult;
use crate::trading::{Signal, SweepResult, TradeEvent, TradeOutcome, WalkForwardResult};
use crate::types::PairCandidate;

use chrono::{DateTime, Utc};
use nalgebra::DMatrix;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Decimal places kept for monetary amounts
pub const MONEY_DP: u32 = 6;

/// Errors raised while writing a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Round an amount for reporting. Non-finite values become zero.
pub fn money(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(MONEY_DP))
        .unwrap_or(Decimal::ZERO)
}

/// Row-major copy of a matrix; non-finite cells become `null`.
pub fn matrix_rows(matrix: &DMatrix<f64>) -> Vec<Vec<Option<f64>>> {
    (0..matrix.nrows())
        .map(|i| {
            (0..matrix.ncols())
                .map(|j| Some(matrix[(i, j)]).filter(|v| v.is_finite()))
                .collect()
        })
        .collect()
}

/// Output of the `screen` command
#[derive(Debug, Serialize)]
pub struct ScreenReport {
    pub generated_at: DateTime<Utc>,
    pub rows: usize,
    pub pvalue_cutoff: f64,
    pub symbols: Vec<String>,
    pub score_matrix: Vec<Vec<Option<f64>>>,
    pub pvalue_matrix: Vec<Vec<Option<f64>>>,
    /// Candidates sorted by ascending p-value
    pub candidates: Vec<PairCandidate>,
}

impl ScreenReport {
    pub fn new(result: &ScreenResult, rows: usize, pvalue_cutoff: f64) -> Self {
        Self {
            generated_at: Utc::now(),
            rows,
            pvalue_cutoff,
            symbols: result.symbols.clone(),
            score_matrix: matrix_rows(&result.score_matrix),
            pvalue_matrix: matrix_rows(&result.pvalue_matrix),
            candidates: result.ranked().into_iter().cloned().collect(),
        }
    }
}

/// Output of the `simulate` command
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub symbol_a: String,
    pub symbol_b: String,
    pub window1: usize,
    pub window2: usize,
    pub rows: usize,
    /// Realized P&L
    pub pnl: Decimal,
    /// Value of holdings still open at the last prices (not in `pnl`)
    pub unrealized: Decimal,
    pub open_count_a: i64,
    pub open_count_b: Decimal,
    pub entries: usize,
    pub events: Vec<EventRow>,
}

/// One trade event with its cash as money
#[derive(Debug, Serialize)]
pub struct EventRow {
    pub index: usize,
    pub signal: Signal,
    pub z_score: f64,
    pub cash_after: Decimal,
}

impl From<&TradeEvent> for EventRow {
    fn from(event: &TradeEvent) -> Self {
        Self {
            index: event.index,
            signal: event.signal,
            z_score: event.z_score,
            cash_after: money(event.cash_after),
        }
    }
}

impl SimulationReport {
    pub fn new(
        (symbol_a, symbol_b): (&str, &str),
        (window1, window2): (usize, usize),
        outcome: &TradeOutcome,
        last_prices: Option<(f64, f64)>,
    ) -> Self {
        let unrealized = last_prices
            .map(|(a, b)| outcome.position.market_value(a, b))
            .unwrap_or(0.0);
        Self {
            generated_at: Utc::now(),
            symbol_a: symbol_a.to_string(),
            symbol_b: symbol_b.to_string(),
            window1,
            window2,
            rows: outcome.ratios.len(),
            pnl: money(outcome.pnl),
            unrealized: money(unrealized),
            open_count_a: outcome.position.count_s1,
            open_count_b: money(outcome.position.count_s2),
            entries: outcome.entries(),
            events: outcome.events.iter().map(EventRow::from).collect(),
        }
    }
}

/// One window combination with its P&L as money
#[derive(Debug, Serialize)]
pub struct SweepRow {
    pub window1: usize,
    pub window2: usize,
    pub pnl: Decimal,
    pub trades: usize,
}

impl From<&SweepResult> for SweepRow {
    fn from(result: &SweepResult) -> Self {
        Self {
            window1: result.window1,
            window2: result.window2,
            pnl: money(result.pnl),
            trades: result.trades,
        }
    }
}

/// Output of the `sweep` command
#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub generated_at: DateTime<Utc>,
    pub symbol_a: String,
    pub symbol_b: String,
    pub train_ratio: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Best in-sample combination; its `pnl` is the training P&L
    pub best: SweepRow,
    /// Best windows replayed on the held-out rows
    pub test_pnl: Decimal,
    pub test_trades: usize,
    /// Full in-sample ranking, best first
    pub in_sample: Vec<SweepRow>,
}

impl SweepReport {
    pub fn new(result: &WalkForwardResult, train_ratio: f64) -> Self {
        Self {
            generated_at: Utc::now(),
            symbol_a: result.symbol_a.clone(),
            symbol_b: result.symbol_b.clone(),
            train_ratio,
            train_rows: result.train_rows,
            test_rows: result.test_rows,
            best: SweepRow::from(&result.best),
            test_pnl: money(result.test_pnl),
            test_trades: result.test_trades,
            in_sample: result.in_sample.iter().map(SweepRow::from).collect(),
        }
    }
}

/// Output of the `benford` command
#[derive(Debug, Serialize)]
pub struct BenfordOutput {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub column: String,
    #[serde(flatten)]
    pub report: BenfordReport,
}

/// Writes one report per run.
///
/// The destination is a file when a path is set, stdout otherwise. Further
/// writes after the first are ignored.
#[derive(Debug)]
pub struct ReportWriter {
    path: Option<PathBuf>,
    written: bool,
}

impl ReportWriter {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            written: false,
        }
    }

    pub fn to_file(path: impl AsRef<Path>) -> Self {
        Self::new(Some(path.as_ref().to_path_buf()))
    }

    pub fn is_written(&self) -> bool {
        self.written
    }

    /// Serialize `report` as pretty JSON, once.
    ///
    /// Returns `Ok(false)` without touching the destination when a report
    /// was already written.
    pub fn write_once<T: Serialize>(&mut self, report: &T) -> Result<bool, ReportError> {
        if self.written {
            warn!("Report already written, ignoring");
            return Ok(false);
        }

        let json = serde_json::to_string_pretty(report)?;
        match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                let mut file = File::create(path)?;
                file.write_all(json.as_bytes())?;
                info!(path = %path.display(), "Report written");
            }
            None => println!("{}", json),
        }

        self.written = true;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic_universe;
    use crate::trading::{walk_forward, SpreadTrader, SweepGrid};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn test_money_rounding() {
        assert_eq!(money(0.1234567), dec!(0.123457));
        assert_eq!(money(-2.5), dec!(-2.5));
        assert_eq!(money(f64::NAN), Decimal::ZERO);
        assert_eq!(money(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_matrix_rows_nulls_non_finite() {
        let m = DMatrix::from_row_slice(2, 2, &[0.0, f64::NEG_INFINITY, 0.0, 0.0]);
        let rows = matrix_rows(&m);
        assert_eq!(rows, vec![vec![Some(0.0), None], vec![Some(0.0), Some(0.0)]]);
    }

    #[test]
    fn test_writes_at_most_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let mut writer = ReportWriter::to_file(&path);

        assert!(writer.write_once(&serde_json::json!({"run": 1})).unwrap());
        assert!(writer.is_written());
        assert!(!writer.write_once(&serde_json::json!({"run": 2})).unwrap());

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["run"], 1);
    }

    #[test]
    fn test_simulation_report_amounts_are_strings() {
        let s1 = [10.0, 10.0, 10.0, 10.0, 7.0, 6.5];
        let s2 = [1.0; 6];
        let outcome = SpreadTrader::new(1, 3).run(&s1, &s2);
        let report = SimulationReport::new(("A", "B"), (1, 3), &outcome, Some((6.5, 1.0)));

        assert_eq!(report.pnl, dec!(0.5));
        assert_eq!(report.unrealized, Decimal::ZERO);
        assert_eq!(report.entries, 1);

        let value = serde_json::to_value(&report).unwrap();
        let pnl: Decimal = value["pnl"].as_str().unwrap().parse().unwrap();
        assert_eq!(pnl, dec!(0.5));
        let events = value["events"].as_array().unwrap();
        assert_eq!(events.len(), 2);
        let cash: Decimal = events[1]["cash_after"].as_str().unwrap().parse().unwrap();
        assert_eq!(cash, dec!(0.5));
    }

    #[test]
    fn test_sweep_report_amounts_are_single_strings() {
        let frame = synthetic_universe(2, 200, 3).unwrap();
        let result = walk_forward(&frame, "SYN0", "SYN1", &SweepGrid::default(), 0.75).unwrap();
        let report = SweepReport::new(&result, 0.75);

        let json = serde_json::to_string_pretty(&report).unwrap();
        assert_eq!(json.matches("\"test_pnl\"").count(), 1);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let test_pnl: Decimal = value["test_pnl"].as_str().unwrap().parse().unwrap();
        assert_eq!(test_pnl, money(result.test_pnl));
        assert!(value["best"]["pnl"].is_string());
        let rows = value["in_sample"].as_array().unwrap();
        assert_eq!(rows.len(), result.in_sample.len());
        assert!(rows.iter().all(|row| row["pnl"].is_string()));
        assert_eq!(value["train_rows"], 150);
    }
}

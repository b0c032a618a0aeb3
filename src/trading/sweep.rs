//! Window grid search and walk-forward validation
//!
//! Evaluates [`SpreadTrader`] over every `(window1, window2)` combination of
//! a grid, and checks the best in-sample choice on held-out data.

use super::spread_trader::SpreadTrader;
use crate::error::{ConfigError, DataError};
use crate::types::PriceFrame;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Window grid for the sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    /// Short moving-average windows to test
    #[serde(default = "default_short_windows")]
    pub short_windows: Vec<usize>,
    /// Long moving-average windows to test
    #[serde(default = "default_long_windows")]
    pub long_windows: Vec<usize>,
}

fn default_short_windows() -> Vec<usize> {
    vec![1, 2, 5, 10]
}
fn default_long_windows() -> Vec<usize> {
    vec![5, 10, 20, 30, 60]
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self {
            short_windows: default_short_windows(),
            long_windows: default_long_windows(),
        }
    }
}

impl SweepGrid {
    /// Combinations with `short < long`, in grid order.
    pub fn combinations(&self) -> Vec<(usize, usize)> {
        let mut combos = Vec::new();
        for &short in &self.short_windows {
            for &long in &self.long_windows {
                if short < long {
                    combos.push((short, long));
                }
            }
        }
        combos
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_windows.iter().chain(&self.long_windows).any(|w| *w == 0) {
            return Err(ConfigError::Invalid(
                "window lengths must be positive".to_string(),
            ));
        }
        if self.combinations().is_empty() {
            return Err(ConfigError::Invalid(
                "grid has no combination with short < long".to_string(),
            ));
        }
        Ok(())
    }
}

/// P&L of one window combination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub window1: usize,
    pub window2: usize,
    pub pnl: f64,
    /// Number of entry events
    pub trades: usize,
}

/// Train/test outcome of the best in-sample combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkForwardResult {
    pub symbol_a: String,
    pub symbol_b: String,
    /// Rows in the training slice
    pub train_rows: usize,
    /// Rows in the held-out slice
    pub test_rows: usize,
    /// Best combination on the training slice
    pub best: SweepResult,
    /// Same windows re-run on the held-out slice
    pub test_pnl: f64,
    pub test_trades: usize,
    /// Full in-sample ranking
    pub in_sample: Vec<SweepResult>,
}

/// Run every grid combination and rank by P&L, best first.
///
/// Ties keep grid order.
pub fn sweep_windows(s1: &[f64], s2: &[f64], grid: &SweepGrid) -> Vec<SweepResult> {
    let mut results: Vec<SweepResult> = grid
        .combinations()
        .into_iter()
        .map(|(window1, window2)| {
            let outcome = SpreadTrader::new(window1, window2).run(s1, s2);
            debug!(window1, window2, pnl = outcome.pnl, "Combination evaluated");
            SweepResult {
                window1,
                window2,
                pnl: outcome.pnl,
                trades: outcome.entries(),
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.pnl
            .partial_cmp(&a.pnl)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}

/// Sweep on the chronological training slice, then replay the winner on
/// the remainder.
///
/// # Errors
/// `DataError::UnknownSymbol` for a leg missing from the frame, and
/// `DataError::InsufficientData` when `train_ratio` is outside (0, 1),
/// either slice would be empty, or the grid yields no combination.
pub fn walk_forward(
    frame: &PriceFrame,
    symbol_a: &str,
    symbol_b: &str,
    grid: &SweepGrid,
    train_ratio: f64,
) -> Result<WalkForwardResult, DataError> {
    // Surface unknown legs before the split
    frame.pair(symbol_a, symbol_b)?;

    let (train, test) = frame.split(train_ratio)?;

    let (train_a, train_b) = train.pair(symbol_a, symbol_b)?;
    let in_sample = sweep_windows(train_a, train_b, grid);
    let best = *in_sample.first().ok_or(DataError::InsufficientData {
        expected: 1,
        actual: 0,
    })?;

    let (test_a, test_b) = test.pair(symbol_a, symbol_b)?;
    let outcome = SpreadTrader::new(best.window1, best.window2).run(test_a, test_b);

    info!(
        pair = format!("{}-{}", symbol_a, symbol_b),
        window1 = best.window1,
        window2 = best.window2,
        train_pnl = format!("{:.4}", best.pnl),
        test_pnl = format!("{:.4}", outcome.pnl),
        "Walk-forward complete"
    );

    Ok(WalkForwardResult {
        symbol_a: symbol_a.to_string(),
        symbol_b: symbol_b.to_string(),
        train_rows: train.len(),
        test_rows: test.len(),
        best,
        test_pnl: outcome.pnl,
        test_trades: outcome.entries(),
        in_sample,
    })
}

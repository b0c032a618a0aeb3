//! Z-score spread trading simulation.
//!
//! Walks a price-ratio series step by step, opening market-neutral
//! positions when the rolling z-score crosses the entry threshold and
//! flattening when it reverts inside the exit band.
//!
//! # Signal Rule
//!
//! ```text
//! z = (MA(ratio, w1) - MA(ratio, w2)) / STD(ratio, w2)
//!
//! z < -entry          → Sell ratio: cash += S1 - S2·ratio, A -= 1, B += ratio
//! z >  entry          → Buy ratio:  cash -= S1 - S2·ratio, A += 1, B -= ratio
//! |z| < exit          → Exit:       cash += S1·A + S2·B,   A = B = 0
//! otherwise/undefined → Hold
//! ```
//!
//! Because `ratio = S1 / S2`, the entry cash term `S1 - S2·ratio` is zero up
//! to rounding: cash effectively moves only on exits. Open positions at the
//! end of the series are not marked to market.

use super::Signal;
use crate::math::{rolling_mean, rolling_std};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Default |z| above which a position is entered
pub const DEFAULT_ENTRY_THRESHOLD: f64 = 1.0;
/// Default |z| below which all holdings are flattened
pub const DEFAULT_EXIT_THRESHOLD: f64 = 0.75;

/// Net holdings and realized cash during a simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Net units of instrument A
    pub count_s1: i64,
    /// Net units of instrument B (fractional, sized by the ratio)
    pub count_s2: f64,
    /// Realized cash
    pub money: f64,
}

impl Position {
    /// Apply one step's signal at prices `(s1, s2)`.
    pub fn apply(&mut self, signal: Signal, s1: f64, s2: f64, ratio: f64) {
        match signal {
            Signal::Sell => {
                self.money += s1 - s2 * ratio;
                self.count_s1 -= 1;
                self.count_s2 += ratio;
            }
            Signal::Buy => {
                self.money -= s1 - s2 * ratio;
                self.count_s1 += 1;
                self.count_s2 -= ratio;
            }
            Signal::Exit => {
                self.money += s1 * self.count_s1 as f64 + s2 * self.count_s2;
                self.count_s1 = 0;
                self.count_s2 = 0.0;
            }
            Signal::Hold => {}
        }
    }

    /// Value of the open holdings at `(s1, s2)`; never part of the P&L.
    pub fn market_value(&self, s1: f64, s2: f64) -> f64 {
        s1 * self.count_s1 as f64 + s2 * self.count_s2
    }

    pub fn is_flat(&self) -> bool {
        self.count_s1 == 0 && self.count_s2 == 0.0
    }
}

/// A step at which the position changed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Row index in the input series
    pub index: usize,
    pub signal: Signal,
    pub z_score: f64,
    /// Realized cash after the step
    pub cash_after: f64,
}

/// Full result of one simulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeOutcome {
    /// Realized P&L (final cash)
    pub pnl: f64,
    /// `S1[i] / S2[i]`
    pub ratios: Vec<f64>,
    /// Rolling z-score; `None` where undefined
    pub zscores: Vec<Option<f64>>,
    /// Every non-hold step
    pub events: Vec<TradeEvent>,
    /// Holdings left open at the end
    pub position: Position,
}

impl TradeOutcome {
    /// Number of entry events (buy or sell)
    pub fn entries(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.signal, Signal::Buy | Signal::Sell))
            .count()
    }
}

/// Rolling z-score of `(MA(w1) - MA(w2)) / STD(w2)`.
///
/// Undefined while any window is warming up, when the deviation is zero,
/// or when the quotient is not finite.
pub fn zscore_series(ratios: &[f64], window1: usize, window2: usize) -> Vec<Option<f64>> {
    let ma1 = rolling_mean(ratios, window1);
    let ma2 = rolling_mean(ratios, window2);
    let std = rolling_std(ratios, window2);

    ma1.iter()
        .zip(&ma2)
        .zip(&std)
        .map(|((m1, m2), s)| match (m1, m2, s) {
            (Some(m1), Some(m2), Some(s)) if *s != 0.0 => {
                let z = (m1 - m2) / s;
                z.is_finite().then_some(z)
            }
            _ => None,
        })
        .collect()
}

/// Z-score threshold trader over one pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadTrader {
    /// Short moving-average window
    pub window1: usize,
    /// Long moving-average and deviation window
    pub window2: usize,
    /// |z| beyond which a position is entered
    pub entry_threshold: f64,
    /// |z| inside which holdings are flattened
    pub exit_threshold: f64,
}

impl SpreadTrader {
    pub fn new(window1: usize, window2: usize) -> Self {
        Self {
            window1,
            window2,
            entry_threshold: DEFAULT_ENTRY_THRESHOLD,
            exit_threshold: DEFAULT_EXIT_THRESHOLD,
        }
    }

    pub fn with_thresholds(mut self, entry: f64, exit: f64) -> Self {
        self.entry_threshold = entry;
        self.exit_threshold = exit;
        self
    }

    /// Map one z-score to a signal. Depends on nothing but `z`.
    pub fn decide(&self, z: Option<f64>) -> Signal {
        match z {
            Some(z) if z < -self.entry_threshold => Signal::Sell,
            Some(z) if z > self.entry_threshold => Signal::Buy,
            Some(z) if z.abs() < self.exit_threshold => Signal::Exit,
            _ => Signal::Hold,
        }
    }

    /// Simulate over two positionally aligned price slices.
    ///
    /// A zero window or slices of different length are a no-op: the
    /// outcome is empty with zero P&L. Alignment beyond length is the
    /// caller's responsibility.
    pub fn run(&self, s1: &[f64], s2: &[f64]) -> TradeOutcome {
        if self.window1 == 0 || self.window2 == 0 || s1.len() != s2.len() {
            debug!(
                window1 = self.window1,
                window2 = self.window2,
                len_a = s1.len(),
                len_b = s2.len(),
                "Degenerate simulation input, returning zero P&L"
            );
            return TradeOutcome::default();
        }

        let ratios: Vec<f64> = s1.iter().zip(s2).map(|(a, b)| a / b).collect();
        let zscores = zscore_series(&ratios, self.window1, self.window2);

        let mut position = Position::default();
        let mut events = Vec::new();

        for (i, z) in zscores.iter().enumerate() {
            let signal = self.decide(*z);
            if signal == Signal::Hold {
                continue;
            }
            position.apply(signal, s1[i], s2[i], ratios[i]);

            let z_score = z.unwrap_or_default();
            trace!(
                index = i,
                signal = ?signal,
                z = format!("{:.4}", z_score),
                cash = position.money,
                "Position changed"
            );
            events.push(TradeEvent {
                index: i,
                signal,
                z_score,
                cash_after: position.money,
            });
        }

        debug!(
            window1 = self.window1,
            window2 = self.window2,
            events = events.len(),
            pnl = position.money,
            open = !position.is_flat(),
            "Simulation complete"
        );

        TradeOutcome {
            pnl: position.money,
            ratios,
            zscores,
            events,
            position,
        }
    }
}

/// Realized P&L of the z-score rule with default thresholds.
///
/// Returns exactly 0 when either window is zero or the series differ in
/// length.
pub fn simulate_spread_trade(s1: &[f64], s2: &[f64], window1: usize, window2: usize) -> f64 {
    SpreadTrader::new(window1, window2).run(s1, s2).pnl
}

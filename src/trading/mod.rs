//! Spread trading simulation.
//!
//! This module contains the z-score threshold trader and the window sweep
//! built on top of it.

pub mod spread_trader;
pub mod sweep;

use serde::{Deserialize, Serialize};

/// Per-step decision on the price ratio `A / B`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Buy the ratio: long A, short B
    Buy,
    /// Sell the ratio: short A, long B
    Sell,
    /// Flatten all holdings
    Exit,
    Hold,
}

pub use spread_trader::{
    simulate_spread_trade, zscore_series, Position, SpreadTrader, TradeEvent, TradeOutcome,
};
pub use sweep::{sweep_windows, walk_forward, SweepGrid, SweepResult, WalkForwardResult};

//! Mathematical utilities for pairs research.
//!
//! This module provides the statistical primitives used by the
//! cointegration test and the spread trader: trailing window statistics
//! and least squares.

pub mod ols;
pub mod rolling;

pub use ols::{ols, with_intercept, OlsFit};
pub use rolling::{rolling_mean, rolling_std};

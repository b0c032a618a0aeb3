//! Cointegration testing
//!
//! The screener only depends on the [`CointegrationTest`] trait; the
//! Engle-Granger implementation is the default collaborator.
//!
//! # Example
//!
//! ```
//! use pairlab::cointegration::{CointegrationTest, EngleGranger};
//!
//! let x: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin() + i as f64 * 0.1).collect();
//! let y: Vec<f64> = x.iter().enumerate().map(|(i, v)| 2.0 * v + (i % 3) as f64 * 0.05).collect();
//! let result = EngleGranger::new().run(&y, &x);
//! assert!((0.0..=1.0).contains(&result.p_value));
//! ```

pub mod adf;
pub mod engle_granger;
pub mod mackinnon;

pub use adf::{adf_test, AdfResult};
pub use engle_granger::EngleGranger;

use serde::{Deserialize, Serialize};

/// Outcome of a two-series cointegration test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CointegrationResult {
    /// Test statistic (more negative = stronger cointegration)
    pub statistic: f64,
    /// Approximate p-value, always in [0, 1]
    pub p_value: f64,
    /// Critical values at 1%, 5% and 10%
    pub critical_values: [f64; 3],
}

/// A cointegration test over two aligned series.
///
/// Implementations must return a p-value in [0, 1] for any input of
/// matching length, reporting degenerate inputs through the result rather
/// than panicking.
pub trait CointegrationTest {
    /// Test whether `y` and `x` are cointegrated, `y` being the dependent leg.
    fn run(&self, y: &[f64], x: &[f64]) -> CointegrationResult;
}

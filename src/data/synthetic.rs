//! Synthetic price universes for demos and CI.
//!
//! Instruments come in pairs sharing a geometric random-walk factor, so
//! members of the same pair are cointegrated and members of different
//! pairs are not.

use crate::error::DataError;
use crate::types::PriceFrame;
use tracing::info;

/// 2020-01-01T00:00:00Z
const BASE_TIMESTAMP: i64 = 1_577_836_800;
const SECONDS_PER_DAY: i64 = 86_400;

/// Linear congruential generator, reproducible across platforms.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed derived from a symbol, so each symbol gets its own pattern.
    pub fn from_symbol(symbol: &str) -> Self {
        Self::new(symbol.bytes().map(|b| b as u64).sum())
    }

    /// Uniform sample in [-0.5, 0.5].
    pub fn next_centered(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        ((self.state >> 33) as f64) / (u32::MAX as f64) - 0.5
    }
}

/// Geometric random walk starting at 100 with a floor at 1.
pub fn random_walk(rng: &mut Lcg, len: usize) -> Vec<f64> {
    // NOTE: f64 is fine here, synthetic data never feeds money accounting.
    let drift = 0.0001;
    let volatility = 0.02;

    let mut prices = Vec::with_capacity(len);
    let mut price = 100.0_f64;
    for _ in 0..len {
        price *= 1.0 + drift + volatility * rng.next_centered();
        price = price.max(1.0);
        prices.push(price);
    }
    prices
}

/// Daily index starting 2020-01-01.
pub fn daily_index(len: usize) -> Vec<i64> {
    (0..len as i64)
        .map(|i| BASE_TIMESTAMP + i * SECONDS_PER_DAY)
        .collect()
}

/// Build `instruments` synthetic series of `len` daily rows named `SYN0`, `SYN1`, ...
///
/// `SYN0`/`SYN1` share a factor, `SYN2`/`SYN3` share another, and so on.
pub fn synthetic_universe(instruments: usize, len: usize, seed: u64) -> Result<PriceFrame, DataError> {
    info!(instruments, rows = len, seed, "Generating synthetic universe");

    let mut rng = Lcg::new(seed);
    let mut columns = Vec::with_capacity(instruments);
    let mut factor = Vec::new();

    for k in 0..instruments {
        if k % 2 == 0 {
            factor = random_walk(&mut rng, len);
        }
        let values: Vec<f64> = factor
            .iter()
            .map(|f| {
                let noise = 0.5 * rng.next_centered();
                if k % 2 == 0 {
                    f + noise
                } else {
                    0.5 * f + 20.0 + noise
                }
            })
            .collect();
        columns.push((format!("SYN{}", k), values));
    }

    PriceFrame::new(daily_index(len), columns)
}

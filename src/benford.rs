//! Benford's-law first-digit check
//!
//! Compares the leading-digit distribution of a sample with
//! `P(d) = log10(1 + 1/d)` using a chi-square goodness-of-fit test and
//! Nigrini's mean absolute deviation (MAD) conformity classes.

use crate::error::DataError;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::{debug, info};

/// Degrees of freedom of the first-digit chi-square test
pub const DEGREES_OF_FREEDOM: usize = 8;
/// Chi-square critical value at 5% with 8 degrees of freedom
pub const CHI_SQUARE_CRITICAL_5PCT: f64 = 15.507;

/// Nigrini first-digit MAD boundaries
const MAD_CLOSE: f64 = 0.006;
const MAD_ACCEPTABLE: f64 = 0.012;
const MAD_MARGINAL: f64 = 0.015;

/// Nigrini conformity class of a MAD value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conformity {
    Close,
    Acceptable,
    Marginal,
    Nonconformity,
}

impl Conformity {
    pub fn from_mad(mad: f64) -> Self {
        if mad <= MAD_CLOSE {
            Conformity::Close
        } else if mad <= MAD_ACCEPTABLE {
            Conformity::Acceptable
        } else if mad <= MAD_MARGINAL {
            Conformity::Marginal
        } else {
            Conformity::Nonconformity
        }
    }
}

/// One row of the digit table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DigitRow {
    pub digit: u8,
    pub count: usize,
    pub observed: f64,
    pub expected: f64,
}

/// Result of a Benford analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenfordReport {
    /// Values that contributed a digit
    pub sample_size: usize,
    /// Zero or non-finite values that were skipped
    pub skipped: usize,
    /// Digits 1 through 9
    pub digits: Vec<DigitRow>,
    pub chi_square: f64,
    pub p_value: f64,
    /// `chi_square > 15.507`
    pub rejects_at_5pct: bool,
    pub mad: f64,
    pub conformity: Conformity,
}

/// Benford probability of leading digit `d`
pub fn expected_proportion(d: u8) -> f64 {
    (1.0 + 1.0 / d as f64).log10()
}

/// First significant digit of `|value|`; `None` for zero or non-finite.
pub fn first_digit(value: f64) -> Option<u8> {
    let v = value.abs();
    if !v.is_finite() || v == 0.0 {
        return None;
    }
    // Scientific notation keeps subnormals exact, where a power-of-ten
    // scale factor would underflow to zero
    format!("{:e}", v)
        .bytes()
        .next()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .filter(|d| (1..=9).contains(d))
}

/// Run the first-digit test on a sample.
///
/// # Errors
/// `DataError::InsufficientData` when no value has a significant digit.
pub fn analyze(values: &[f64]) -> Result<BenfordReport, DataError> {
    let mut counts = [0usize; 9];
    let mut skipped = 0;

    for &value in values {
        match first_digit(value) {
            Some(d) => counts[(d - 1) as usize] += 1,
            None => skipped += 1,
        }
    }

    let n: usize = counts.iter().sum();
    if n == 0 {
        return Err(DataError::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }
    if skipped > 0 {
        debug!(skipped, "Skipped zero or non-finite values");
    }

    let total = n as f64;
    let digits: Vec<DigitRow> = (1..=9u8)
        .map(|d| {
            let count = counts[(d - 1) as usize];
            DigitRow {
                digit: d,
                count,
                observed: count as f64 / total,
                expected: expected_proportion(d),
            }
        })
        .collect();

    let chi_square: f64 = digits
        .iter()
        .map(|row| {
            let expected_count = row.expected * total;
            (row.count as f64 - expected_count).powi(2) / expected_count
        })
        .sum();
    let mad = digits
        .iter()
        .map(|row| (row.observed - row.expected).abs())
        .sum::<f64>()
        / 9.0;

    let p_value = ChiSquared::new(DEGREES_OF_FREEDOM as f64)
        .map(|dist| 1.0 - dist.cdf(chi_square))
        .unwrap_or(1.0);
    let conformity = Conformity::from_mad(mad);

    info!(
        sample = n,
        chi_square = format!("{:.3}", chi_square),
        mad = format!("{:.5}", mad),
        conformity = ?conformity,
        "Benford analysis complete"
    );

    Ok(BenfordReport {
        sample_size: n,
        skipped,
        digits,
        chi_square,
        p_value,
        rejects_at_5pct: chi_square > CHI_SQUARE_CRITICAL_5PCT,
        mad,
        conformity,
    })
}

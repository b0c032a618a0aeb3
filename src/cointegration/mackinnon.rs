//! MacKinnon response surfaces for the two-variable Engle-Granger test.
//!
//! p-values follow MacKinnon (1994), critical values MacKinnon (2010),
//! both for N = 2 integrated variables with a constant in the
//! cointegrating regression.

use statrs::distribution::{ContinuousCDF, Normal};

/// Above this statistic the p-value is 1
const TAU_MAX: f64 = 0.92;
/// Below this statistic the p-value is 0
const TAU_MIN: f64 = -18.86;
/// Switch point between the small-p and large-p polynomials
const TAU_STAR: f64 = -2.62;

/// Small-p polynomial coefficients (ascending powers)
const TAU_SMALLP: [f64; 3] = [2.92, 1.5012, 0.039796];
/// Large-p polynomial coefficients (ascending powers)
const TAU_LARGEP: [f64; 4] = [2.1945, 0.64695, -0.29198, -0.042377];

/// Critical value surfaces `b0 + b1/T + b2/T² + b3/T³` at 1%, 5%, 10%
const TAU_2010: [[f64; 4]; 3] = [
    [-3.89644, -10.9519, -22.527, 0.0],
    [-3.33613, -6.1101, -6.823, 0.0],
    [-3.04445, -4.2412, -2.720, 0.0],
];

/// Evaluate a polynomial given ascending coefficients.
fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Approximate p-value of an Engle-Granger statistic.
///
/// Always in [0, 1]. A NaN statistic maps to 1 (no evidence of
/// cointegration).
pub fn pvalue(statistic: f64) -> f64 {
    if statistic.is_nan() || statistic > TAU_MAX {
        return 1.0;
    }
    if statistic < TAU_MIN {
        return 0.0;
    }

    let z = if statistic <= TAU_STAR {
        polyval(&TAU_SMALLP, statistic)
    } else {
        polyval(&TAU_LARGEP, statistic)
    };
    Normal::new(0.0, 1.0)
        .map(|n| n.cdf(z).clamp(0.0, 1.0))
        .unwrap_or(1.0)
}

/// Critical values at 1%, 5% and 10% for a sample of `nobs` observations.
pub fn critical_values(nobs: usize) -> [f64; 3] {
    let inv = 1.0 / nobs.max(1) as f64;
    [
        polyval(&TAU_2010[0], inv),
        polyval(&TAU_2010[1], inv),
        polyval(&TAU_2010[2], inv),
    ]
}

//! Ordinary least squares via the normal equations.

use nalgebra::{DMatrix, DVector};
use std::f64::consts::PI;

/// Result of an OLS fit `y = X·β + ε`.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Estimated coefficients, one per design column
    pub coefficients: Vec<f64>,
    /// Standard errors of the coefficients
    pub std_errors: Vec<f64>,
    /// `y - X·β`
    pub residuals: Vec<f64>,
    /// Sum of squared residuals
    pub ssr: f64,
    /// Centered coefficient of determination
    pub r_squared: f64,
    /// Observations used
    pub nobs: usize,
}

impl OlsFit {
    /// t-statistic of coefficient `j`.
    pub fn t_value(&self, j: usize) -> f64 {
        self.coefficients[j] / self.std_errors[j]
    }

    /// Gaussian log-likelihood at the ML variance estimate.
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -n / 2.0 * ((2.0 * PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// Akaike information criterion, `-2·llf + 2·k`.
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.coefficients.len() as f64
    }
}

/// Fit `y` on the columns of `design`.
///
/// Returns `None` when there are no residual degrees of freedom or `X'X`
/// is singular.
pub fn ols(y: &[f64], design: &DMatrix<f64>) -> Option<OlsFit> {
    let n = y.len();
    let k = design.ncols();
    if design.nrows() != n || k == 0 || n <= k {
        return None;
    }

    let y_vec = DVector::from_column_slice(y);
    let xtx = design.transpose() * design;
    let xtx_inv = xtx.try_inverse()?;
    let beta = &xtx_inv * (design.transpose() * &y_vec);

    let fitted = design * &beta;
    let residuals: Vec<f64> = (&y_vec - fitted).iter().copied().collect();
    let ssr: f64 = residuals.iter().map(|r| r * r).sum();

    let sigma2 = ssr / (n - k) as f64;
    let std_errors = (0..k).map(|j| (sigma2 * xtx_inv[(j, j)]).sqrt()).collect();

    let mean_y = y.iter().sum::<f64>() / n as f64;
    let tss: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
    let r_squared = if tss > 0.0 { 1.0 - ssr / tss } else { 0.0 };

    Some(OlsFit {
        coefficients: beta.iter().copied().collect(),
        std_errors,
        residuals,
        ssr,
        r_squared,
        nobs: n,
    })
}

/// Design matrix `[1, x]` for a simple regression with intercept.
pub fn with_intercept(x: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), 2, |i, j| if j == 0 { 1.0 } else { x[i] })
}

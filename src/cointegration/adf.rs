//! Augmented Dickey-Fuller regression without deterministic terms.
//!
//! Regresses `Δy[t]` on `y[t-1]` and `p` lagged differences:
//!
//! ```text
//! Δy[t] = γ·y[t-1] + φ1·Δy[t-1] + ... + φp·Δy[t-p] + ε
//! ```
//!
//! The statistic is the t-value of γ. The lag order `p` is chosen by
//! minimum AIC over `0..=max_lag` on a common sample, then refit on the
//! longest sample that order allows.

use crate::math::{ols, OlsFit};
use nalgebra::DMatrix;
use tracing::debug;

/// Outcome of an ADF regression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdfResult {
    /// t-value of the lagged level coefficient
    pub statistic: f64,
    /// Lagged differences selected by AIC
    pub used_lag: usize,
    /// Observations in the final regression
    pub nobs: usize,
}

/// Default lag cap, `ceil(12·(n/100)^¼)`, bounded by `n/2 - 1`.
pub fn default_max_lag(n: usize) -> usize {
    let schwert = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
    schwert.min((n / 2).saturating_sub(1))
}

/// Dependent vector and full design for `lags` lagged differences.
///
/// Row `r` corresponds to `t = lags + r` in difference space.
fn design(series: &[f64], lags: usize) -> Option<(Vec<f64>, DMatrix<f64>)> {
    let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
    if diffs.len() <= lags {
        return None;
    }
    let rows = diffs.len() - lags;

    let dependent = diffs[lags..].to_vec();
    let matrix = DMatrix::from_fn(rows, lags + 1, |r, c| {
        let t = lags + r;
        if c == 0 {
            series[t]
        } else {
            diffs[t - c]
        }
    });
    Some((dependent, matrix))
}

/// Run the ADF regression with AIC lag selection.
///
/// Returns `None` when the sample is too short or the regression is
/// singular (e.g. an identically zero series).
pub fn adf_test(series: &[f64], max_lag: Option<usize>) -> Option<AdfResult> {
    let cap = default_max_lag(series.len());
    let max_lag = max_lag.map_or(cap, |m| m.min(cap));

    let (dependent, full) = design(series, max_lag)?;

    let mut best: Option<(f64, usize)> = None;
    for lag in 0..=max_lag {
        let columns = full.columns(0, lag + 1).into_owned();
        let Some(fit) = ols(&dependent, &columns) else {
            continue;
        };
        let aic = fit.aic();
        if best.map_or(true, |(best_aic, _)| aic < best_aic) {
            best = Some((aic, lag));
        }
    }
    let (_, used_lag) = best?;

    let (dependent, matrix) = design(series, used_lag)?;
    let fit: OlsFit = ols(&dependent, &matrix)?;
    let statistic = fit.t_value(0);

    debug!(
        statistic = format!("{:.4}", statistic),
        used_lag,
        max_lag,
        nobs = fit.nobs,
        "ADF regression"
    );

    Some(AdfResult {
        statistic,
        used_lag,
        nobs: fit.nobs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::Lcg;

    fn mean_reverting(n: usize) -> Vec<f64> {
        let mut rng = Lcg::new(7);
        let mut series = Vec::with_capacity(n);
        let mut current = 5.0;
        for _ in 0..n {
            current = 0.3 * current + rng.next_centered();
            series.push(current);
        }
        series
    }

    #[test]
    fn test_default_max_lag() {
        assert_eq!(default_max_lag(100), 12);
        assert_eq!(default_max_lag(20), 9);
        assert_eq!(default_max_lag(4), 1);
    }

    #[test]
    fn test_design_alignment() {
        let series = [1.0, 3.0, 6.0, 10.0, 15.0];
        let (dep, m) = design(&series, 1).unwrap();
        // diffs = [2, 3, 4, 5]; t runs over 1..=3
        assert_eq!(dep, vec![3.0, 4.0, 5.0]);
        assert_eq!(m[(0, 0)], 3.0);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(2, 0)], 10.0);
        assert_eq!(m[(2, 1)], 4.0);
    }

    #[test]
    fn test_mean_reverting_is_strongly_negative() {
        let result = adf_test(&mean_reverting(200), None).unwrap();
        assert!(
            result.statistic < -3.0,
            "expected a stationary statistic, got {:.2}",
            result.statistic
        );
        assert!(result.used_lag <= default_max_lag(200));
    }

    #[test]
    fn test_fixed_lag_cap() {
        let result = adf_test(&mean_reverting(200), Some(0)).unwrap();
        assert_eq!(result.used_lag, 0);
        assert_eq!(result.nobs, 199);
    }

    #[test]
    fn test_zero_series_is_singular() {
        assert!(adf_test(&[0.0; 50], None).is_none());
    }

    #[test]
    fn test_too_short() {
        assert!(adf_test(&[1.0, 2.0], None).is_none());
    }
}

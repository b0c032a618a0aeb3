//! Two-step Engle-Granger cointegration test.
//!
//! 1. Estimate the cointegrating regression `y = α + β·x + ε` by OLS
//! 2. Run an ADF regression (no constant, AIC lag selection) on the residuals
//! 3. Map the ADF t-value through the MacKinnon N = 2 surfaces
//!
//! The test is not symmetric: `(y, x)` and `(x, y)` estimate different
//! cointegrating vectors and generally report different p-values.

use super::adf::adf_test;
use super::mackinnon;
use super::{CointegrationResult, CointegrationTest};
use crate::math::{ols, with_intercept};
use tracing::{debug, warn};

/// Engle-Granger test with an optional cap on the ADF lag order.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngleGranger {
    max_lag: Option<usize>,
}

impl EngleGranger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the ADF lag search at `max_lag` differences.
    pub fn with_max_lag(max_lag: usize) -> Self {
        Self {
            max_lag: Some(max_lag),
        }
    }
}

impl CointegrationTest for EngleGranger {
    fn run(&self, y: &[f64], x: &[f64]) -> CointegrationResult {
        let critical_values = mackinnon::critical_values(y.len().saturating_sub(1));

        let degenerate = CointegrationResult {
            statistic: f64::NAN,
            p_value: 1.0,
            critical_values,
        };

        if y.len() != x.len() {
            warn!(y = y.len(), x = x.len(), "Length mismatch in cointegration test");
            return degenerate;
        }

        let Some(fit) = ols(y, &with_intercept(x)) else {
            debug!("Cointegrating regression is singular");
            return degenerate;
        };

        // Perfectly collinear inputs leave nothing to test; report the
        // strongest possible evidence, as the residuals are identically zero.
        if fit.r_squared >= 1.0 - 100.0 * f64::EPSILON.sqrt() {
            warn!(
                r_squared = fit.r_squared,
                "Series are (almost) perfectly collinear; cointegration test is not reliable"
            );
            return CointegrationResult {
                statistic: f64::NEG_INFINITY,
                p_value: 0.0,
                critical_values,
            };
        }

        let Some(adf) = adf_test(&fit.residuals, self.max_lag) else {
            debug!("ADF regression on residuals is degenerate");
            return degenerate;
        };

        CointegrationResult {
            statistic: adf.statistic,
            p_value: mackinnon::pvalue(adf.statistic),
            critical_values,
        }
    }
}

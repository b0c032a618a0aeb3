//! Pairwise cointegration screen
//!
//! Runs a cointegration test on every unordered pair of instruments in an
//! aligned frame and keeps the pairs whose p-value is below a cutoff.

use super::config::ScreenConfig;
use crate::cointegration::{CointegrationTest, EngleGranger};
use crate::error::DataError;
use crate::types::{PairCandidate, PriceFrame};

use nalgebra::DMatrix;
use tracing::{debug, info};

/// Neutral score for untested matrix cells
const NEUTRAL_SCORE: f64 = 0.0;
/// Neutral p-value for untested matrix cells
const NEUTRAL_PVALUE: f64 = 1.0;

/// Output of a pairwise screen.
///
/// Matrices are indexed by the frame's column order. Only the strict upper
/// triangle (`i < j`) holds test results; the diagonal and lower triangle
/// keep the neutral defaults (score 0, p-value 1).
#[derive(Debug, Clone)]
pub struct ScreenResult {
    /// Symbols in matrix order
    pub symbols: Vec<String>,
    /// Test statistic of `(i, j)` with `i` as the dependent leg
    pub score_matrix: DMatrix<f64>,
    /// p-value of `(i, j)`
    pub pvalue_matrix: DMatrix<f64>,
    /// Pairs below the cutoff, in row-major `(i, j)` order
    pub candidates: Vec<PairCandidate>,
}

impl ScreenResult {
    /// Candidates sorted by ascending p-value (strongest first).
    pub fn ranked(&self) -> Vec<&PairCandidate> {
        let mut ranked: Vec<&PairCandidate> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| {
            a.p_value
                .partial_cmp(&b.p_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// p-value for a pair by name, in screened orientation.
    pub fn pvalue(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == a)?;
        let j = self.symbols.iter().position(|s| s == b)?;
        Some(self.pvalue_matrix[(i.min(j), i.max(j))])
    }
}

/// Reject the frame if any column holds a NaN or infinite value.
fn check_finite(frame: &PriceFrame) -> Result<(), DataError> {
    for (i, symbol) in frame.symbols().iter().enumerate() {
        if let Some(index) = frame.column_at(i).iter().position(|v| !v.is_finite()) {
            return Err(DataError::NonFinite {
                symbol: symbol.clone(),
                index,
            });
        }
    }
    Ok(())
}

/// Screen every pair with the Engle-Granger test.
///
/// # Errors
/// `DataError::NonFinite` naming the first offending instrument, or
/// `DataError::InsufficientData` when the frame is too short to test.
pub fn screen_pairs(frame: &PriceFrame, pvalue_cutoff: f64) -> Result<ScreenResult, DataError> {
    let config = ScreenConfig::with_cutoff(pvalue_cutoff);
    screen_pairs_with(frame, &config, &EngleGranger::new())
}

/// Screen every pair with a caller-supplied cointegration test.
///
/// # Algorithm
/// 1. Reject non-finite data
/// 2. For each unique pair (i, j) where i < j, run `test(column i, column j)`
/// 3. Record statistic and p-value in the upper triangle
/// 4. Keep pairs with p-value strictly below the cutoff
pub fn screen_pairs_with<T: CointegrationTest + ?Sized>(
    frame: &PriceFrame,
    config: &ScreenConfig,
    test: &T,
) -> Result<ScreenResult, DataError> {
    let n = frame.width();
    let symbols = frame.symbols().to_vec();

    check_finite(frame)?;
    if n >= 2 && frame.len() < config.min_observations {
        return Err(DataError::InsufficientData {
            expected: config.min_observations,
            actual: frame.len(),
        });
    }

    info!(
        instruments = n,
        rows = frame.len(),
        cutoff = config.pvalue_cutoff,
        "Screening pairs for cointegration"
    );

    let mut score_matrix = DMatrix::from_element(n, n, NEUTRAL_SCORE);
    let mut pvalue_matrix = DMatrix::from_element(n, n, NEUTRAL_PVALUE);
    let mut candidates = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let result = test.run(frame.column_at(i), frame.column_at(j));
            score_matrix[(i, j)] = result.statistic;
            pvalue_matrix[(i, j)] = result.p_value;

            let pair = format!("{}-{}", symbols[i], symbols[j]);
            if result.p_value < config.pvalue_cutoff {
                info!(
                    pair = %pair,
                    score = format!("{:.3}", result.statistic),
                    p_value = format!("{:.4}", result.p_value),
                    "Cointegrated pair found"
                );
                candidates.push(PairCandidate {
                    symbol_a: symbols[i].clone(),
                    symbol_b: symbols[j].clone(),
                    score: result.statistic,
                    p_value: result.p_value,
                });
            } else {
                debug!(
                    pair = %pair,
                    p_value = format!("{:.4}", result.p_value),
                    "Above cutoff"
                );
            }
        }
    }

    info!(
        tested = n * n.saturating_sub(1) / 2,
        candidates = candidates.len(),
        "Screening complete"
    );

    Ok(ScreenResult {
        symbols,
        score_matrix,
        pvalue_matrix,
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic_universe;

    #[test]
    fn test_neutral_lower_triangle() {
        let frame = synthetic_universe(4, 150, 5).unwrap();
        let result = screen_pairs(&frame, 0.05).unwrap();

        for i in 0..4 {
            for j in 0..=i {
                assert_eq!(result.pvalue_matrix[(i, j)], 1.0);
                assert_eq!(result.score_matrix[(i, j)], 0.0);
            }
        }
        assert!(result.pvalue_matrix.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_finds_synthetic_pairs() {
        let frame = synthetic_universe(4, 250, 9).unwrap();
        let result = screen_pairs(&frame, 0.05).unwrap();

        let found: Vec<(String, String)> = result
            .candidates
            .iter()
            .map(|c| (c.symbol_a.clone(), c.symbol_b.clone()))
            .collect();
        assert!(found.contains(&("SYN0".to_string(), "SYN1".to_string())));
        assert!(found.contains(&("SYN2".to_string(), "SYN3".to_string())));
        assert!(result.candidates.iter().all(|c| c.p_value < 0.05));
    }

    #[test]
    fn test_non_finite_names_instrument() {
        let mut b: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
        b[17] = f64::NAN;
        let frame = PriceFrame::new(
            (0..30).collect(),
            vec![
                ("A".to_string(), (0..30).map(|i| 5.0 + i as f64).collect()),
                ("B".to_string(), b),
            ],
        )
        .unwrap();

        assert_eq!(
            screen_pairs(&frame, 0.05).unwrap_err(),
            DataError::NonFinite {
                symbol: "B".to_string(),
                index: 17
            }
        );
    }

    #[test]
    fn test_insufficient_rows() {
        let frame = synthetic_universe(2, 10, 1).unwrap();
        assert!(matches!(
            screen_pairs(&frame, 0.05),
            Err(DataError::InsufficientData { expected: 20, actual: 10 })
        ));
    }

    #[test]
    fn test_single_instrument() {
        let frame = synthetic_universe(1, 5, 1).unwrap();
        let result = screen_pairs(&frame, 0.05).unwrap();
        assert!(result.candidates.is_empty());
        assert_eq!(result.pvalue_matrix.shape(), (1, 1));
        assert_eq!(result.pvalue_matrix[(0, 0)], 1.0);
    }

    #[test]
    fn test_ranked_and_lookup() {
        let frame = synthetic_universe(4, 250, 9).unwrap();
        let result = screen_pairs(&frame, 1.0).unwrap();

        let ranked = result.ranked();
        assert_eq!(ranked.len(), result.candidates.len());
        assert!(ranked.len() >= 2);
        assert!(ranked.windows(2).all(|w| w[0].p_value <= w[1].p_value));
        assert_eq!(
            result.pvalue("SYN3", "SYN0"),
            Some(result.pvalue_matrix[(0, 3)])
        );
    }
}

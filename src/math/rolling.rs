//! Trailing window statistics.
//!
//! Every function returns a vector aligned with its input: the value at
//! index `i` summarizes samples `i + 1 - window ..= i`, and is `None` until
//! `window` samples have been seen. A window whose samples are all equal
//! yields that value as its mean and an exactly zero deviation, whatever
//! rounding the summation would introduce.

/// The shared value of a window whose samples are all equal
fn constant_value(slice: &[f64]) -> Option<f64> {
    let first = *slice.first()?;
    slice.iter().all(|v| *v == first).then_some(first)
}

/// Trailing simple moving average.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            if let Some(value) = constant_value(slice) {
                return Some(value);
            }
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}

/// Trailing sample standard deviation (n - 1 denominator).
///
/// A window of one sample has no defined deviation and yields `None`.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            if constant_value(slice).is_some() {
                return Some(0.0);
            }
            let n = window as f64;
            let mean = slice.iter().sum::<f64>() / n;
            let variance = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            Some(variance.sqrt())
        })
        .collect()
}

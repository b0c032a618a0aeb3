//! Common Types Module
//!
//! Price data shared by the screener, the spread trader, and the loaders.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A single observation of one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp (seconds)
    pub timestamp: i64,
    /// Observed price, always finite and positive once inside a `PriceSeries`
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Ordered, validated price history for one instrument.
///
/// Timestamps are strictly increasing and every price is finite and > 0.
/// The series is immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, validating ordering and price sanity.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, DataError> {
        let symbol = symbol.into();

        for (index, point) in points.iter().enumerate() {
            if !point.price.is_finite() {
                return Err(DataError::NonFinite { symbol, index });
            }
            if point.price <= 0.0 {
                return Err(DataError::NonPositivePrice {
                    symbol,
                    index,
                    price: point.price,
                });
            }
            if index > 0 && point.timestamp <= points[index - 1].timestamp {
                return Err(DataError::UnorderedTimestamps { symbol, index });
            }
        }

        Ok(Self { symbol, points })
    }

    /// Build a series from parallel timestamp and price vectors.
    pub fn from_parts(
        symbol: impl Into<String>,
        timestamps: &[i64],
        prices: &[f64],
    ) -> Result<Self, DataError> {
        let symbol = symbol.into();
        if timestamps.len() != prices.len() {
            return Err(DataError::LengthMismatch {
                symbol,
                expected: timestamps.len(),
                actual: prices.len(),
            });
        }
        let points = timestamps
            .iter()
            .zip(prices)
            .map(|(&t, &p)| PricePoint::new(t, p))
            .collect();
        Self::new(symbol, points)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn timestamps(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }
}

/// An aligned table of prices: one shared timestamp index, one column per symbol.
///
/// Column order is insertion order and determines matrix indices in the
/// screener. Columns may hold NaN gaps (as loaded from CSV); consumers that
/// need finite data check for it themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceFrame {
    index: Vec<i64>,
    symbols: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl PriceFrame {
    /// Build a frame from an index and named columns.
    pub fn new(index: Vec<i64>, columns: Vec<(String, Vec<f64>)>) -> Result<Self, DataError> {
        if let Some(pos) = index.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DataError::UnorderedTimestamps {
                symbol: "index".to_string(),
                index: pos + 1,
            });
        }

        let mut seen = HashSet::with_capacity(columns.len());
        let mut symbols = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());

        for (symbol, values) in columns {
            if !seen.insert(symbol.clone()) {
                return Err(DataError::DuplicateSymbol(symbol));
            }
            if values.len() != index.len() {
                return Err(DataError::LengthMismatch {
                    symbol,
                    expected: index.len(),
                    actual: values.len(),
                });
            }
            symbols.push(symbol);
            data.push(values);
        }

        Ok(Self {
            index,
            symbols,
            columns: data,
        })
    }

    /// Align several series on the intersection of their timestamps.
    ///
    /// Timestamps missing from any series are dropped from all of them.
    pub fn align(series: &[PriceSeries]) -> Result<Self, DataError> {
        let mut common: Option<HashSet<i64>> = None;
        for s in series {
            let stamps: HashSet<i64> = s.points().iter().map(|p| p.timestamp).collect();
            common = match common {
                Some(existing) => Some(existing.intersection(&stamps).copied().collect()),
                None => Some(stamps),
            };
        }

        let mut index: Vec<i64> = common.unwrap_or_default().into_iter().collect();
        index.sort_unstable();

        let columns = series
            .iter()
            .map(|s| {
                let by_time: HashMap<i64, f64> =
                    s.points().iter().map(|p| (p.timestamp, p.price)).collect();
                let aligned = index
                    .iter()
                    .map(|ts| by_time.get(ts).copied().unwrap_or(f64::NAN))
                    .collect();
                (s.symbol().to_string(), aligned)
            })
            .collect();

        Self::new(index, columns)
    }

    pub fn index(&self) -> &[i64] {
        &self.index
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of instruments
    pub fn width(&self) -> usize {
        self.symbols.len()
    }

    pub fn column(&self, symbol: &str) -> Option<&[f64]> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn column_at(&self, i: usize) -> &[f64] {
        &self.columns[i]
    }

    /// Two columns by name, or `UnknownSymbol`.
    pub fn pair(&self, a: &str, b: &str) -> Result<(&[f64], &[f64]), DataError> {
        let col_a = self
            .column(a)
            .ok_or_else(|| DataError::UnknownSymbol(a.to_string()))?;
        let col_b = self
            .column(b)
            .ok_or_else(|| DataError::UnknownSymbol(b.to_string()))?;
        Ok((col_a, col_b))
    }

    /// Chronological split: the first `ratio` share of rows, then the rest.
    ///
    /// Both halves must be non-empty.
    pub fn split(&self, ratio: f64) -> Result<(PriceFrame, PriceFrame), DataError> {
        let n = self.len();
        let cut = if ratio > 0.0 && ratio < 1.0 {
            (n as f64 * ratio).floor() as usize
        } else {
            0
        };
        if cut == 0 || cut >= n {
            return Err(DataError::InsufficientData {
                expected: 2,
                actual: n,
            });
        }
        Ok((self.slice(0, cut), self.slice(cut, n)))
    }

    fn slice(&self, start: usize, end: usize) -> PriceFrame {
        PriceFrame {
            index: self.index[start..end].to_vec(),
            symbols: self.symbols.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| c[start..end].to_vec())
                .collect(),
        }
    }
}

/// A pair that passed the cointegration screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCandidate {
    /// First symbol (dependent leg of the Engle-Granger regression)
    pub symbol_a: String,
    /// Second symbol
    pub symbol_b: String,
    /// Engle-Granger test statistic (more negative = stronger cointegration)
    pub score: f64,
    /// MacKinnon p-value of the statistic
    pub p_value: f64,
}

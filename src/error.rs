//! Error types for price data validation

use thiserror::Error;

/// Errors raised when price data is malformed, misaligned, or non-finite.
///
/// Research code fails loudly here: a bad input never turns into a quietly
/// meaningless statistic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// A NaN or infinite value where a price was expected
    #[error("Non-finite value in {symbol} at row {index}")]
    NonFinite { symbol: String, index: usize },

    /// A zero or negative price
    #[error("Non-positive price {price} in {symbol} at row {index}")]
    NonPositivePrice {
        symbol: String,
        index: usize,
        price: f64,
    },

    /// Timestamps must be strictly increasing
    #[error("Timestamps of {symbol} are not strictly increasing at row {index}")]
    UnorderedTimestamps { symbol: String, index: usize },

    /// A column whose length differs from the shared index
    #[error("Length mismatch for {symbol}: expected {expected} rows, got {actual}")]
    LengthMismatch {
        symbol: String,
        expected: usize,
        actual: usize,
    },

    /// The same symbol appears twice in one universe
    #[error("Duplicate symbol: {0}")]
    DuplicateSymbol(String),

    /// A symbol that is not part of the frame
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// Not enough observations to run the requested analysis
    #[error("Insufficient data: expected at least {expected} data points, got {actual}")]
    InsufficientData { expected: usize, actual: usize },
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// I/O error reading a config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON config
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a JSON config file into `T`.
pub fn load_json_config<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, ConfigError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

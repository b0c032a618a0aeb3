//! Price data sources: CSV files and synthetic universes.

pub mod io;
pub mod synthetic;

pub use io::{load_column, load_price_frame, write_zscore_csv, CsvSource, LoadError};
pub use synthetic::{synthetic_universe, Lcg};

//! Pair Screening Module
//!
//! Finds cointegrated pairs in a universe of aligned price series.
//!
//! # Example
//!
//! ```
//! use pairlab::data::synthetic_universe;
//! use pairlab::screening::screen_pairs;
//!
//! let frame = synthetic_universe(4, 200, 7)?;
//! let result = screen_pairs(&frame, 0.05)?;
//! for pair in result.ranked() {
//!     println!("{}/{}: p = {:.4}", pair.symbol_a, pair.symbol_b, pair.p_value);
//! }
//! # Ok::<(), pairlab::error::DataError>(())
//! ```

pub mod config;
pub mod screener;

pub use config::ScreenConfig;
pub use screener::{screen_pairs, screen_pairs_with, ScreenResult};

pub mod benford;
pub mod cli;
pub mod cointegration;
pub mod commands;
pub mod data;
pub mod error;
pub mod math;
pub mod report;
pub mod screening;
pub mod trading;
pub mod types;

pub use error::DataError;
pub use screening::{screen_pairs, ScreenResult};
pub use trading::{simulate_spread_trade, SpreadTrader};
pub use types::{PairCandidate, PriceFrame, PriceSeries};

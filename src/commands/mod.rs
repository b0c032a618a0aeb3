//! CLI command handlers.
//!
//! This module contains the implementation for each CLI subcommand,
//! delegating to the screening, trading, and Benford pipelines.

mod benford;
mod screen;
mod simulate;
mod sweep;

pub use benford::run_benford;
pub use screen::run_screen;
pub use simulate::run_simulate;
pub use sweep::run_sweep;

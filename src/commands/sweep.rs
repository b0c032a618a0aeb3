//! Sweep command handler.
//!
//! Implements the `sweep` subcommand: grid-search the trader's windows on
//! a training slice and replay the best choice on held-out rows.

use crate::cli::SweepCliConfig;
use crate::report::{money, ReportWriter, SweepReport};
use crate::trading::walk_forward;

use tracing::info;

/// Number of in-sample combinations echoed to the log
const TOP_N: usize = 5;

/// Run the walk-forward window sweep.
///
/// # Errors
/// Returns error if loading, splitting or report writing fails.
pub fn run_sweep(config: SweepCliConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- Running Window Sweep ---");
    info!(
        leg_a = %config.leg_a,
        leg_b = %config.leg_b,
        combinations = config.grid.combinations().len(),
        train_ratio = config.train_ratio,
        "Sweep configuration"
    );

    let frame = config.input.load()?;
    let result = walk_forward(
        &frame,
        &config.leg_a,
        &config.leg_b,
        &config.grid,
        config.train_ratio,
    )?;

    info!("--- In-Sample Ranking (top {}) ---", TOP_N);
    for r in result.in_sample.iter().take(TOP_N) {
        info!(
            "w1={:<3} w2={:<3} pnl={} trades={}",
            r.window1,
            r.window2,
            money(r.pnl),
            r.trades
        );
    }
    info!(
        "Out-of-sample: w1={} w2={} pnl={} trades={}",
        result.best.window1,
        result.best.window2,
        money(result.test_pnl),
        result.test_trades
    );

    let report = SweepReport::new(&result, config.train_ratio);
    ReportWriter::new(config.output).write_once(&report)?;

    Ok(())
}

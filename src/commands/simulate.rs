//! Simulate command handler.
//!
//! Implements the `simulate` subcommand: run the z-score spread trader on
//! one pair and report realized P&L and the event log.

use crate::cli::SimulateCliConfig;
use crate::data::write_zscore_csv;
use crate::report::{money, ReportWriter, SimulationReport};

use tracing::{info, warn};

/// Run one spread trading simulation.
///
/// # Errors
/// Returns error if loading, alignment or output fails.
pub fn run_simulate(config: SimulateCliConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- Running Spread Simulation ---");
    let trader = config.trader;
    info!(
        leg_a = %config.leg_a,
        leg_b = %config.leg_b,
        window1 = trader.window1,
        window2 = trader.window2,
        entry_z = trader.entry_threshold,
        exit_z = trader.exit_threshold,
        "Simulation configuration"
    );

    let frame = config.input.load()?;
    let (s1, s2) = frame.pair(&config.leg_a, &config.leg_b)?;
    if frame.len() < trader.window2 {
        warn!(
            rows = frame.len(),
            window2 = trader.window2,
            "Fewer rows than the long window, no z-score will be defined"
        );
    }

    let outcome = trader.run(s1, s2);

    if let Some(path) = &config.zscores {
        write_zscore_csv(path, frame.index(), &outcome.ratios, &outcome.zscores)?;
    }

    let last_prices = s1.last().copied().zip(s2.last().copied());
    let report = SimulationReport::new(
        (config.leg_a.as_str(), config.leg_b.as_str()),
        (trader.window1, trader.window2),
        &outcome,
        last_prices,
    );

    info!("--- Simulation Results ---");
    info!("Realized P&L:   {}", money(outcome.pnl));
    info!("Entries:        {}", outcome.entries());
    info!("Events:         {}", outcome.events.len());
    info!("Open position:  A={} B={}", report.open_count_a, report.open_count_b);
    info!("Unrealized:     {}", report.unrealized);
    info!("--------------------------");

    ReportWriter::new(config.output).write_once(&report)?;

    Ok(())
}

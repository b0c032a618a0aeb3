//! Screen command handler.
//!
//! Implements the `screen` subcommand: load a universe, test every pair
//! for cointegration and report the candidates.

use crate::cli::ScreenCliConfig;
use crate::report::{ReportWriter, ScreenReport};
use crate::screening::screen_pairs_with;

use tracing::{info, warn};

/// Run the pairwise cointegration screen.
///
/// # Errors
/// Returns error if loading, screening or report writing fails.
pub fn run_screen(config: ScreenCliConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- Running Pair Screen ---");

    let frame = config.input.load()?;
    info!(
        instruments = frame.width(),
        rows = frame.len(),
        cutoff = config.screen.pvalue_cutoff,
        "Universe loaded"
    );

    let result = screen_pairs_with(&frame, &config.screen, &config.screen.test())?;

    if result.candidates.is_empty() {
        warn!("No cointegrated pairs below the cutoff");
    }
    for (rank, pair) in result.ranked().iter().enumerate() {
        info!(
            "#{:<3} {}/{}  score={:.3}  p={:.4}",
            rank + 1,
            pair.symbol_a,
            pair.symbol_b,
            pair.score,
            pair.p_value
        );
    }

    let report = ScreenReport::new(&result, frame.len(), config.screen.pvalue_cutoff);
    ReportWriter::new(config.output).write_once(&report)?;

    Ok(())
}

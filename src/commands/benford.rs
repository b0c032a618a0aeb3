//! Benford command handler.

use crate::benford::analyze;
use crate::cli::BenfordCliConfig;
use crate::data::load_column;
use crate::report::{BenfordOutput, ReportWriter};

use chrono::Utc;
use tracing::info;

/// Run the first-digit check on one CSV column.
///
/// # Errors
/// Returns error if the column is missing, has no usable values, or the
/// report cannot be written.
pub fn run_benford(config: BenfordCliConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- Running Benford Check ---");

    let values = load_column(&config.input, &config.column)?;
    let report = analyze(&values)?;

    for row in &report.digits {
        info!(
            "{}  observed={:.4}  expected={:.4}  n={}",
            row.digit, row.observed, row.expected, row.count
        );
    }
    info!(
        "chi2={:.3} (5% critical 15.507)  p={:.4}  MAD={:.5}  {:?}",
        report.chi_square, report.p_value, report.mad, report.conformity
    );

    let output = BenfordOutput {
        generated_at: Utc::now(),
        source: config.input.display().to_string(),
        column: config.column,
        report,
    };
    ReportWriter::new(config.output).write_once(&output)?;

    Ok(())
}

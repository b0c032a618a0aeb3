//! CLI argument parsing using clap.
//!
//! This module defines the command-line interface for pairlab,
//! including all subcommands and their arguments.

mod config;

pub use config::{
    BenfordCliConfig, CliConfigError, InputSource, ScreenCliConfig, SimulateCliConfig,
    SweepCliConfig,
};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// pairlab - Cointegration screening and spread trading research
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Set the verbosity level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub verbose: String,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Screen every pair of instruments for cointegration
    Screen(ScreenArgs),
    /// Simulate the z-score spread trader on one pair
    Simulate(SimulateArgs),
    /// Grid-search window lengths with a train/test split
    Sweep(SweepArgs),
    /// Check a numeric column against Benford's law
    Benford(BenfordArgs),
}

/// Price input shared by the pair commands
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Wide price CSV: one timestamp column plus one column per instrument
    #[arg(long, required_unless_present = "synthetic")]
    pub input: Option<PathBuf>,
    /// Timestamp column name (default: first column)
    #[arg(long)]
    pub timestamp_column: Option<String>,
    /// Generate N synthetic instruments instead of reading a file (for CI)
    #[arg(long, conflicts_with = "input")]
    pub synthetic: Option<usize>,
    /// Rows of synthetic data
    #[arg(long, default_value_t = 500)]
    pub rows: usize,
    /// Seed for synthetic data
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ScreenArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Instruments to screen (comma-separated, default: all columns)
    #[arg(long, conflicts_with = "synthetic")]
    pub symbols: Option<String>,
    /// Report pairs with a p-value strictly below this
    #[arg(long)]
    pub cutoff: Option<f64>,
    /// JSON screening config (pvalue_cutoff, max_lag, min_observations)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output file for the JSON report (default: stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// First leg (numerator of the ratio)
    #[arg(long)]
    pub leg_a: String,
    /// Second leg (denominator of the ratio)
    #[arg(long)]
    pub leg_b: String,
    /// Short moving-average window
    #[arg(long, default_value_t = 5)]
    pub window1: usize,
    /// Long moving-average and deviation window
    #[arg(long, default_value_t = 60)]
    pub window2: usize,
    /// Z-score entry threshold
    #[arg(long, default_value_t = 1.0)]
    pub entry_z: f64,
    /// Z-score exit threshold
    #[arg(long, default_value_t = 0.75)]
    pub exit_z: f64,
    /// Write per-step ratio and z-score CSV here
    #[arg(long)]
    pub zscores: Option<PathBuf>,
    /// Output file for the JSON report (default: stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// First leg (numerator of the ratio)
    #[arg(long)]
    pub leg_a: String,
    /// Second leg (denominator of the ratio)
    #[arg(long)]
    pub leg_b: String,
    /// Share of rows used for the in-sample sweep
    #[arg(long, default_value_t = 0.7)]
    pub train_ratio: f64,
    /// JSON window grid (short_windows, long_windows)
    #[arg(long)]
    pub grid: Option<PathBuf>,
    /// Output file for the JSON report (default: stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct BenfordArgs {
    /// CSV file holding the column
    #[arg(long)]
    pub input: PathBuf,
    /// Column to analyze
    #[arg(long, default_value = "close")]
    pub column: String,
    /// Output file for the JSON report (default: stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

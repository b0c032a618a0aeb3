//! CLI configuration structs bridging CLI arguments to domain types.
//!
//! These structs decouple the CLI parsing layer from the research code,
//! allowing command handlers to work with validated, typed configurations.

use super::{BenfordArgs, InputArgs, ScreenArgs, SimulateArgs, SweepArgs};
use crate::data::{load_price_frame, synthetic_universe, CsvSource, LoadError};
use crate::error::{load_json_config, ConfigError};
use crate::screening::ScreenConfig;
use crate::trading::{SpreadTrader, SweepGrid};
use crate::types::PriceFrame;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when turning CLI arguments into a run configuration.
#[derive(Debug, Error)]
pub enum CliConfigError {
    #[error("Window lengths must be positive, got window1={0}, window2={1}")]
    InvalidWindow(usize, usize),

    #[error("Exit threshold {exit} must be non-negative and below entry threshold {entry}")]
    InvalidThresholds { entry: f64, exit: f64 },

    #[error("Train ratio must be in (0, 1), got {0}")]
    InvalidTrainRatio(f64),

    #[error("Legs must differ, got {0} twice")]
    SameLeg(String),

    #[error("At least two instruments are required, got {0}")]
    TooFewInstruments(usize),

    #[error("Either --input or --synthetic is required")]
    MissingInput,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Where prices come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Csv { path: PathBuf, source: CsvSource },
    Synthetic { instruments: usize, rows: usize, seed: u64 },
}

impl InputSource {
    fn from_args(args: &InputArgs, symbols: Option<Vec<String>>) -> Result<Self, CliConfigError> {
        match (&args.input, args.synthetic) {
            (_, Some(instruments)) => {
                if instruments < 2 {
                    return Err(CliConfigError::TooFewInstruments(instruments));
                }
                Ok(Self::Synthetic {
                    instruments,
                    rows: args.rows,
                    seed: args.seed,
                })
            }
            (Some(path), None) => Ok(Self::Csv {
                path: path.clone(),
                source: CsvSource {
                    timestamp_column: args.timestamp_column.clone(),
                    symbols,
                },
            }),
            (None, None) => Err(CliConfigError::MissingInput),
        }
    }

    /// Load or generate the price frame.
    pub fn load(&self) -> Result<PriceFrame, LoadError> {
        match self {
            Self::Csv { path, source } => load_price_frame(path, source),
            Self::Synthetic {
                instruments,
                rows,
                seed,
            } => Ok(synthetic_universe(*instruments, *rows, *seed)?),
        }
    }
}

/// Split a comma-separated symbol list, dropping blanks.
fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Two distinct legs, also used as the CSV column selection.
fn pair_columns(leg_a: &str, leg_b: &str) -> Result<Vec<String>, CliConfigError> {
    if leg_a == leg_b {
        return Err(CliConfigError::SameLeg(leg_a.to_string()));
    }
    Ok(vec![leg_a.to_string(), leg_b.to_string()])
}

/// CLI configuration for the `screen` command.
#[derive(Debug, Clone)]
pub struct ScreenCliConfig {
    pub input: InputSource,
    /// Validated screening parameters
    pub screen: ScreenConfig,
    pub output: Option<PathBuf>,
}

impl TryFrom<ScreenArgs> for ScreenCliConfig {
    type Error = CliConfigError;

    /// Merge the JSON config file (if any) with the `--cutoff` override.
    fn try_from(args: ScreenArgs) -> Result<Self, Self::Error> {
        let mut screen: ScreenConfig = match &args.config {
            Some(path) => load_json_config(path)?,
            None => ScreenConfig::default(),
        };
        if let Some(cutoff) = args.cutoff {
            screen.pvalue_cutoff = cutoff;
        }
        screen.validate()?;

        let symbols = args.symbols.as_deref().map(parse_symbols);
        Ok(Self {
            input: InputSource::from_args(&args.input, symbols)?,
            screen,
            output: args.output,
        })
    }
}

/// CLI configuration for the `simulate` command.
#[derive(Debug, Clone)]
pub struct SimulateCliConfig {
    pub input: InputSource,
    pub leg_a: String,
    pub leg_b: String,
    pub trader: SpreadTrader,
    pub zscores: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl SimulateCliConfig {
    /// Validate windows and thresholds.
    pub fn build_trader(
        window1: usize,
        window2: usize,
        entry_z: f64,
        exit_z: f64,
    ) -> Result<SpreadTrader, CliConfigError> {
        if window1 == 0 || window2 == 0 {
            return Err(CliConfigError::InvalidWindow(window1, window2));
        }
        if !(exit_z >= 0.0 && exit_z < entry_z) {
            return Err(CliConfigError::InvalidThresholds {
                entry: entry_z,
                exit: exit_z,
            });
        }
        Ok(SpreadTrader::new(window1, window2).with_thresholds(entry_z, exit_z))
    }
}

impl TryFrom<SimulateArgs> for SimulateCliConfig {
    type Error = CliConfigError;

    fn try_from(args: SimulateArgs) -> Result<Self, Self::Error> {
        let columns = pair_columns(&args.leg_a, &args.leg_b)?;
        Ok(Self {
            input: InputSource::from_args(&args.input, Some(columns))?,
            trader: Self::build_trader(args.window1, args.window2, args.entry_z, args.exit_z)?,
            leg_a: args.leg_a,
            leg_b: args.leg_b,
            zscores: args.zscores,
            output: args.output,
        })
    }
}

/// CLI configuration for the `sweep` command.
#[derive(Debug, Clone)]
pub struct SweepCliConfig {
    pub input: InputSource,
    pub leg_a: String,
    pub leg_b: String,
    pub train_ratio: f64,
    pub grid: SweepGrid,
    pub output: Option<PathBuf>,
}

impl TryFrom<SweepArgs> for SweepCliConfig {
    type Error = CliConfigError;

    fn try_from(args: SweepArgs) -> Result<Self, Self::Error> {
        let columns = pair_columns(&args.leg_a, &args.leg_b)?;
        if !(args.train_ratio > 0.0 && args.train_ratio < 1.0) {
            return Err(CliConfigError::InvalidTrainRatio(args.train_ratio));
        }
        let grid: SweepGrid = match &args.grid {
            Some(path) => load_json_config(path)?,
            None => SweepGrid::default(),
        };
        grid.validate()?;

        Ok(Self {
            input: InputSource::from_args(&args.input, Some(columns))?,
            leg_a: args.leg_a,
            leg_b: args.leg_b,
            train_ratio: args.train_ratio,
            grid,
            output: args.output,
        })
    }
}

/// CLI configuration for the `benford` command.
#[derive(Debug, Clone)]
pub struct BenfordCliConfig {
    pub input: PathBuf,
    pub column: String,
    pub output: Option<PathBuf>,
}

impl From<BenfordArgs> for BenfordCliConfig {
    fn from(args: BenfordArgs) -> Self {
        Self {
            input: args.input,
            column: args.column,
            output: args.output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_args(path: &str) -> InputArgs {
        InputArgs {
            input: Some(PathBuf::from(path)),
            timestamp_column: Some("date".to_string()),
            synthetic: None,
            rows: 500,
            seed: 42,
        }
    }

    fn screen_args(cutoff: Option<f64>, config: Option<PathBuf>) -> ScreenArgs {
        ScreenArgs {
            input: csv_args("p.csv"),
            symbols: Some("A, B".to_string()),
            cutoff,
            config,
            output: None,
        }
    }

    fn sweep_args(leg_b: &str, train_ratio: f64) -> SweepArgs {
        SweepArgs {
            input: csv_args("p.csv"),
            leg_a: "A".to_string(),
            leg_b: leg_b.to_string(),
            train_ratio,
            grid: None,
            output: None,
        }
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!(parse_symbols("A, B,,C "), vec!["A", "B", "C"]);
        assert!(parse_symbols("").is_empty());
    }

    #[test]
    fn test_screen_cutoff_override() {
        let config = ScreenCliConfig::try_from(screen_args(Some(0.1), None)).unwrap();
        assert_eq!(config.screen.pvalue_cutoff, 0.1);
        assert_eq!(
            config.input,
            InputSource::Csv {
                path: PathBuf::from("p.csv"),
                source: CsvSource {
                    timestamp_column: Some("date".to_string()),
                    symbols: Some(vec!["A".to_string(), "B".to_string()]),
                },
            }
        );
    }

    #[test]
    fn test_screen_rejects_bad_cutoff() {
        let result = ScreenCliConfig::try_from(screen_args(Some(2.0), None));
        assert!(matches!(result, Err(CliConfigError::Config(_))));
    }

    #[test]
    fn test_screen_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"pvalue_cutoff": 0.01, "min_observations": 50}"#)
            .unwrap();

        let args = screen_args(None, Some(file.path().to_path_buf()));
        let config = ScreenCliConfig::try_from(args).unwrap();
        assert_eq!(config.screen.pvalue_cutoff, 0.01);
        assert_eq!(config.screen.min_observations, 50);
    }

    #[test]
    fn test_synthetic_needs_two_instruments() {
        let args = InputArgs {
            input: None,
            timestamp_column: None,
            synthetic: Some(1),
            rows: 100,
            seed: 1,
        };
        assert!(matches!(
            InputSource::from_args(&args, None),
            Err(CliConfigError::TooFewInstruments(1))
        ));
    }

    #[test]
    fn test_synthetic_source_loads() {
        let source = InputSource::Synthetic {
            instruments: 3,
            rows: 40,
            seed: 2,
        };
        let frame = source.load().unwrap();
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.len(), 40);
    }

    #[test]
    fn test_trader_validation() {
        assert!(SimulateCliConfig::build_trader(5, 60, 1.0, 0.75).is_ok());
        assert!(matches!(
            SimulateCliConfig::build_trader(0, 60, 1.0, 0.75),
            Err(CliConfigError::InvalidWindow(0, 60))
        ));
        assert!(SimulateCliConfig::build_trader(5, 60, 1.0, 1.5).is_err());
        assert!(SimulateCliConfig::build_trader(5, 60, 1.0, -0.1).is_err());
    }

    #[test]
    fn test_sweep_validation() {
        assert!(matches!(
            SweepCliConfig::try_from(sweep_args("A", 0.7)),
            Err(CliConfigError::SameLeg(_))
        ));
        assert!(matches!(
            SweepCliConfig::try_from(sweep_args("B", 1.0)),
            Err(CliConfigError::InvalidTrainRatio(_))
        ));
        let config = SweepCliConfig::try_from(sweep_args("B", 0.7)).unwrap();
        assert_eq!(config.grid, SweepGrid::default());
    }
}

//! Configuration for cointegration screening

use crate::cointegration::EngleGranger;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for the pairwise screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Pairs with a p-value strictly below this are reported
    #[serde(default = "default_pvalue_cutoff")]
    pub pvalue_cutoff: f64,

    /// Cap on the ADF lag search (default: Schwert's rule)
    #[serde(default)]
    pub max_lag: Option<usize>,

    /// Minimum rows required before any test is run
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,
}

// Default value functions for serde
fn default_pvalue_cutoff() -> f64 {
    0.05
}
fn default_min_observations() -> usize {
    20
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            pvalue_cutoff: default_pvalue_cutoff(),
            max_lag: None,
            min_observations: default_min_observations(),
        }
    }
}

impl ScreenConfig {
    /// Create a config with a custom cutoff
    pub fn with_cutoff(pvalue_cutoff: f64) -> Self {
        Self {
            pvalue_cutoff,
            ..Default::default()
        }
    }

    /// The Engle-Granger collaborator this config describes
    pub fn test(&self) -> EngleGranger {
        match self.max_lag {
            Some(lag) => EngleGranger::with_max_lag(lag),
            None => EngleGranger::new(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pvalue_cutoff > 0.0 && self.pvalue_cutoff <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "pvalue_cutoff must be in (0, 1], got {}",
                self.pvalue_cutoff
            )));
        }
        if self.min_observations < 4 {
            return Err(ConfigError::Invalid(format!(
                "min_observations must be at least 4, got {}",
                self.min_observations
            )));
        }
        Ok(())
    }
}

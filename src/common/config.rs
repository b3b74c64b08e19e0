//! Analyzer configuration
//!
//! Settings may be built in code or loaded from a JSON document.

use crate::common::constants::DEFAULT_MAX_ANALYSIS_ITERATIONS;
use crate::common::error::{PrismError, PrismResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum number of rule passes before analysis fails
    pub max_iterations: usize,
    /// Emit per-rule debug log lines
    pub debug: bool,
}

impl AnalyzerConfig {
    /// Configuration with debug logging switched on
    pub fn debug() -> Self {
        Self {
            debug: true,
            ..Default::default()
        }
    }

    /// Parse a configuration from a JSON string; missing keys take defaults
    pub fn from_json(json: &str) -> PrismResult<Self> {
        let config: AnalyzerConfig =
            serde_json::from_str(json).map_err(|e| PrismError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> PrismResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn validate(&self) -> PrismResult<()> {
        if self.max_iterations == 0 {
            return Err(PrismError::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            max_iterations: DEFAULT_MAX_ANALYSIS_ITERATIONS,
            debug: false,
        }
    }
}

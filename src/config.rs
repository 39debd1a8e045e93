//! File-level configuration for the command-line front end.
//!
//! A TOML file with optional `[ga]` and `[backtrack]` tables. Missing
//! fields take their defaults.
//!
//! ```toml
//! [ga]
//! population_size = 150
//! max_generations = 500
//! halt_policy = "undo_last"
//! tournament = { fixed = 4 }
//!
//! [backtrack]
//! time_limit_ms = 5000
//! ```

use crate::backtrack::BacktrackConfig;
use crate::error::Result;
use crate::ga::GaConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub ga: GaConfig,
    pub backtrack: BacktrackConfig,
}

impl RunConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.ga.validate()?;
        self.backtrack.validate()
    }
}

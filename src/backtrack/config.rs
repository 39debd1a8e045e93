//! Backtracking search limits.

use crate::error::{Result, TourError};
use serde::{Deserialize, Serialize};

/// Limits for [`BacktrackSolver`](super::BacktrackSolver).
///
/// Both limits are caller policy: with neither set the search runs until it
/// finds a tour or proves none extends the starting assignment.
///
/// ```
/// use knights_tour::backtrack::BacktrackConfig;
///
/// let config = BacktrackConfig::default().with_time_limit_ms(2_000);
/// assert_eq!(config.time_limit_ms, Some(2_000));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktrackConfig {
    /// Maximum number of search nodes (assignments extended).
    pub node_limit: Option<u64>,
    /// Maximum wall-clock time in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl Default for BacktrackConfig {
    fn default() -> Self {
        Self {
            node_limit: Some(50_000_000),
            time_limit_ms: None,
        }
    }
}

impl BacktrackConfig {
    /// No node or time limit.
    pub fn unbounded() -> Self {
        Self {
            node_limit: None,
            time_limit_ms: None,
        }
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.node_limit == Some(0) {
            return Err(TourError::InvalidConfig(
                "node_limit must be positive or None".into(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(TourError::InvalidConfig(
                "time_limit_ms must be positive or None".into(),
            ));
        }
        Ok(())
    }
}

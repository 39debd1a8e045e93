//! Error type shared by every module.

use thiserror::Error;

/// Errors raised by validation, configuration, and artifact I/O.
///
/// Search outcomes are never errors: a short genetic path or an exhausted
/// backtracking search is reported through the result types.
#[derive(Error, Debug)]
pub enum TourError {
    #[error("invalid genome length: expected {expected}, got {actual}")]
    InvalidGenomeLength { expected: usize, actual: usize },

    #[error("invalid direction {0}: must be in 1..=8")]
    InvalidDirection(u8),

    #[error("position ({x}, {y}) is off the board")]
    InvalidPosition { x: i32, y: i32 },

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TourError>;

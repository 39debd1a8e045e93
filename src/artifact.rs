//! The persisted solution record.
//!
//! Both solvers hand their result to the outside world as a
//! [`TourArtifact`] written to JSON. Renderers read it and never write
//! it back.
//!
//! ```json
//! {
//!   "fitness": 3,
//!   "path": [[0, 0], [2, 1], [4, 2]],
//!   "total_moves": 3
//! }
//! ```

use crate::board::{apply, check_path, Direction, Position, SQUARES};
use crate::error::{Result, TourError};
use crate::ga::GENOME_LEN;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name the renderers look for by default.
pub const DEFAULT_FILE_NAME: &str = "knight_solution.json";

/// A tour (possibly partial) ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourArtifact {
    /// Number of squares visited; equals `path.len()`.
    pub fitness: usize,
    /// Squares in visiting order, starting at `[0, 0]`.
    pub path: Vec<Position>,
    /// Genome that produced the path, when it came from the GA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chromosome: Option<Vec<Direction>>,
    /// Same as `fitness`; kept for renderers that read this field.
    pub total_moves: usize,
}

impl TourArtifact {
    pub fn from_path(path: Vec<Position>) -> Self {
        Self {
            fitness: path.len(),
            total_moves: path.len(),
            path,
            chromosome: None,
        }
    }

    pub fn with_chromosome(mut self, chromosome: Vec<Direction>) -> Self {
        self.chromosome = Some(chromosome);
        self
    }

    /// Whether the path visits every square.
    pub fn is_complete(&self) -> bool {
        self.path.len() == SQUARES
    }

    /// Checks internal consistency.
    ///
    /// The counts must match the path, the path must be a legal partial
    /// tour from the origin, and a chromosome (if any) must hold
    /// [`GENOME_LEN`] genes whose leading moves replay the path.
    pub fn validate(&self) -> Result<()> {
        if self.fitness != self.path.len() || self.total_moves != self.path.len() {
            return Err(TourError::InvalidArtifact(format!(
                "fitness {} and total_moves {} must equal path length {}",
                self.fitness,
                self.total_moves,
                self.path.len()
            )));
        }
        check_path(&self.path)?;

        if let Some(genes) = &self.chromosome {
            if genes.len() != GENOME_LEN {
                return Err(TourError::InvalidGenomeLength {
                    expected: GENOME_LEN,
                    actual: genes.len(),
                });
            }
            for (i, (w, &gene)) in self.path.windows(2).zip(genes).enumerate() {
                if apply(w[0], gene) != w[1] {
                    return Err(TourError::InvalidArtifact(format!(
                        "chromosome gene {i} ({}) does not lead from {} to {}",
                        gene.value(),
                        w[0],
                        w[1]
                    )));
                }
            }
        }
        Ok(())
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: Self = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reads and validates an artifact file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

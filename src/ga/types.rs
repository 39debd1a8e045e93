//! Genome and individual types for the tour GA.
//!
//! A [`Genome`] is a fixed-length sequence of knight directions. A
//! [`Knight`] owns one genome together with the path obtained by decoding
//! it; the path and visited set are derived data and are rebuilt by
//! [`Knight::check_moves`].

use super::decoder::{decode, Decoded, HaltPolicy};
use crate::board::{Direction, Position, Visited, SQUARES};
use crate::error::{Result, TourError};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of genes: one move per square after the free starting square.
pub const GENOME_LEN: usize = SQUARES - 1;

/// A candidate move sequence of exactly [`GENOME_LEN`] directions.
///
/// The length invariant is enforced at construction; serde deserialisation
/// goes through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Direction>", into = "Vec<Direction>")]
pub struct Genome(Vec<Direction>);

impl Genome {
    /// Samples every gene uniformly from `1..=8`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self((0..GENOME_LEN).map(|_| Direction::random(rng)).collect())
    }

    /// Wraps a direction vector, rejecting any length other than [`GENOME_LEN`].
    pub fn from_directions(genes: Vec<Direction>) -> Result<Self> {
        if genes.len() != GENOME_LEN {
            return Err(TourError::InvalidGenomeLength {
                expected: GENOME_LEN,
                actual: genes.len(),
            });
        }
        Ok(Self(genes))
    }

    /// Builds a genome from raw values, validating length and range.
    pub fn from_values(values: &[u8]) -> Result<Self> {
        let genes = values
            .iter()
            .map(|&v| Direction::new(v))
            .collect::<Result<Vec<_>>>()?;
        Self::from_directions(genes)
    }

    /// Encodes a complete tour as the genome that replays it.
    ///
    /// `path` must hold [`SQUARES`] positions with every adjacent pair one
    /// knight move apart.
    pub fn from_tour(path: &[Position]) -> Result<Self> {
        if path.len() != SQUARES {
            return Err(TourError::InvalidGenomeLength {
                expected: GENOME_LEN,
                actual: path.len().saturating_sub(1),
            });
        }
        let genes = path
            .windows(2)
            .map(|w| {
                Direction::between(w[0], w[1]).ok_or_else(|| {
                    TourError::InvalidPath(format!("{} -> {} is not a knight move", w[0], w[1]))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_directions(genes)
    }

    pub fn as_slice(&self) -> &[Direction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Direction> {
        self.0.get(index).copied()
    }

    /// Overwrites one gene. Used by the decoder to persist repairs.
    pub(crate) fn set(&mut self, index: usize, direction: Direction) {
        self.0[index] = direction;
    }

    /// Raw gene values, as stored in a persisted chromosome.
    pub fn to_values(&self) -> Vec<u8> {
        self.0.iter().map(|d| d.value()).collect()
    }

    pub fn into_directions(self) -> Vec<Direction> {
        self.0
    }
}

impl TryFrom<Vec<Direction>> for Genome {
    type Error = TourError;

    fn try_from(genes: Vec<Direction>) -> Result<Self> {
        Self::from_directions(genes)
    }
}

impl From<Genome> for Vec<Direction> {
    fn from(g: Genome) -> Self {
        g.0
    }
}

/// One member of the population: a genome plus its decoded path.
///
/// Fitness is the length of the decoded path, computed on demand so it
/// can never disagree with the path.
#[derive(Debug, Clone)]
pub struct Knight {
    genome: Genome,
    path: Vec<Position>,
    visited: Visited,
}

impl Knight {
    /// Creates an undecoded knight standing on the origin.
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            path: vec![Position::ORIGIN],
            visited: Visited::new().with(Position::ORIGIN),
        }
    }

    /// Creates an undecoded knight with a random genome.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(Genome::random(rng))
    }

    /// Decodes the genome into a path, repairing blocked genes in place.
    ///
    /// Returns the number of genes that were rewritten.
    pub fn check_moves(&mut self, cycle_forward: bool, policy: HaltPolicy) -> usize {
        let Decoded {
            path,
            visited,
            repairs,
            ..
        } = decode(&mut self.genome, cycle_forward, policy);
        self.path = path;
        self.visited = visited;
        repairs
    }

    /// Number of squares on the decoded path.
    pub fn fitness(&self) -> usize {
        self.path.len()
    }

    /// Whether the decoded path covers the whole board.
    pub fn is_complete(&self) -> bool {
        self.fitness() == SQUARES
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn visited(&self) -> &Visited {
        &self.visited
    }

    pub fn into_genome(self) -> Genome {
        self.genome
    }

    /// Test-only constructor for a knight with an arbitrary path.
    #[cfg(test)]
    pub(crate) fn with_path(genome: Genome, path: Vec<Position>) -> Self {
        let visited = path.iter().copied().collect();
        Self {
            genome,
            path,
            visited,
        }
    }
}

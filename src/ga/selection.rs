//! Tournament selection.
//!
//! A tournament samples `k` distinct knights uniformly and keeps the one
//! with the longest path. Larger `k` means stronger selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Knight;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Generation before which [`TournamentSize::Adaptive`] favours exploration.
pub const EARLY_GENERATIONS: usize = 50;

/// How many knights enter each tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentSize {
    /// Always use `k` contestants.
    Fixed(usize),
    /// Shrink the tournament as the run matures.
    ///
    /// Before generation [`EARLY_GENERATIONS`]: `population_size / 8`
    /// clamped to `[3, 7]`. Afterwards: `population_size / 12` clamped to
    /// `[2, 5]`.
    #[default]
    Adaptive,
}

impl TournamentSize {
    /// Concrete tournament size for this generation.
    ///
    /// The result is always in `1..=population_size` (for a non-empty
    /// population).
    pub fn resolve(&self, population_size: usize, generation: usize) -> usize {
        let k = match *self {
            TournamentSize::Fixed(k) => k,
            TournamentSize::Adaptive if generation < EARLY_GENERATIONS => {
                (population_size / 8).clamp(3, 7)
            }
            TournamentSize::Adaptive => (population_size / 12).clamp(2, 5),
        };
        k.clamp(1, population_size.max(1))
    }
}

/// Runs one tournament and returns the index of the winner.
///
/// Contestants are drawn without replacement. Ties go to the contestant
/// drawn first.
///
/// # Panics
/// Panics if `knights` is empty.
pub fn tournament<R: Rng>(knights: &[Knight], k: usize, rng: &mut R) -> usize {
    assert!(!knights.is_empty(), "cannot select from empty population");
    let k = k.clamp(1, knights.len());

    let mut best: Option<usize> = None;
    for idx in index::sample(rng, knights.len(), k) {
        match best {
            Some(b) if knights[idx].fitness() <= knights[b].fitness() => {}
            _ => best = Some(idx),
        }
    }
    best.unwrap_or(0)
}

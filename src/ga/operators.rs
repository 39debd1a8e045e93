//! Genetic operators on direction genomes.
//!
//! Operators never modify their inputs: crossover and mutation both return
//! fresh genomes. The only in-place genome edit in the crate is the repair
//! step of [`decode`](super::decode).
//!
//! # Crossover
//!
//! - [`crossover`]: single-point crossover with a uniform cut in `1..len`
//! - [`crossover_at`]: the same splice at a caller-chosen cut
//!
//! # Mutation
//!
//! - [`mutate`]: per-gene uniform resampling, rate shaped by [`MutationPolicy`]

use super::types::{Genome, GENOME_LEN};
use crate::board::Direction;
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// Crossover
// ============================================================================

/// Single-point crossover.
///
/// Picks a cut `p` uniformly in `1..GENOME_LEN` and returns
/// `(a[..p] + b[p..], b[..p] + a[p..])`.
pub fn crossover<R: Rng>(a: &Genome, b: &Genome, rng: &mut R) -> (Genome, Genome) {
    let cut = rng.random_range(1..GENOME_LEN);
    crossover_at(a, b, cut)
}

/// Single-point crossover at a fixed cut.
///
/// # Panics
/// Panics if `cut` is outside `1..GENOME_LEN`.
pub fn crossover_at(a: &Genome, b: &Genome, cut: usize) -> (Genome, Genome) {
    assert!(
        (1..GENOME_LEN).contains(&cut),
        "crossover cut {cut} outside 1..{GENOME_LEN}"
    );
    let mut child1 = a.clone();
    let mut child2 = b.clone();
    for i in cut..GENOME_LEN {
        child1.set(i, b.as_slice()[i]);
        child2.set(i, a.as_slice()[i]);
    }
    (child1, child2)
}

// ============================================================================
// Mutation
// ============================================================================

/// How the per-gene mutation probability varies along the genome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPolicy {
    /// Every gene mutates with the base rate.
    Flat,
    /// Gene `i` mutates with `min(cap, base * (1 + 0.5 * i / len))`.
    ///
    /// Later genes mutate more often, so the prefix of a long path tends
    /// to survive while its tail keeps exploring.
    PositionWeighted { cap: f64 },
}

impl Default for MutationPolicy {
    fn default() -> Self {
        MutationPolicy::PositionWeighted { cap: 0.4 }
    }
}

impl MutationPolicy {
    /// Mutation probability for gene `index` of a genome of length `len`.
    pub fn gene_rate(&self, base_rate: f64, index: usize, len: usize) -> f64 {
        match *self {
            MutationPolicy::Flat => base_rate,
            MutationPolicy::PositionWeighted { cap } => {
                let position = index as f64 / len as f64;
                (base_rate * (1.0 + position * 0.5)).min(cap)
            }
        }
    }
}

/// Returns a copy of `genome` with genes independently resampled.
///
/// For each gene a uniform roll in `[0, 1)` is compared against the
/// policy's rate; on success the gene is replaced by a uniform direction.
/// A rate of `0.0` never mutates and a rate of `1.0` always does.
pub fn mutate<R: Rng>(
    genome: &Genome,
    base_rate: f64,
    policy: MutationPolicy,
    rng: &mut R,
) -> Genome {
    let len = genome.len();
    let mut child = genome.clone();
    for i in 0..len {
        let rate = policy.gene_rate(base_rate, i, len);
        if rng.random::<f64>() < rate {
            child.set(i, Direction::random(rng));
        }
    }
    child
}

// ============================================================================
// Tests
// ============================================================================

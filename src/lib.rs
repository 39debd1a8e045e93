//! Knight's tour search on an 8×8 board.
//!
//! Two independent solvers look for a sequence of knight moves from the
//! corner `(0, 0)` that visits every square exactly once:
//!
//! - **Genetic search** ([`ga`]): a population of move-direction genomes,
//!   decoded into legal paths by a greedy repair step and evolved with
//!   tournament selection, single-point crossover, per-gene mutation, and
//!   threshold elitism. Best effort: fitness is the decoded path length.
//! - **Backtracking** ([`backtrack`]): depth-first search ordered by
//!   Warnsdorff's rule (MRV) with an LCV tiebreak. Exact.
//!
//! Either solver produces a [`TourArtifact`], the JSON record that
//! external renderers consume.
//!
//! # Architecture
//!
//! [`board`] holds the move model shared by both solvers. Neither solver
//! depends on the other; tests use the backtracking tour as a known-good
//! genome for the GA.

pub mod artifact;
pub mod backtrack;
pub mod board;
pub mod config;
pub mod error;
pub mod ga;

pub use artifact::TourArtifact;
pub use config::RunConfig;
pub use error::{Result, TourError};

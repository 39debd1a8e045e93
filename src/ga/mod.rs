//! Genetic search for knight's tours.
//!
//! Individuals ([`Knight`]) carry a [`Genome`] of 63 knight directions. A
//! genome need not describe a legal tour: the [`decode`] step walks it from
//! the origin and repairs blocked moves by probing neighbouring directions,
//! writing each repair back into the genome. Fitness is the number of
//! squares on the decoded path, so 64 means a complete tour.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, operator rates, thresholds, limits
//! - [`Population`]: one generation plus the reproduction step
//! - [`GaRunner`]: the outer loop with termination policy
//! - [`GaResult`]: best knight ever seen plus run statistics
//!
//! # Submodules
//!
//! - [`operators`]: single-point crossover and per-gene mutation
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Gordon & Slocum (2004), "The Knight's Tour – Evolutionary vs. Depth-First Search"

mod config;
mod decoder;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use decoder::{decode, decode_random, Decoded, HaltPolicy};
pub use operators::{crossover, crossover_at, mutate, MutationPolicy};
pub use population::Population;
pub use runner::{GaResult, GaRunner};
pub use selection::{tournament, TournamentSize, EARLY_GENERATIONS};
pub use types::{Genome, Knight, GENOME_LEN};

//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives a [`Population`] through
//! decode → evaluate → reproduce → repeat, and keeps the best knight ever
//! seen independently of the current population.

use super::config::GaConfig;
use super::population::Population;
use super::types::Knight;
use crate::artifact::TourArtifact;
use crate::board::SQUARES;
use crate::error::Result;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best knight found during the entire run.
    pub best: Knight,

    /// Best fitness (same as `best.fitness()`).
    pub best_fitness: usize,

    /// Number of generations evaluated.
    pub generations: usize,

    /// Whether a complete tour was found.
    pub solved: bool,

    /// Whether the run stopped because of the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped because of the time limit.
    pub timed_out: bool,

    /// Best-ever fitness after each evaluated generation.
    pub fitness_history: Vec<usize>,
}

impl GaResult {
    /// Persistable record of the best knight, chromosome included.
    pub fn to_artifact(&self) -> TourArtifact {
        TourArtifact::from_path(self.best.path().to_vec())
            .with_chromosome(self.best.genome().as_slice().to_vec())
    }
}

/// Executes the GA loop.
///
/// # Usage
///
/// ```no_run
/// use knights_tour::ga::{GaConfig, GaRunner};
///
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&config)?;
/// println!("best: {}/64", result.best_fitness);
/// # Ok::<(), knights_tour::TourError>(())
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA until a tour is found or a limit trips.
    pub fn run(config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(config, None)
    }

    /// Runs the GA with an optional cancellation flag.
    ///
    /// When the flag is set the run stops before the next generation is
    /// bred and returns the best knight found so far.
    pub fn run_with_cancel(config: &GaConfig, cancel: Option<Arc<AtomicBool>>) -> Result<GaResult> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let started = Instant::now();

        let mut population = Population::random(config.population_size, &mut rng)?;
        population.check_population(config, &mut rng);
        let (_, first_best) = population.evaluate();
        let mut best = first_best.clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations);
        fitness_history.push(best.fitness());
        info!("generation 1: best fitness {}/{SQUARES}", best.fitness());

        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut timed_out = false;

        loop {
            if best.is_complete() {
                info!(
                    "complete tour found in generation {}",
                    population.generation()
                );
                break;
            }
            if population.generation() >= config.max_generations {
                info!("reached generation limit {}", config.max_generations);
                break;
            }
            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                info!(
                    "stopping after {stagnation_counter} generations without improvement"
                );
                stagnated = true;
                break;
            }
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!("cancelled at generation {}", population.generation());
                cancelled = true;
                break;
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    warn!("time limit of {limit} ms reached");
                    timed_out = true;
                    break;
                }
            }

            population.create_new_generation(config, &mut rng);
            let repairs = population.check_population(config, &mut rng);
            let (gen_fitness, gen_best) = population.evaluate();

            if gen_fitness > best.fitness() {
                best = gen_best.clone();
                stagnation_counter = 0;
                info!(
                    "generation {}: new best fitness {gen_fitness}/{SQUARES}",
                    population.generation()
                );
            } else {
                stagnation_counter += 1;
            }
            debug!(
                "generation {}: best {gen_fitness}, mean {:.2}, repairs {repairs}",
                population.generation(),
                population.mean_fitness()
            );

            fitness_history.push(best.fitness());
        }

        Ok(GaResult {
            best_fitness: best.fitness(),
            solved: best.is_complete(),
            best,
            generations: population.generation(),
            stagnated,
            cancelled,
            timed_out,
            fitness_history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

//! A generation of knights and the operations that advance it.
//!
//! One cycle is `check_population` (decode every genome), `evaluate`
//! (find the generation best), then `create_new_generation` (elitism,
//! tournament selection, crossover, mutation). The caller owns the loop;
//! see [`GaRunner`](super::GaRunner).

use super::config::GaConfig;
use super::operators::{crossover, mutate};
use super::selection::tournament;
use super::types::Knight;
use crate::error::{Result, TourError};
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A fixed-size collection of knights plus a generation counter.
#[derive(Debug, Clone)]
pub struct Population {
    knights: Vec<Knight>,
    size: usize,
    generation: usize,
}

impl Population {
    /// Creates `size` knights with random genomes, at generation 1.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Result<Self> {
        Self::from_knights((0..size).map(|_| Knight::random(rng)).collect())
    }

    /// Wraps existing knights, at generation 1.
    pub fn from_knights(knights: Vec<Knight>) -> Result<Self> {
        if knights.is_empty() {
            return Err(TourError::InvalidConfig(
                "population must contain at least one knight".into(),
            ));
        }
        Ok(Self {
            size: knights.len(),
            knights,
            generation: 1,
        })
    }

    pub fn knights(&self) -> &[Knight] {
        &self.knights
    }

    pub fn len(&self) -> usize {
        self.knights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knights.is_empty()
    }

    /// Current generation, starting at 1.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Decodes every knight, repairing genomes in place.
    ///
    /// One `cycle_forward` bit per knight is drawn from `rng` up front, so
    /// the outcome is the same whether or not decoding runs in parallel.
    /// Returns the total number of repaired genes.
    pub fn check_population<R: Rng>(&mut self, config: &GaConfig, rng: &mut R) -> usize {
        let bits: Vec<bool> = (0..self.knights.len())
            .map(|_| rng.random_bool(0.5))
            .collect();
        let policy = config.halt_policy;

        #[cfg(feature = "parallel")]
        {
            if config.parallel {
                return self
                    .knights
                    .par_iter_mut()
                    .zip(bits.par_iter())
                    .map(|(knight, &forward)| knight.check_moves(forward, policy))
                    .sum();
            }
        }

        self.knights
            .iter_mut()
            .zip(&bits)
            .map(|(knight, &forward)| knight.check_moves(forward, policy))
            .sum()
    }

    /// Returns the best fitness and the knight achieving it.
    ///
    /// Ties go to the knight that comes first.
    pub fn evaluate(&self) -> (usize, &Knight) {
        let mut best = &self.knights[0];
        for knight in &self.knights[1..] {
            if knight.fitness() > best.fitness() {
                best = knight;
            }
        }
        (best.fitness(), best)
    }

    /// Mean fitness of the current generation.
    pub fn mean_fitness(&self) -> f64 {
        let total: usize = self.knights.iter().map(Knight::fitness).sum();
        total as f64 / self.knights.len() as f64
    }

    /// Draws two parents from independent tournaments of size `k`.
    ///
    /// The parents may be the same knight. `k` is clamped to the
    /// population size.
    pub fn tournament_selection<R: Rng>(&self, k: usize, rng: &mut R) -> (&Knight, &Knight) {
        let first = tournament(&self.knights, k, rng);
        let second = tournament(&self.knights, k, rng);
        (&self.knights[first], &self.knights[second])
    }

    /// Replaces the population with the next generation.
    ///
    /// Knights must have been decoded since the last reproduction: the
    /// generation best is carried over unchanged when it beats
    /// `config.elitism_threshold`, and selection uses decoded fitness.
    pub fn create_new_generation<R: Rng>(&mut self, config: &GaConfig, rng: &mut R) {
        let k = config.tournament.resolve(self.size, self.generation);
        let mut next = Vec::with_capacity(self.size);

        let (best_fitness, best) = self.evaluate();
        if config.elitism_threshold.is_some_and(|t| best_fitness > t) {
            next.push(best.clone());
        }

        while next.len() < self.size {
            let (p1, p2) = self.tournament_selection(k, rng);
            let parent_mean = (p1.fitness() + p2.fitness()) as f64 / 2.0;
            let rate = config.mutation_rate_for(parent_mean);

            let (c1, c2) = crossover(p1.genome(), p2.genome(), rng);
            let c1 = mutate(&c1, rate, config.mutation_policy, rng);
            let c2 = mutate(&c2, rate, config.mutation_policy, rng);

            next.push(Knight::new(c1));
            if next.len() < self.size {
                next.push(Knight::new(c2));
            }
        }

        self.knights = next;
        self.generation += 1;
    }
}

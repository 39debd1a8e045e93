//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::decoder::HaltPolicy;
use super::operators::MutationPolicy;
use super::selection::TournamentSize;
use crate::board::SQUARES;
use crate::error::{Result, TourError};
use serde::{Deserialize, Serialize};

/// Configuration for the tour GA.
///
/// # Defaults
///
/// ```
/// use knights_tour::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 200);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use knights_tour::ga::{GaConfig, HaltPolicy, TournamentSize};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_tournament(TournamentSize::Fixed(5))
///     .with_halt_policy(HaltPolicy::UndoLast)
///     .with_mutation_rate(0.05)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of knights per generation.
    pub population_size: usize,

    /// Generation count at which the run stops.
    pub max_generations: usize,

    /// Base per-gene mutation probability (0.0–1.0).
    pub mutation_rate: f64,

    /// How the mutation probability varies along the genome.
    pub mutation_policy: MutationPolicy,

    /// Tournament sizing for parent selection.
    pub tournament: TournamentSize,

    /// The generation best is carried over unchanged when its fitness
    /// exceeds this value. `None` disables elitism.
    pub elitism_threshold: Option<usize>,

    /// Mutation rate is scaled by `high_performance_factor` for children
    /// whose parents' mean fitness exceeds this value. `None` disables it.
    pub high_performance_threshold: Option<usize>,

    /// Multiplier applied to the mutation rate for high-performing parents.
    pub high_performance_factor: f64,

    /// Generations without improvement before stopping. 0 disables.
    pub stagnation_limit: usize,

    /// Decoder behaviour on an unrepairable gene.
    pub halt_policy: HaltPolicy,

    /// Decode individuals in parallel. Only honoured with the `parallel`
    /// feature.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws one.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds, checked once per generation.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            mutation_rate: 0.1,
            mutation_policy: MutationPolicy::default(),
            tournament: TournamentSize::default(),
            elitism_threshold: Some(45),
            high_performance_threshold: Some(55),
            high_performance_factor: 0.5,
            stagnation_limit: 50,
            halt_policy: HaltPolicy::default(),
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the base mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_policy(mut self, policy: MutationPolicy) -> Self {
        self.mutation_policy = policy;
        self
    }

    pub fn with_tournament(mut self, tournament: TournamentSize) -> Self {
        self.tournament = tournament;
        self
    }

    pub fn with_elitism_threshold(mut self, threshold: Option<usize>) -> Self {
        self.elitism_threshold = threshold;
        self
    }

    pub fn with_high_performance_threshold(mut self, threshold: Option<usize>) -> Self {
        self.high_performance_threshold = threshold;
        self
    }

    /// Sets the high-performance mutation multiplier, clamped to `[0, 1]`.
    pub fn with_high_performance_factor(mut self, factor: f64) -> Self {
        self.high_performance_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    pub fn with_halt_policy(mut self, policy: HaltPolicy) -> Self {
        self.halt_policy = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Small, short runs for smoke tests and interactive use.
    ///
    /// - Population: 50, Generations: 100, Stagnation limit: 30
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            stagnation_limit: 30,
            ..Self::default()
        }
    }

    /// Larger population and a longer horizon.
    ///
    /// - Population: 300, Generations: 1000, Stagnation limit: 150
    pub fn quality() -> Self {
        Self {
            population_size: 300,
            max_generations: 1000,
            stagnation_limit: 150,
            ..Self::default()
        }
    }

    /// Effective mutation rate for children of parents with mean fitness
    /// `parent_mean`.
    pub fn mutation_rate_for(&self, parent_mean: f64) -> f64 {
        match self.high_performance_threshold {
            Some(t) if parent_mean > t as f64 => self.mutation_rate * self.high_performance_factor,
            _ => self.mutation_rate,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(invalid("population_size must be at least 2"));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.high_performance_factor) {
            return Err(invalid("high_performance_factor must be in [0, 1]"));
        }
        if let MutationPolicy::PositionWeighted { cap } = self.mutation_policy {
            if !(0.0..=1.0).contains(&cap) {
                return Err(invalid("mutation cap must be in [0, 1]"));
            }
        }
        if self.tournament == TournamentSize::Fixed(0) {
            return Err(invalid("tournament size must be at least 1"));
        }
        for (name, threshold) in [
            ("elitism_threshold", self.elitism_threshold),
            ("high_performance_threshold", self.high_performance_threshold),
        ] {
            if threshold.is_some_and(|t| t > SQUARES) {
                return Err(TourError::InvalidConfig(format!(
                    "{name} must not exceed {SQUARES}"
                )));
            }
        }
        if self.time_limit_ms == Some(0) {
            return Err(invalid("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> TourError {
    TourError::InvalidConfig(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 200);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.mutation_policy, MutationPolicy::PositionWeighted { cap: 0.4 });
        assert_eq!(config.tournament, TournamentSize::Adaptive);
        assert_eq!(config.elitism_threshold, Some(45));
        assert_eq!(config.high_performance_threshold, Some(55));
        assert_eq!(config.stagnation_limit, 50);
        assert_eq!(config.halt_policy, HaltPolicy::Stop);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(10)
            .with_mutation_policy(MutationPolicy::Flat)
            .with_tournament(TournamentSize::Fixed(4))
            .with_elitism_threshold(None)
            .with_stagnation_limit(0)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 20);
        assert_eq!(config.max_generations, 10);
        assert_eq!(config.mutation_policy, MutationPolicy::Flat);
        assert_eq!(config.tournament, TournamentSize::Fixed(4));
        assert_eq!(config.elitism_threshold, None);
        assert_eq!(config.stagnation_limit, 0);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_mutation_rate(2.0)
            .with_high_performance_factor(-1.0);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        assert!(config.high_performance_factor.abs() < 1e-10);
    }

    #[test]
    fn test_validate_population_too_small() {
        assert!(GaConfig::default().with_population_size(1).validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        assert!(GaConfig::default().with_max_generations(0).validate().is_err());
    }

    #[test]
    fn test_validate_threshold_above_board() {
        let config = GaConfig::default().with_elitism_threshold(Some(65));
        assert!(matches!(config.validate(), Err(TourError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_time_limit() {
        assert!(GaConfig::default().with_time_limit_ms(0).validate().is_err());
        assert!(GaConfig::default().with_time_limit_ms(1).validate().is_ok());
    }

    #[test]
    fn test_mutation_rate_halved_for_strong_parents() {
        let config = GaConfig::default();
        assert!((config.mutation_rate_for(40.0) - 0.1).abs() < 1e-12);
        assert!((config.mutation_rate_for(55.0) - 0.1).abs() < 1e-12);
        assert!((config.mutation_rate_for(56.5) - 0.05).abs() < 1e-12);
        let off = config.with_high_performance_threshold(None);
        assert!((off.mutation_rate_for(64.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_presets_validate() {
        assert!(GaConfig::fast().validate().is_ok());
        assert!(GaConfig::quality().validate().is_ok());
        assert_eq!(GaConfig::fast().with_seed(3).seed, Some(3));
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: GaConfig = toml::from_str(
            r#"
            population_size = 60
            halt_policy = "undo_last"
            mutation_policy = "flat"
            tournament = { fixed = 4 }
            "#,
        )
        .unwrap();
        assert_eq!(config.population_size, 60);
        assert_eq!(config.halt_policy, HaltPolicy::UndoLast);
        assert_eq!(config.mutation_policy, MutationPolicy::Flat);
        assert_eq!(config.tournament, TournamentSize::Fixed(4));
        assert_eq!(config.max_generations, 200);
    }
}

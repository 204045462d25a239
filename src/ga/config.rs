//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_jobshop::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.generations, 50);
/// assert_eq!(config.elite_count(), 6);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_jobshop::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_elite_rate(0.1)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population (`tp`).
    pub population_size: usize,

    /// Number of generations (`ng`). There is no early stopping.
    pub generations: usize,

    /// Probability of applying crossover to a pair of parents (`tc`).
    ///
    /// When crossover is not applied, the children are copies of the parents.
    pub crossover_rate: f64,

    /// Probability of mutating each child (`tm`).
    pub mutation_rate: f64,

    /// Fraction of the previous population carried over unchanged (`ig`).
    pub elite_rate: f64,

    /// Whether to decode individuals in parallel using rayon.
    ///
    /// Ignored unless the `parallel` cargo feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            generations: 50,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elite_rate: 0.2,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_elite_rate(mut self, rate: f64) -> Self {
        self.elite_rate = rate;
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

    /// `floor(elite_rate * population_size)`.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_rate) as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.generations == 0 {
            return Err("generations must be at least 1".into());
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("elite_rate", self.elite_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!("{name} must be in [0, 1], got {rate}"));
            }
        }
        if self.elite_count() >= self.population_size {
            return Err("elite_rate too high: elites fill entire population".into());
        }
        Ok(())
    }
}

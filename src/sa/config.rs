//! SA configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the Simulated Annealing algorithm.
///
/// Geometric cooling: after every candidate evaluation the temperature is
/// multiplied by `cooling_factor`. The run ends once the temperature
/// drops to or below `min_temperature`.
///
/// # Examples
///
/// ```
/// use u_jobshop::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.01)
///     .with_cooling_factor(0.95);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaConfig {
    /// Initial temperature `T0`. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Minimum temperature `Tmin`. The algorithm stops at or below this.
    pub min_temperature: f64,

    /// Cooling factor `r` in (0, 1). Higher = slower cooling.
    pub cooling_factor: f64,

    /// Maximum total iterations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 500.0,
            min_temperature: 0.1,
            cooling_factor: 0.8,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_factor(mut self, r: f64) -> Self {
        self.cooling_factor = r;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of temperature steps the schedule will take (ignoring the budget).
    pub fn temperature_steps(&self) -> usize {
        let mut t = self.initial_temperature;
        let mut steps = 0usize;
        while t > self.min_temperature {
            t *= self.cooling_factor;
            steps += 1;
        }
        steps
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err("initial_temperature must be positive and finite".into());
        }
        if !(self.min_temperature.is_finite() && self.min_temperature > 0.0) {
            return Err("min_temperature must be positive and finite".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        let r = self.cooling_factor;
        if !(r > 0.0 && r < 1.0) {
            return Err(format!("cooling_factor must be in (0, 1), got {r}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 500.0).abs() < 1e-10);
        assert!((config.min_temperature - 0.1).abs() < 1e-10);
        assert!((config.cooling_factor - 0.8).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling() {
        assert!(SaConfig::default().with_cooling_factor(1.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_factor(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_non_finite() {
        let infinite = SaConfig::default().with_initial_temperature(f64::INFINITY);
        assert!(infinite.validate().is_err());
        let nan_start = SaConfig::default().with_initial_temperature(f64::NAN);
        assert!(nan_start.validate().is_err());
        let nan_min = SaConfig::default().with_min_temperature(f64::NAN);
        assert!(nan_min.validate().is_err());
        let nan_rate = SaConfig::default().with_cooling_factor(f64::NAN);
        assert!(nan_rate.validate().is_err());
    }

    #[test]
    fn test_temperature_steps() {
        // 500 * 0.8^k <= 0.1  =>  k = 39
        assert_eq!(SaConfig::default().temperature_steps(), 39);
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(0.5)
            .with_cooling_factor(0.5);
        assert_eq!(config.temperature_steps(), 1);
    }
}

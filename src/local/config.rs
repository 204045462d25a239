//! Hill climbing configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for hill climbing.
///
/// `tolerance` is the number of consecutive non-improving candidates
/// allowed before the search stops. A tolerance of 1 is plain hill
/// climbing: the first non-improving neighbor ends the run.
///
/// # Examples
///
/// ```
/// use u_jobshop::local::HillClimbConfig;
///
/// let config = HillClimbConfig::default()
///     .with_tolerance(5)
///     .with_max_iterations(10_000)
///     .with_seed(42);
/// assert_eq!(config.tolerance, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HillClimbConfig {
    /// Consecutive failures tolerated before stopping (`tmax`, at least 1).
    pub tolerance: usize,

    /// Maximum candidate evaluations (safety bound). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            tolerance: 1,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl HillClimbConfig {
    pub fn with_tolerance(mut self, tmax: usize) -> Self {
        self.tolerance = tmax;
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

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.tolerance == 0 {
            return Err("tolerance must be at least 1".into());
        }
        Ok(())
    }
}

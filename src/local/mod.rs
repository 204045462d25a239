//! Hill climbing.
//!
//! Greedy single-solution search that accepts only strictly improving
//! neighbors. With a tolerance above 1 it survives short runs of
//! non-improving neighbors before giving up.
//!
//! [`LocalSearchProblem`] is also the problem trait consumed by
//! [`crate::sa`].
//!
//! # References
//!
//! - Russell & Norvig (2010), *Artificial Intelligence: A Modern Approach*, Ch. 4
//! - Hoos & Stützle (2004), *Stochastic Local Search: Foundations and Applications*

mod config;
mod runner;
mod types;

pub use config::HillClimbConfig;
pub use runner::{HillClimbRunner, LocalSearchResult};
pub use types::LocalSearchProblem;

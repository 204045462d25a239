//! Genetic Algorithm over job-repetition chromosomes.
//!
//! Each individual is a [`Chromosome`]: a sequence of job indices where
//! job `j` appears once per operation. Decoding dispatches the n-th
//! occurrence of `j` as the n-th operation of `j`, so every valid
//! chromosome decodes into a feasible schedule.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, generations, operator rates, elitism
//! - [`GaRunner`]: Executes the generational loop
//! - [`GaResult`]: Best chromosome, its schedule, and the convergence history
//!
//! # Operators
//!
//! - Roulette wheel selection over normalized `1 / makespan` weights
//! - Single-point crossover followed by explicit [`repair`]
//! - Swap mutation on two distinct positions
//! - Elitist replacement: the top `floor(elite_rate * size)` of the previous
//!   generation plus the best offspring
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Bierwirth (1995), "A Generalized Permutation Approach to Job Shop
//!   Scheduling with Genetic Algorithms"

mod chromosome;
mod config;
pub mod operators;
mod runner;
mod selection;

pub use chromosome::{repair, Chromosome};
pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::{fitness, fitness_weights, roulette_select};

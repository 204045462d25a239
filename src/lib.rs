//! Job-shop scheduling engine.
//!
//! Turns per-machine operation orderings or job-repetition chromosomes
//! into feasible, time-stamped schedules and searches for schedules with
//! a smaller makespan:
//!
//! - **Schedule builders**: the machine/job cursor rule
//!   `start = max(machine_free, job_free)` applied to a
//!   [`MachineOrdering`](model::MachineOrdering) ([`builder::build_schedule`])
//!   or to a chromosome ([`builder::decode_chromosome`]).
//! - **Hill climbing**: greedy search over same-machine swaps, optionally
//!   tolerating a bounded run of non-improving neighbors.
//! - **Simulated Annealing (SA)**: Metropolis acceptance with geometric
//!   cooling.
//! - **Genetic Algorithm (GA)**: roulette selection, single-point crossover
//!   with explicit repair, swap mutation, and elitist replacement.
//!
//! [`session::SchedulingSession`] runs all four methods from one initial
//! schedule and reports the gain of each.
//!
//! # Architecture
//!
//! The generic runners ([`local`], [`sa`]) know nothing about job shops;
//! [`search`] binds them to the model. All randomness flows through an
//! explicit `&mut impl Rng` or a `seed` in the method's config. The crate
//! logs through the [`log`] facade and installs no logger.
//!
//! # Example
//!
//! ```
//! use u_jobshop::builder::sequential_schedule;
//! use u_jobshop::model::Instance;
//! use u_jobshop::random::create_rng;
//! use u_jobshop::sa::SaConfig;
//! use u_jobshop::search::simulated_annealing;
//!
//! let inst = Instance::new(vec![
//!     vec![("M1", 3), ("M2", 5), ("M3", 7)],
//!     vec![("M2", 9), ("M3", 1), ("M1", 4)],
//!     vec![("M3", 4), ("M1", 6), ("M2", 2)],
//! ]).unwrap();
//!
//! let initial = sequential_schedule(&inst);
//! assert_eq!(initial.makespan(), 30);
//!
//! let mut rng = create_rng(42);
//! let outcome = simulated_annealing(&inst, &initial, &SaConfig::default(), &mut rng).unwrap();
//! assert!(outcome.makespan <= 30);
//! ```

pub mod builder;
pub mod error;
pub mod eval;
pub mod ga;
pub mod local;
pub mod model;
pub mod neighbor;
pub mod random;
pub mod sa;
pub mod search;
pub mod session;

pub use error::{DecodeError, ScheduleError};
pub use eval::evaluate;

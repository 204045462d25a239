//! Error types.
//!
//! Only structural malformation of core inputs is reported as an error.
//! Algorithmic edge cases (empty schedules, no-op moves, zero-fitness
//! populations) resolve to defined fallback values inside the algorithms.

use thiserror::Error;

/// A chromosome that cannot be decoded into a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A gene names a job that does not exist in the instance.
    #[error("gene {job} at position {position} does not name a job (instance has {jobs} jobs)")]
    UnknownJob {
        job: usize,
        position: usize,
        jobs: usize,
    },

    /// A job id occurs more often than the job has operations.
    #[error("job {job} occurs more than {operations} times (excess at position {position})")]
    ExcessOccurrence {
        job: usize,
        position: usize,
        operations: usize,
    },
}

/// Errors surfaced by the scheduling core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// An operation references an empty machine id.
    #[error("job {job} operation {operation} has an empty machine id")]
    EmptyMachineId { job: usize, operation: usize },

    /// A machine ordering is not a per-machine permutation of the instance's operations.
    #[error("machine ordering does not match the instance: {0}")]
    OrderingMismatch(String),

    /// The machine ordering conflicts with job precedence; nothing more can be dispatched.
    #[error("machine ordering deadlocks with job precedence: {remaining} operations undispatched")]
    Deadlock { remaining: usize },

    /// A schedule violates completeness, machine capacity, or job precedence.
    #[error("schedule is infeasible: {0}")]
    Infeasible(String),

    /// Chromosome decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Algorithm parameters failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

//! Job-shop domain model.
//!
//! - [`Instance`]: immutable problem description (jobs of machine-bound operations)
//! - [`MachineOrdering`]: per-machine operation sequences, the local-search decision variable
//! - [`Schedule`]: timed placement of every operation
//!
//! Jobs, operations, and machines are identified by 0-based indices.
//! Machine ids given as strings are interned into [`Instance::machines`].

mod instance;
mod ordering;
mod schedule;

pub use instance::{Instance, Job, OpRef, Operation};
pub use ordering::MachineOrdering;
pub use schedule::{Schedule, ScheduleRecord, ScheduledOperation};

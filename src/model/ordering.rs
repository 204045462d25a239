//! Per-machine operation orderings, the decision variable of local search.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::instance::{Instance, OpRef};
use super::schedule::Schedule;
use crate::error::ScheduleError;

/// For each machine, the sequence in which it processes its operations.
///
/// Indexed by machine (see [`Instance::machines`]). Carries no timing;
/// [`build_schedule`](crate::builder::build_schedule) turns it into one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineOrdering {
    sequences: Vec<Vec<OpRef>>,
}

impl MachineOrdering {
    /// Wraps raw per-machine sequences. Checked later by [`validate`](Self::validate).
    pub fn from_sequences(sequences: Vec<Vec<OpRef>>) -> Self {
        Self { sequences }
    }

    /// Each machine's operations in job order.
    pub fn natural(instance: &Instance) -> Self {
        let sequences = (0..instance.machine_count())
            .map(|m| instance.operations_on(m))
            .collect();
        Self { sequences }
    }

    /// Derives the ordering a schedule realizes: each machine's operations
    /// sorted by (start, finish, job, operation).
    ///
    /// Operations absent from the schedule sort after all present ones.
    pub fn from_schedule(instance: &Instance, schedule: &Schedule) -> Self {
        let mut times: Vec<Vec<Option<(u64, u64)>>> = instance
            .jobs()
            .iter()
            .map(|j| vec![None; j.operations.len()])
            .collect();
        for e in schedule.entries() {
            if let Some(slot) = times.get_mut(e.job).and_then(|ops| ops.get_mut(e.operation)) {
                *slot = Some((e.start, e.finish));
            }
        }

        let sequences = (0..instance.machine_count())
            .map(|m| {
                let mut ops = instance.operations_on(m);
                ops.sort_by_key(|r| {
                    let (start, finish) = times[r.job][r.operation].unwrap_or((u64::MAX, u64::MAX));
                    (start, finish, r.job, r.operation)
                });
                ops
            })
            .collect();
        Self { sequences }
    }

    pub fn sequences(&self) -> &[Vec<OpRef>] {
        &self.sequences
    }

    /// The sequence for one machine.
    pub fn sequence(&self, machine: usize) -> Option<&[OpRef]> {
        self.sequences.get(machine).map(|s| s.as_slice())
    }

    pub fn machine_count(&self) -> usize {
        self.sequences.len()
    }

    pub fn operation_count(&self) -> usize {
        self.sequences.iter().map(|s| s.len()).sum()
    }

    /// Swaps two positions within one machine's sequence.
    ///
    /// # Panics
    /// Panics if `machine`, `i`, or `j` is out of range.
    pub fn swap(&mut self, machine: usize, i: usize, j: usize) {
        self.sequences[machine].swap(i, j);
    }

    /// Checks that every sequence is a permutation of exactly the
    /// operations the instance binds to that machine.
    pub fn validate(&self, instance: &Instance) -> Result<(), ScheduleError> {
        if self.sequences.len() != instance.machine_count() {
            return Err(ScheduleError::OrderingMismatch(format!(
                "{} sequences for {} machines",
                self.sequences.len(),
                instance.machine_count()
            )));
        }

        let mut seen: Vec<Vec<bool>> = instance
            .jobs()
            .iter()
            .map(|j| vec![false; j.operations.len()])
            .collect();

        for (machine, seq) in self.sequences.iter().enumerate() {
            for &r in seq {
                let op = instance.operation(r).ok_or_else(|| {
                    ScheduleError::OrderingMismatch(format!(
                        "job {} operation {} does not exist",
                        r.job, r.operation
                    ))
                })?;
                if op.machine != machine {
                    return Err(ScheduleError::OrderingMismatch(format!(
                        "job {} operation {} listed on machine {} but bound to machine {}",
                        r.job, r.operation, machine, op.machine
                    )));
                }
                let flag = &mut seen[r.job][r.operation];
                if *flag {
                    return Err(ScheduleError::OrderingMismatch(format!(
                        "job {} operation {} listed twice",
                        r.job, r.operation
                    )));
                }
                *flag = true;
            }
        }

        for (job, ops) in seen.iter().enumerate() {
            if let Some(operation) = ops.iter().position(|&s| !s) {
                return Err(ScheduleError::OrderingMismatch(format!(
                    "job {job} operation {operation} missing"
                )));
            }
        }
        Ok(())
    }
}

//! Problem instance: jobs, operations, machines.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// One processing step of a job, bound to a single machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operation {
    /// Machine index into [`Instance::machines`].
    pub machine: usize,
    /// Processing time. Zero is permitted but degrades to a no-op.
    pub duration: u64,
}

/// An ordered sequence of operations. Order is a hard precedence constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Job {
    pub operations: Vec<Operation>,
}

/// Reference to the `operation`-th step of job `job` (both 0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OpRef {
    pub job: usize,
    pub operation: usize,
}

impl OpRef {
    pub fn new(job: usize, operation: usize) -> Self {
        Self { job, operation }
    }
}

/// Immutable job-shop problem instance.
///
/// Job identity is insertion order. Machines are indexed in order of
/// first appearance while scanning jobs, then operations.
///
/// # Examples
///
/// ```
/// use u_jobshop::model::Instance;
///
/// let instance = Instance::new(vec![
///     vec![("M1", 3), ("M2", 5)],
///     vec![("M2", 9), ("M1", 4)],
/// ]).unwrap();
/// assert_eq!(instance.job_count(), 2);
/// assert_eq!(instance.machines(), ["M1", "M2"]);
/// assert_eq!(instance.operation_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instance {
    jobs: Vec<Job>,
    machines: Vec<String>,
}

impl Instance {
    /// Builds an instance from per-job `(machine id, duration)` lists.
    ///
    /// Zero jobs, or jobs without operations, are accepted and simply
    /// contribute nothing to a schedule. Empty machine ids are rejected.
    pub fn new<S: Into<String>>(jobs: Vec<Vec<(S, u64)>>) -> Result<Self, ScheduleError> {
        let mut machines: Vec<String> = Vec::new();
        let mut built = Vec::with_capacity(jobs.len());

        for (job_idx, ops) in jobs.into_iter().enumerate() {
            let mut operations = Vec::with_capacity(ops.len());
            for (op_idx, (machine, duration)) in ops.into_iter().enumerate() {
                let machine: String = machine.into();
                if machine.is_empty() {
                    return Err(ScheduleError::EmptyMachineId {
                        job: job_idx,
                        operation: op_idx,
                    });
                }
                let machine = match machines.iter().position(|m| *m == machine) {
                    Some(idx) => idx,
                    None => {
                        machines.push(machine);
                        machines.len() - 1
                    }
                };
                operations.push(Operation { machine, duration });
            }
            built.push(Job { operations });
        }

        Ok(Self {
            jobs: built,
            machines,
        })
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Machine ids, indexed by [`Operation::machine`].
    pub fn machines(&self) -> &[String] {
        &self.machines
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// Total number of operations across all jobs.
    pub fn operation_count(&self) -> usize {
        self.jobs.iter().map(|j| j.operations.len()).sum()
    }

    /// Number of operations of each job, in job order.
    pub fn operation_counts(&self) -> Vec<usize> {
        self.jobs.iter().map(|j| j.operations.len()).collect()
    }

    /// Looks up an operation; `None` if the reference is out of range.
    pub fn operation(&self, op: OpRef) -> Option<&Operation> {
        self.jobs.get(op.job)?.operations.get(op.operation)
    }

    /// Machine id for a machine index.
    pub fn machine_name(&self, machine: usize) -> Option<&str> {
        self.machines.get(machine).map(|s| s.as_str())
    }

    /// All operations bound to `machine`, in job order.
    pub fn operations_on(&self, machine: usize) -> Vec<OpRef> {
        let mut refs = Vec::new();
        for (job, j) in self.jobs.iter().enumerate() {
            for (operation, op) in j.operations.iter().enumerate() {
                if op.machine == machine {
                    refs.push(OpRef { job, operation });
                }
            }
        }
        refs
    }

    /// Sum of all durations, saturating at `u64::MAX`; an upper bound on any
    /// semi-active makespan.
    pub fn total_work(&self) -> u64 {
        self.jobs
            .iter()
            .flat_map(|j| j.operations.iter())
            .fold(0u64, |acc, op| acc.saturating_add(op.duration))
    }
}

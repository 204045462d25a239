//! Timed schedules (solutions).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::instance::Instance;
use crate::error::ScheduleError;

/// One operation placed on the timeline: occupies `[start, finish)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduledOperation {
    pub job: usize,
    pub operation: usize,
    pub machine: usize,
    pub start: u64,
    pub finish: u64,
}

impl ScheduledOperation {
    pub fn new(job: usize, operation: usize, machine: usize, start: u64, finish: u64) -> Self {
        Self {
            job,
            operation,
            machine,
            start,
            finish,
        }
    }

    /// `finish - start`, or 0 for an entry that finishes before it starts.
    #[inline]
    pub fn duration(&self) -> u64 {
        self.finish.saturating_sub(self.start)
    }
}

/// A labelled row for tabular display: `J1`, `Op1`, machine id, times.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleRecord {
    pub job: String,
    pub operation: String,
    pub machine: String,
    pub start: u64,
    pub finish: u64,
}

/// Ordered sequence of scheduled operations, in dispatch order.
///
/// Schedules are derived values: they are rebuilt whenever their source
/// ordering or chromosome changes, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    entries: Vec<ScheduledOperation>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    pub fn from_entries(entries: Vec<ScheduledOperation>) -> Self {
        Self { entries }
    }

    pub(crate) fn push(&mut self, entry: ScheduledOperation) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ScheduledOperation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest finish time; 0 for an empty schedule.
    pub fn makespan(&self) -> u64 {
        crate::eval::evaluate(self)
    }

    /// Completion time of a job's last placed operation.
    pub fn job_completion(&self, job: usize) -> Option<u64> {
        self.entries
            .iter()
            .filter(|e| e.job == job)
            .map(|e| e.finish)
            .max()
    }

    /// Entries on one machine, sorted by start time.
    pub fn machine_entries(&self, machine: usize) -> Vec<&ScheduledOperation> {
        let mut entries: Vec<&ScheduledOperation> =
            self.entries.iter().filter(|e| e.machine == machine).collect();
        entries.sort_by_key(|e| (e.start, e.finish));
        entries
    }

    /// Labelled rows (`J1`, `Op1`, machine id) in dispatch order.
    pub fn records(&self, instance: &Instance) -> Vec<ScheduleRecord> {
        self.entries
            .iter()
            .map(|e| ScheduleRecord {
                job: format!("J{}", e.job + 1),
                operation: format!("Op{}", e.operation + 1),
                machine: instance
                    .machine_name(e.machine)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", e.machine)),
                start: e.start,
                finish: e.finish,
            })
            .collect()
    }

    /// Checks completeness, machine capacity, and job precedence.
    ///
    /// - exactly one entry per (job, operation) of the instance
    /// - each entry on its bound machine with its exact duration
    /// - no two entries on one machine overlap in `[start, finish)`
    /// - each operation starts no earlier than its predecessor finishes
    pub fn verify(&self, instance: &Instance) -> Result<(), ScheduleError> {
        let expected = instance.operation_count();
        if self.entries.len() != expected {
            return Err(ScheduleError::Infeasible(format!(
                "{} entries for {} operations",
                self.entries.len(),
                expected
            )));
        }

        let mut placed: Vec<Vec<Option<&ScheduledOperation>>> = instance
            .jobs()
            .iter()
            .map(|j| vec![None; j.operations.len()])
            .collect();

        for e in &self.entries {
            let op = instance
                .operation(super::OpRef::new(e.job, e.operation))
                .ok_or_else(|| {
                    ScheduleError::Infeasible(format!(
                        "job {} operation {} does not exist",
                        e.job, e.operation
                    ))
                })?;
            if e.finish < e.start || e.finish - e.start != op.duration {
                return Err(ScheduleError::Infeasible(format!(
                    "job {} operation {} spans [{}, {}) but lasts {}",
                    e.job, e.operation, e.start, e.finish, op.duration
                )));
            }
            if e.machine != op.machine {
                return Err(ScheduleError::Infeasible(format!(
                    "job {} operation {} placed on machine {} instead of {}",
                    e.job, e.operation, e.machine, op.machine
                )));
            }
            let slot = &mut placed[e.job][e.operation];
            if slot.is_some() {
                return Err(ScheduleError::Infeasible(format!(
                    "job {} operation {} scheduled twice",
                    e.job, e.operation
                )));
            }
            *slot = Some(e);
        }

        for (job, ops) in placed.iter().enumerate() {
            for k in 1..ops.len() {
                if let (Some(prev), Some(next)) = (ops[k - 1], ops[k]) {
                    if next.start < prev.finish {
                        return Err(ScheduleError::Infeasible(format!(
                            "job {job} operation {k} starts at {} before operation {} finishes at {}",
                            next.start,
                            k - 1,
                            prev.finish
                        )));
                    }
                }
            }
        }

        for machine in 0..instance.machine_count() {
            let mut busy: Option<&ScheduledOperation> = None;
            for e in self.machine_entries(machine) {
                if e.duration() == 0 {
                    continue;
                }
                if let Some(prev) = busy {
                    if e.start < prev.finish {
                        return Err(ScheduleError::Infeasible(format!(
                            "machine {machine} runs job {} and job {} simultaneously",
                            prev.job, e.job
                        )));
                    }
                }
                busy = Some(e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_job_instance() -> Instance {
        Instance::new(vec![vec![("M1", 5), ("M2", 3)], vec![("M1", 3)]]).unwrap()
    }

    fn sample_schedule() -> Schedule {
        Schedule::from_entries(vec![
            ScheduledOperation::new(0, 0, 0, 0, 5),
            ScheduledOperation::new(0, 1, 1, 5, 8),
            ScheduledOperation::new(1, 0, 0, 5, 8),
        ])
    }

    #[test]
    fn test_makespan() {
        assert_eq!(sample_schedule().makespan(), 8);
        assert_eq!(Schedule::new().makespan(), 0);
    }

    #[test]
    fn test_job_completion() {
        let s = sample_schedule();
        assert_eq!(s.job_completion(0), Some(8));
        assert_eq!(s.job_completion(1), Some(8));
        assert_eq!(s.job_completion(2), None);
    }

    #[test]
    fn test_verify_ok() {
        assert!(sample_schedule().verify(&two_job_instance()).is_ok());
    }

    #[test]
    fn test_verify_machine_overlap() {
        let s = Schedule::from_entries(vec![
            ScheduledOperation::new(0, 0, 0, 0, 5),
            ScheduledOperation::new(0, 1, 1, 5, 8),
            ScheduledOperation::new(1, 0, 0, 4, 7),
        ]);
        let err = s.verify(&two_job_instance()).unwrap_err();
        assert!(err.to_string().contains("simultaneously"));
    }

    #[test]
    fn test_verify_precedence() {
        let s = Schedule::from_entries(vec![
            ScheduledOperation::new(0, 0, 0, 3, 8),
            ScheduledOperation::new(0, 1, 1, 0, 3),
            ScheduledOperation::new(1, 0, 0, 0, 3),
        ]);
        let err = s.verify(&two_job_instance()).unwrap_err();
        assert!(err.to_string().contains("before operation 0"));
    }

    #[test]
    fn test_verify_incomplete_and_duplicate() {
        let inst = two_job_instance();
        let s = Schedule::from_entries(vec![ScheduledOperation::new(0, 0, 0, 0, 5)]);
        assert!(s.verify(&inst).is_err());

        let s = Schedule::from_entries(vec![
            ScheduledOperation::new(0, 0, 0, 0, 5),
            ScheduledOperation::new(0, 0, 0, 5, 10),
            ScheduledOperation::new(1, 0, 0, 10, 13),
        ]);
        assert!(s.verify(&inst).unwrap_err().to_string().contains("twice"));
    }

    #[test]
    fn test_verify_wrong_duration() {
        let s = Schedule::from_entries(vec![
            ScheduledOperation::new(0, 0, 0, 0, 4),
            ScheduledOperation::new(0, 1, 1, 5, 8),
            ScheduledOperation::new(1, 0, 0, 5, 8),
        ]);
        assert!(s.verify(&two_job_instance()).is_err());
    }

    #[test]
    fn test_duration_of_reversed_entry_is_zero() {
        let entry = ScheduledOperation::new(0, 0, 0, 5, 3);
        assert_eq!(entry.duration(), 0);
        let s = Schedule::from_entries(vec![
            entry,
            ScheduledOperation::new(0, 1, 1, 5, 8),
            ScheduledOperation::new(1, 0, 0, 8, 11),
        ]);
        assert!(s.verify(&two_job_instance()).is_err());
    }

    #[test]
    fn test_records_labels() {
        let inst = two_job_instance();
        let rows = sample_schedule().records(&inst);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].job, "J1");
        assert_eq!(rows[1].operation, "Op2");
        assert_eq!(rows[1].machine, "M2");
        assert_eq!((rows[2].start, rows[2].finish), (5, 8));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_schedule_json_roundtrip() {
        let s = sample_schedule();
        let json = serde_json::to_string(&s).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}

//! Schedule construction.
//!
//! Two decoders share the same cursor rule. Each operation starts at
//! `max(machine_free[machine], job_free[job])` and finishes `duration` later,
//! after which both cursors advance to the finish time.
//!
//! - [`build_schedule`]: from a per-machine [`MachineOrdering`]
//! - [`decode_chromosome`]: from a job-id sequence (GA encoding)
//!
//! # Reference
//! Bierwirth (1995), "A generalized permutation approach to JSSP"

use rand::Rng;

use crate::error::{DecodeError, ScheduleError};
use crate::ga::Chromosome;
use crate::model::{Instance, MachineOrdering, OpRef, Schedule, ScheduledOperation};

/// Cursor state shared by every decoder.
struct Dispatcher<'a> {
    instance: &'a Instance,
    machine_free: Vec<u64>,
    job_free: Vec<u64>,
    next_op: Vec<usize>,
    schedule: Schedule,
}

impl<'a> Dispatcher<'a> {
    fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            machine_free: vec![0; instance.machine_count()],
            job_free: vec![0; instance.job_count()],
            next_op: vec![0; instance.job_count()],
            schedule: Schedule::with_capacity(instance.operation_count()),
        }
    }

    /// Places the next pending operation of `job`.
    ///
    /// Callers guarantee the job has an operation left. Finish times
    /// saturate at `u64::MAX`.
    fn dispatch(&mut self, job: usize) {
        let operation = self.next_op[job];
        let op = self.instance.jobs()[job].operations[operation];
        let start = self.machine_free[op.machine].max(self.job_free[job]);
        let finish = start.saturating_add(op.duration);
        self.machine_free[op.machine] = finish;
        self.job_free[job] = finish;
        self.next_op[job] += 1;
        self.schedule
            .push(ScheduledOperation::new(job, operation, op.machine, start, finish));
    }

    fn remaining(&self, job: usize) -> usize {
        self.instance.jobs()[job].operations.len() - self.next_op[job]
    }

    fn finish(self) -> Schedule {
        self.schedule
    }
}

/// Builds a schedule from a per-machine ordering.
///
/// Machines are swept in index order; each machine dispatches the head of
/// its sequence as long as that operation is its job's next pending one.
/// Sweeps repeat until everything is placed. An ordering that forms a
/// cycle with job precedence stalls the sweep and yields
/// [`ScheduleError::Deadlock`].
///
/// # Errors
/// - [`ScheduleError::OrderingMismatch`] if the ordering is not a per-machine
///   permutation of the instance's operations
/// - [`ScheduleError::Deadlock`] if the ordering cannot be dispatched
pub fn build_schedule(
    instance: &Instance,
    ordering: &MachineOrdering,
) -> Result<Schedule, ScheduleError> {
    ordering.validate(instance)?;

    let total = instance.operation_count();
    let mut dispatcher = Dispatcher::new(instance);
    let mut cursor = vec![0usize; ordering.machine_count()];
    let mut placed = 0usize;

    while placed < total {
        let mut progressed = false;
        for (machine, seq) in ordering.sequences().iter().enumerate() {
            while let Some(&OpRef { job, operation }) = seq.get(cursor[machine]) {
                if dispatcher.next_op[job] != operation {
                    break;
                }
                dispatcher.dispatch(job);
                cursor[machine] += 1;
                placed += 1;
                progressed = true;
            }
        }
        if !progressed {
            return Err(ScheduleError::Deadlock {
                remaining: total - placed,
            });
        }
    }

    Ok(dispatcher.finish())
}

/// Decodes a job-id sequence into a schedule.
///
/// The n-th occurrence of job `j` dispatches job `j`'s n-th operation.
/// Jobs the sequence leaves unfinished are appended afterwards in job
/// order, so the schedule is always complete.
///
/// # Errors
/// [`DecodeError`] if a gene is not a job id or a job occurs more often
/// than it has operations.
pub fn decode_chromosome(instance: &Instance, genes: &[usize]) -> Result<Schedule, ScheduleError> {
    let mut dispatcher = Dispatcher::new(instance);

    for (position, &job) in genes.iter().enumerate() {
        if job >= instance.job_count() {
            return Err(DecodeError::UnknownJob {
                job,
                position,
                jobs: instance.job_count(),
            }
            .into());
        }
        if dispatcher.remaining(job) == 0 {
            return Err(DecodeError::ExcessOccurrence {
                job,
                position,
                operations: instance.jobs()[job].operations.len(),
            }
            .into());
        }
        dispatcher.dispatch(job);
    }

    for job in 0..instance.job_count() {
        if dispatcher.remaining(job) > 0 {
            log::trace!(
                "decode: appending {} unreached operations of job {job}",
                dispatcher.remaining(job)
            );
        }
        while dispatcher.remaining(job) > 0 {
            dispatcher.dispatch(job);
        }
    }

    Ok(dispatcher.finish())
}

/// Fully sequential per-job schedule: job 0's operations, then job 1's, ...
pub fn sequential_schedule(instance: &Instance) -> Schedule {
    let mut dispatcher = Dispatcher::new(instance);
    for job in 0..instance.job_count() {
        while dispatcher.remaining(job) > 0 {
            dispatcher.dispatch(job);
        }
    }
    dispatcher.finish()
}

/// Random feasible schedule: decodes a random job-id permutation.
pub fn random_schedule<R: Rng>(instance: &Instance, rng: &mut R) -> Schedule {
    let chromosome = Chromosome::random(instance, rng);
    let mut dispatcher = Dispatcher::new(instance);
    for &job in chromosome.genes() {
        dispatcher.dispatch(job);
    }
    dispatcher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn sample() -> Instance {
        Instance::new(vec![
            vec![("M1", 3), ("M2", 5), ("M3", 7)],
            vec![("M2", 9), ("M3", 1), ("M1", 4)],
            vec![("M3", 4), ("M1", 6), ("M2", 2)],
        ])
        .unwrap()
    }

    #[test]
    fn test_sequential_schedule_values() {
        let inst = sample();
        let s = sequential_schedule(&inst);
        assert_eq!(s.len(), 9);
        assert_eq!(s.job_completion(0), Some(15));
        assert_eq!(s.job_completion(1), Some(22));
        assert_eq!(s.job_completion(2), Some(30));
        assert_eq!(s.makespan(), 30);
        assert!(s.verify(&inst).is_ok());
    }

    #[test]
    fn test_build_natural_ordering() {
        let inst = sample();
        let s = build_schedule(&inst, &MachineOrdering::natural(&inst)).unwrap();
        assert!(s.verify(&inst).is_ok());
        assert_eq!(s.makespan(), 30);
    }

    #[test]
    fn test_build_matches_cursor_pass_on_flow_shop() {
        // All jobs route M1 -> M2, so a plain machine-by-machine pass is consistent.
        let inst = Instance::new(vec![
            vec![("M1", 2), ("M2", 4)],
            vec![("M1", 3), ("M2", 1)],
        ])
        .unwrap();
        let s = build_schedule(&inst, &MachineOrdering::natural(&inst)).unwrap();
        let times: Vec<(usize, usize, u64, u64)> = s
            .entries()
            .iter()
            .map(|e| (e.job, e.operation, e.start, e.finish))
            .collect();
        assert_eq!(times, vec![(0, 0, 0, 2), (1, 0, 2, 5), (0, 1, 2, 6), (1, 1, 6, 7)]);
    }

    #[test]
    fn test_build_follows_machine_order() {
        let inst = Instance::new(vec![vec![("M1", 2)], vec![("M1", 3)]]).unwrap();
        let ord = MachineOrdering::from_sequences(vec![vec![OpRef::new(1, 0), OpRef::new(0, 0)]]);
        let s = build_schedule(&inst, &ord).unwrap();
        assert_eq!(s.entries()[0], ScheduledOperation::new(1, 0, 0, 0, 3));
        assert_eq!(s.entries()[1], ScheduledOperation::new(0, 0, 0, 3, 5));
    }

    #[test]
    fn test_build_deadlock() {
        // J0: M1 then M2; J1: M2 then M1. M1 wants J1's second op first,
        // M2 wants J0's second op first: a cycle.
        let inst = Instance::new(vec![
            vec![("M1", 1), ("M2", 1)],
            vec![("M2", 1), ("M1", 1)],
        ])
        .unwrap();
        let ord = MachineOrdering::from_sequences(vec![
            vec![OpRef::new(1, 1), OpRef::new(0, 0)],
            vec![OpRef::new(0, 1), OpRef::new(1, 0)],
        ]);
        assert_eq!(
            build_schedule(&inst, &ord),
            Err(ScheduleError::Deadlock { remaining: 4 })
        );
    }

    #[test]
    fn test_build_rejects_mismatched_ordering() {
        let inst = sample();
        let ord = MachineOrdering::from_sequences(vec![vec![]; 3]);
        assert!(matches!(
            build_schedule(&inst, &ord),
            Err(ScheduleError::OrderingMismatch(_))
        ));
    }

    #[test]
    fn test_empty_instance_builds_empty() {
        let inst = Instance::new(Vec::<Vec<(&str, u64)>>::new()).unwrap();
        let s = build_schedule(&inst, &MachineOrdering::natural(&inst)).unwrap();
        assert!(s.is_empty());
        assert!(decode_chromosome(&inst, &[]).unwrap().is_empty());
        assert!(sequential_schedule(&inst).is_empty());
    }

    #[test]
    fn test_decode_base_equals_sequential() {
        let inst = sample();
        let s = decode_chromosome(&inst, &[0, 0, 0, 1, 1, 1, 2, 2, 2]).unwrap();
        assert_eq!(s, sequential_schedule(&inst));
    }

    #[test]
    fn test_decode_interleaved() {
        let inst = sample();
        let s = decode_chromosome(&inst, &[1, 0, 2, 1, 0, 2, 1, 0, 2]).unwrap();
        assert!(s.verify(&inst).is_ok());
        // J2's first op on M2 (9) runs first, so J1's M2 op waits until 9.
        assert_eq!(s.entries()[0], ScheduledOperation::new(1, 0, 1, 0, 9));
        assert_eq!(s.entries()[4].start, 9);
    }

    #[test]
    fn test_decode_short_chromosome_completed() {
        let inst = sample();
        let s = decode_chromosome(&inst, &[2, 0]).unwrap();
        assert_eq!(s.len(), 9);
        assert!(s.verify(&inst).is_ok());
    }

    #[test]
    fn test_decode_excess_occurrence() {
        let inst = sample();
        let err = decode_chromosome(&inst, &[0, 0, 0, 0, 1, 1, 1, 2, 2]).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::Decode(DecodeError::ExcessOccurrence {
                job: 0,
                position: 3,
                operations: 3
            })
        );
    }

    #[test]
    fn test_decode_unknown_job() {
        let inst = sample();
        let err = decode_chromosome(&inst, &[0, 5]).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::Decode(DecodeError::UnknownJob { job: 5, position: 1, .. })
        ));
    }

    #[test]
    fn test_random_schedule_feasible() {
        let inst = sample();
        let mut rng = create_rng(42);
        for _ in 0..20 {
            let s = random_schedule(&inst, &mut rng);
            assert!(s.verify(&inst).is_ok());
        }
    }

    #[test]
    fn test_huge_durations_saturate() {
        let inst = Instance::new(vec![vec![("M1", 5), ("M2", u64::MAX - 1)]]).unwrap();
        let s = sequential_schedule(&inst);
        assert_eq!(s.entries()[1].start, 5);
        assert_eq!(s.entries()[1].finish, u64::MAX);
        assert_eq!(s.makespan(), u64::MAX);

        let built = build_schedule(&inst, &MachineOrdering::natural(&inst)).unwrap();
        assert_eq!(built.makespan(), u64::MAX);
    }

    #[test]
    fn test_zero_duration_operation() {
        let inst = Instance::new(vec![vec![("M1", 0), ("M2", 3)]]).unwrap();
        let s = sequential_schedule(&inst);
        assert_eq!(s.entries()[0].finish, 0);
        assert_eq!(s.makespan(), 3);
        assert!(s.verify(&inst).is_ok());
    }
}

//! Property tests: every builder output is feasible and complete, and the
//! chromosome operators keep job counts intact.

use proptest::prelude::*;
use u_jobshop::builder::{build_schedule, decode_chromosome, random_schedule, sequential_schedule};
use u_jobshop::ga::{repair, Chromosome};
use u_jobshop::model::{Instance, MachineOrdering};
use u_jobshop::neighbor::perturb;
use u_jobshop::random::create_rng;
use u_jobshop::{evaluate, ScheduleError};

/// Up to 6 jobs of up to 5 operations on up to 4 machines.
fn instance_strategy() -> impl Strategy<Value = Instance> {
    prop::collection::vec(
        prop::collection::vec((0usize..4, 1u64..20), 0..5),
        0..6,
    )
    .prop_map(|jobs| {
        let rows: Vec<Vec<(String, u64)>> = jobs
            .into_iter()
            .map(|ops| ops.into_iter().map(|(m, d)| (format!("M{m}"), d)).collect())
            .collect();
        Instance::new(rows).unwrap()
    })
}

proptest! {
    #[test]
    fn sequential_schedule_is_feasible(inst in instance_strategy()) {
        let schedule = sequential_schedule(&inst);
        prop_assert_eq!(schedule.len(), inst.operation_count());
        prop_assert!(schedule.verify(&inst).is_ok());
    }

    #[test]
    fn random_chromosome_decodes_feasibly(inst in instance_strategy(), seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let chromosome = Chromosome::random(&inst, &mut rng);
        let schedule = decode_chromosome(&inst, chromosome.genes()).unwrap();
        prop_assert_eq!(schedule.len(), inst.operation_count());
        prop_assert!(schedule.verify(&inst).is_ok());
    }

    #[test]
    fn short_chromosome_is_completed(inst in instance_strategy(), seed in any::<u64>(), keep in 0usize..30) {
        let mut rng = create_rng(seed);
        let chromosome = Chromosome::random(&inst, &mut rng);
        let prefix = &chromosome.genes()[..keep.min(chromosome.len())];
        let schedule = decode_chromosome(&inst, prefix).unwrap();
        prop_assert!(schedule.verify(&inst).is_ok());
    }

    #[test]
    fn natural_ordering_builds_feasibly(inst in instance_strategy()) {
        let schedule = build_schedule(&inst, &MachineOrdering::natural(&inst)).unwrap();
        prop_assert!(schedule.verify(&inst).is_ok());
    }

    #[test]
    fn realized_ordering_rebuilds_same_makespan(inst in instance_strategy(), seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let schedule = random_schedule(&inst, &mut rng);
        let ordering = MachineOrdering::from_schedule(&inst, &schedule);
        let rebuilt = build_schedule(&inst, &ordering).unwrap();
        prop_assert!(rebuilt.verify(&inst).is_ok());
        prop_assert_eq!(rebuilt.makespan(), schedule.makespan());
    }

    #[test]
    fn perturbed_ordering_is_feasible_or_deadlocks(inst in instance_strategy(), seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let mut ordering = MachineOrdering::natural(&inst);
        for _ in 0..5 {
            ordering = perturb(&ordering, &mut rng);
            prop_assert!(ordering.validate(&inst).is_ok());
            match build_schedule(&inst, &ordering) {
                Ok(schedule) => prop_assert!(schedule.verify(&inst).is_ok()),
                Err(ScheduleError::Deadlock { remaining }) => prop_assert!(remaining > 0),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }

    #[test]
    fn repair_restores_counts(inst in instance_strategy(), raw in prop::collection::vec(0usize..8, 0..30)) {
        let fixed = repair(&inst, &raw);
        prop_assert!(fixed.counts_match(&inst));
        prop_assert!(decode_chromosome(&inst, fixed.genes()).unwrap().verify(&inst).is_ok());
    }

    #[test]
    fn crossover_and_mutation_keep_counts(inst in instance_strategy(), seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let p1 = Chromosome::random(&inst, &mut rng);
        let p2 = Chromosome::random(&inst, &mut rng);
        let (mut c1, c2) = p1.crossover(&p2, &inst, &mut rng);
        prop_assert!(c1.counts_match(&inst));
        prop_assert!(c2.counts_match(&inst));
        c1.mutate(&mut rng);
        prop_assert!(c1.counts_match(&inst));
    }

    #[test]
    fn evaluate_is_max_finish(inst in instance_strategy(), seed in any::<u64>()) {
        let schedule = random_schedule(&inst, &mut create_rng(seed));
        let expected = schedule.entries().iter().map(|e| e.finish).max().unwrap_or(0);
        prop_assert_eq!(evaluate(&schedule), expected);
        prop_assert_eq!(evaluate(&schedule), evaluate(&schedule));
    }
}

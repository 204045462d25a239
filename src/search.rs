//! Job-shop search entry points.
//!
//! Binds the generic runners in [`crate::local`], [`crate::sa`] and
//! [`crate::ga`] to the job-shop model. Local search moves through
//! [`MachineOrdering`]s: the start ordering is read off the caller's
//! initial schedule, each neighbor is one same-machine swap
//! ([`perturb`]), and a neighbor is scored by building its schedule.
//! Orderings that deadlock against job precedence are rejected.
//!
//! Every entry point returns a schedule no worse than its starting point.

use rand::Rng;

use crate::builder::build_schedule;
use crate::error::ScheduleError;
use crate::ga::{GaConfig, GaResult, GaRunner};
use crate::local::{HillClimbConfig, HillClimbRunner, LocalSearchProblem, LocalSearchResult};
use crate::model::{Instance, MachineOrdering, Schedule};
use crate::neighbor::perturb;
use crate::sa::{SaConfig, SaRunner};

/// Local search over machine orderings of one instance.
#[derive(Debug, Clone, Copy)]
pub struct OrderingNeighborhood<'a> {
    instance: &'a Instance,
}

impl<'a> OrderingNeighborhood<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }
}

impl LocalSearchProblem for OrderingNeighborhood<'_> {
    type Solution = MachineOrdering;

    fn cost(&self, ordering: &MachineOrdering) -> Option<u64> {
        match build_schedule(self.instance, ordering) {
            Ok(schedule) => Some(schedule.makespan()),
            Err(err) => {
                log::trace!("rejecting ordering: {err}");
                None
            }
        }
    }

    fn neighbor<R: Rng>(&self, ordering: &MachineOrdering, rng: &mut R) -> MachineOrdering {
        perturb(ordering, rng)
    }
}

/// Outcome of a local search run on a job-shop instance.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best schedule found (the initial schedule if nothing beat it).
    pub schedule: Schedule,

    /// Makespan of `schedule`.
    pub makespan: u64,

    /// Number of candidate orderings evaluated.
    pub iterations: usize,

    /// Number of accepted moves.
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Number of candidates rejected because they deadlock.
    pub infeasible_moves: usize,

    /// Whether the iteration budget stopped the run.
    pub budget_exhausted: bool,

    /// Best makespan after each iteration, starting with the initial makespan.
    pub cost_history: Vec<u64>,
}

/// Plain hill climbing: stops at the first non-improving neighbor.
///
/// `config.tolerance` is ignored and treated as 1.
///
/// # Examples
///
/// ```
/// use u_jobshop::builder::sequential_schedule;
/// use u_jobshop::local::HillClimbConfig;
/// use u_jobshop::model::Instance;
/// use u_jobshop::random::create_rng;
/// use u_jobshop::search::hill_climb;
///
/// let inst = Instance::new(vec![
///     vec![("M1", 3), ("M2", 5)],
///     vec![("M1", 4), ("M2", 2)],
/// ]).unwrap();
/// let initial = sequential_schedule(&inst);
/// let mut rng = create_rng(42);
/// let outcome = hill_climb(&inst, &initial, &HillClimbConfig::default(), &mut rng).unwrap();
/// assert!(outcome.makespan <= initial.makespan());
/// ```
pub fn hill_climb<R: Rng>(
    instance: &Instance,
    initial: &Schedule,
    config: &HillClimbConfig,
    rng: &mut R,
) -> Result<SearchOutcome, ScheduleError> {
    hill_climb_bounded(instance, initial, 1, config, rng)
}

/// Hill climbing that tolerates up to `tmax - 1` consecutive
/// non-improving neighbors. `tmax` overrides `config.tolerance`.
pub fn hill_climb_bounded<R: Rng>(
    instance: &Instance,
    initial: &Schedule,
    tmax: usize,
    config: &HillClimbConfig,
    rng: &mut R,
) -> Result<SearchOutcome, ScheduleError> {
    let config = config.clone().with_tolerance(tmax);
    config.validate().map_err(ScheduleError::InvalidConfig)?;
    let (problem, start, start_cost) = prepare(instance, initial)?;

    let result = HillClimbRunner::run_with_rng(&problem, start, start_cost, &config, rng);
    finish(instance, initial, result)
}

/// Simulated annealing with geometric cooling.
///
/// The current ordering follows every accepted move, including worsening
/// ones; the best ordering is kept separately.
pub fn simulated_annealing<R: Rng>(
    instance: &Instance,
    initial: &Schedule,
    config: &SaConfig,
    rng: &mut R,
) -> Result<SearchOutcome, ScheduleError> {
    config.validate().map_err(ScheduleError::InvalidConfig)?;
    let (problem, start, start_cost) = prepare(instance, initial)?;

    let result = SaRunner::run_with_rng(&problem, start, start_cost, config, rng);
    finish(instance, initial, result)
}

/// Genetic algorithm over job-repetition chromosomes.
///
/// The initial population is random, so no initial schedule is needed.
pub fn genetic_algorithm<R: Rng>(
    instance: &Instance,
    config: &GaConfig,
    rng: &mut R,
) -> Result<GaResult, ScheduleError> {
    config.validate().map_err(ScheduleError::InvalidConfig)?;
    GaRunner::run_with_rng(instance, config, rng)
}

fn prepare<'a>(
    instance: &'a Instance,
    initial: &Schedule,
) -> Result<(OrderingNeighborhood<'a>, MachineOrdering, u64), ScheduleError> {
    initial.verify(instance)?;
    let start = MachineOrdering::from_schedule(instance, initial);
    Ok((OrderingNeighborhood::new(instance), start, initial.makespan()))
}

fn finish(
    instance: &Instance,
    initial: &Schedule,
    result: LocalSearchResult<MachineOrdering>,
) -> Result<SearchOutcome, ScheduleError> {
    let schedule = match &result.best {
        Some(ordering) => build_schedule(instance, ordering)?,
        None => initial.clone(),
    };

    Ok(SearchOutcome {
        makespan: schedule.makespan(),
        schedule,
        iterations: result.iterations,
        accepted_moves: result.accepted_moves,
        improving_moves: result.improving_moves,
        infeasible_moves: result.infeasible_moves,
        budget_exhausted: result.budget_exhausted,
        cost_history: result.cost_history,
    })
}

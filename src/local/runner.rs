//! Hill climbing execution loop.
//!
//! # Algorithm
//!
//! 1. Start from a caller-supplied solution and cost
//! 2. Generate one neighbor of the current solution and evaluate it
//! 3. If strictly better, accept it and reset the failure counter;
//!    otherwise increment the failure counter
//! 4. Stop when the failure counter reaches the tolerance (or the
//!    iteration budget runs out)

use rand::Rng;

use super::config::HillClimbConfig;
use super::types::LocalSearchProblem;
use crate::random::rng_from_seed;

/// Result of a local search run (hill climbing or simulated annealing).
#[derive(Debug, Clone)]
pub struct LocalSearchResult<S: Clone> {
    /// Best solution found, or `None` if nothing beat the starting cost.
    pub best: Option<S>,

    /// Cost of the best solution (the starting cost if `best` is `None`).
    pub best_cost: u64,

    /// Number of candidate evaluations.
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Number of candidates rejected as infeasible.
    pub infeasible_moves: usize,

    /// Whether the iteration budget stopped the run.
    pub budget_exhausted: bool,

    /// Best cost after each iteration, starting with the initial cost.
    pub cost_history: Vec<u64>,
}

/// Executes hill climbing with a bounded run of non-improving moves.
pub struct HillClimbRunner;

impl HillClimbRunner {
    /// Runs hill climbing with a generator seeded from `config.seed`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`HillClimbConfig::validate`] first to get a descriptive error).
    pub fn run<P: LocalSearchProblem>(
        problem: &P,
        start: P::Solution,
        start_cost: u64,
        config: &HillClimbConfig,
    ) -> LocalSearchResult<P::Solution> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, start, start_cost, config, &mut rng)
    }

    /// Runs hill climbing with a caller-supplied generator.
    ///
    /// `start_cost` is the cost to beat. It need not equal
    /// `problem.cost(&start)`: the caller may hold a better reference
    /// solution than the one the moves start from.
    pub fn run_with_rng<P: LocalSearchProblem, R: Rng>(
        problem: &P,
        start: P::Solution,
        start_cost: u64,
        config: &HillClimbConfig,
        rng: &mut R,
    ) -> LocalSearchResult<P::Solution> {
        config.validate().expect("invalid HillClimbConfig");

        let mut current = start;
        let mut current_cost = start_cost;
        let mut improved = false;

        let mut failures = 0usize;
        let mut iterations = 0usize;
        let mut improving_moves = 0usize;
        let mut infeasible_moves = 0usize;
        let mut budget_exhausted = false;
        let mut cost_history = vec![start_cost];

        while failures < config.tolerance {
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                budget_exhausted = true;
                break;
            }

            let candidate = problem.neighbor(&current, rng);
            iterations += 1;

            match problem.cost(&candidate) {
                Some(cost) if cost < current_cost => {
                    log::debug!("hill climb: iteration {iterations} improved {current_cost} -> {cost}");
                    current = candidate;
                    current_cost = cost;
                    improved = true;
                    improving_moves += 1;
                    failures = 0;
                }
                Some(_) => failures += 1,
                None => {
                    log::trace!("hill climb: iteration {iterations} candidate infeasible");
                    infeasible_moves += 1;
                    failures += 1;
                }
            }

            cost_history.push(current_cost);
        }

        log::info!(
            "hill climb finished: best {current_cost} after {iterations} iterations ({improving_moves} improvements)"
        );

        LocalSearchResult {
            best: improved.then_some(current),
            best_cost: current_cost,
            iterations,
            accepted_moves: improving_moves,
            improving_moves,
            infeasible_moves,
            budget_exhausted,
            cost_history,
        }
    }
}

//! SA execution loop.

use rand::Rng;

use super::config::SaConfig;
use crate::local::{LocalSearchProblem, LocalSearchResult};
use crate::random::rng_from_seed;

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with a generator seeded from `config.seed`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid.
    pub fn run<P: LocalSearchProblem>(
        problem: &P,
        start: P::Solution,
        start_cost: u64,
        config: &SaConfig,
    ) -> LocalSearchResult<P::Solution> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, start, start_cost, config, &mut rng)
    }

    /// Runs SA with a caller-supplied generator.
    ///
    /// The returned `best` is `Some` only if a candidate strictly beat
    /// `start_cost`.
    pub fn run_with_rng<P: LocalSearchProblem, R: Rng>(
        problem: &P,
        start: P::Solution,
        start_cost: u64,
        config: &SaConfig,
        rng: &mut R,
    ) -> LocalSearchResult<P::Solution> {
        config.validate().expect("invalid SaConfig");

        let mut current = start;
        let mut current_cost = start_cost;
        let mut best: Option<P::Solution> = None;
        let mut best_cost = start_cost;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut infeasible_moves = 0usize;
        let mut budget_exhausted = false;
        let mut cost_history = vec![best_cost];

        while temperature > config.min_temperature {
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                budget_exhausted = true;
                break;
            }

            let candidate = problem.neighbor(&current, rng);
            iterations += 1;

            match problem.cost(&candidate) {
                None => {
                    log::trace!("sa: iteration {iterations} candidate infeasible");
                    infeasible_moves += 1;
                }
                Some(cost) => {
                    let delta = cost as f64 - current_cost as f64;

                    // Metropolis acceptance criterion
                    let accept = if delta < 0.0 {
                        improving_moves += 1;
                        true
                    } else {
                        let probability = (-delta / temperature).exp();
                        rng.random_range(0.0..1.0) < probability
                    };

                    if accept {
                        accepted_moves += 1;
                        if cost < best_cost {
                            log::debug!(
                                "sa: iteration {iterations} new best {best_cost} -> {cost} at T={temperature:.4}"
                            );
                            best = Some(candidate.clone());
                            best_cost = cost;
                        }
                        current = candidate;
                        current_cost = cost;
                    }
                }
            }

            cost_history.push(best_cost);
            temperature *= config.cooling_factor;
        }

        log::info!(
            "sa finished: best {best_cost} after {iterations} iterations, final T={temperature:.4} ({accepted_moves} accepted)"
        );

        LocalSearchResult {
            best,
            best_cost,
            iterations,
            accepted_moves,
            improving_moves,
            infeasible_moves,
            budget_exhausted,
            cost_history,
        }
    }
}

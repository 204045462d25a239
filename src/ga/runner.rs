//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → decoding → roulette selection → crossover + repair →
//! mutation → elitist replacement → repeat.

use rand::Rng;

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::selection::{fitness, fitness_weights, roulette_select};
use crate::error::ScheduleError;
use crate::model::{Instance, Schedule};
use crate::random::rng_from_seed;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best chromosome found during the entire run.
    pub best: Chromosome,

    /// Makespan of `best`.
    pub best_makespan: u64,

    /// Decoded schedule of `best`.
    pub schedule: Schedule,

    /// Total number of generations executed.
    pub generations: usize,

    /// Best-ever makespan at the end of each generation.
    pub history: Vec<u64>,
}

/// A decoded population member.
#[derive(Debug, Clone)]
struct Individual {
    chromosome: Chromosome,
    schedule: Schedule,
    makespan: u64,
    fitness: f64,
}

impl Individual {
    fn evaluate(instance: &Instance, chromosome: Chromosome) -> Result<Self, ScheduleError> {
        let schedule = chromosome.decode(instance)?;
        let makespan = schedule.makespan();
        Ok(Self {
            chromosome,
            schedule,
            makespan,
            fitness: fitness(makespan),
        })
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_jobshop::ga::{GaConfig, GaRunner};
/// use u_jobshop::model::Instance;
///
/// let inst = Instance::new(vec![
///     vec![("M1", 3), ("M2", 5)],
///     vec![("M2", 4), ("M1", 2)],
/// ]).unwrap();
/// let config = GaConfig::default().with_generations(10).with_seed(42);
/// let result = GaRunner::run(&inst, &config).unwrap();
/// assert_eq!(result.history.len(), 10);
/// assert!(result.schedule.verify(&inst).is_ok());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`] first
    /// to get a descriptive error).
    pub fn run(instance: &Instance, config: &GaConfig) -> Result<GaResult, ScheduleError> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Runs the GA with a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult, ScheduleError> {
        config.validate().expect("invalid GaConfig");

        let size = config.population_size;
        let elite_count = config.elite_count();

        // 1. Initialize population
        let initial: Vec<Chromosome> = (0..size)
            .map(|_| Chromosome::random(instance, rng))
            .collect();
        let mut population = evaluate_population(instance, initial, config.parallel)?;

        // 2. Seed the best-ever individual from the initial population
        let mut best = population
            .iter()
            .min_by_key(|ind| ind.makespan)
            .cloned()
            .ok_or_else(|| ScheduleError::InvalidConfig("empty population".into()))?;
        let mut history = Vec::with_capacity(config.generations);

        // 3. Evolutionary loop
        for gen in 0..config.generations {
            let makespans: Vec<u64> = population.iter().map(|ind| ind.makespan).collect();
            let weights = fitness_weights(&makespans);

            // Breed a full-size offspring population
            let mut offspring: Vec<Chromosome> = Vec::with_capacity(size);
            while offspring.len() < size {
                let p1 = &population[roulette_select(&weights, rng)].chromosome;
                let p2 = &population[roulette_select(&weights, rng)].chromosome;

                let (mut c1, mut c2) = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    p1.crossover(p2, instance, rng)
                } else {
                    (p1.clone(), p2.clone())
                };

                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    c1.mutate(rng);
                }
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    c2.mutate(rng);
                }

                offspring.push(c1);
                if offspring.len() < size {
                    offspring.push(c2);
                }
            }
            let offspring = evaluate_population(instance, offspring, config.parallel)?;
            population = replace(population, offspring, elite_count, size);

            // Update best
            if let Some(gen_best) = population.iter().min_by_key(|ind| ind.makespan) {
                if gen_best.makespan < best.makespan {
                    best = gen_best.clone();
                }
                log::debug!(
                    "ga: generation {} best {} (ever {})",
                    gen + 1,
                    gen_best.makespan,
                    best.makespan
                );
            }
            history.push(best.makespan);
        }

        log::info!(
            "ga finished: best {} after {} generations",
            best.makespan,
            config.generations
        );

        Ok(GaResult {
            best_makespan: best.makespan,
            best: best.chromosome,
            schedule: best.schedule,
            generations: config.generations,
            history,
        })
    }
}

/// Descending fitness; stable, so equal individuals keep population order.
fn sort_by_fitness(population: &mut [Individual]) {
    population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
}

/// Elitist replacement: the `elite_count` fittest of `previous` followed by
/// the `size - elite_count` fittest of `offspring`.
fn replace(
    mut previous: Vec<Individual>,
    mut offspring: Vec<Individual>,
    elite_count: usize,
    size: usize,
) -> Vec<Individual> {
    sort_by_fitness(&mut previous);
    sort_by_fitness(&mut offspring);
    previous.truncate(elite_count);
    offspring.truncate(size.saturating_sub(elite_count));
    previous.append(&mut offspring);
    previous
}

/// Decodes every chromosome. A pure map over the population.
fn evaluate_population(
    instance: &Instance,
    chromosomes: Vec<Chromosome>,
    parallel: bool,
) -> Result<Vec<Individual>, ScheduleError> {
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        return chromosomes
            .into_par_iter()
            .map(|c| Individual::evaluate(instance, c))
            .collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    chromosomes
        .into_iter()
        .map(|c| Individual::evaluate(instance, c))
        .collect()
}

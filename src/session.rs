//! Scheduling session: one instance, one initial schedule, and a side-by-side
//! comparison of every search method against it.

use std::fmt;

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::builder::{random_schedule, sequential_schedule};
use crate::error::ScheduleError;
use crate::ga::GaConfig;
use crate::local::HillClimbConfig;
use crate::model::{Instance, Schedule};
use crate::sa::SaConfig;
use crate::search::{genetic_algorithm, hill_climb, hill_climb_bounded, simulated_annealing};

/// A search method in a [`ComparisonReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Method {
    HillClimb,
    HillClimbTolerance,
    SimulatedAnnealing,
    GeneticAlgorithm,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::HillClimb => "Hill Climbing",
            Method::HillClimbTolerance => "Hill Climbing with Tolerance",
            Method::SimulatedAnnealing => "Simulated Annealing",
            Method::GeneticAlgorithm => "Genetic Algorithm",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Parameters for [`SchedulingSession::compare`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComparisonConfig {
    /// Shared hill climbing settings (budget). Tolerance is set per method.
    pub hill_climb: HillClimbConfig,

    /// `tmax` for hill climbing with tolerance. `None` = number of jobs.
    pub tolerance: Option<usize>,

    pub annealing: SaConfig,

    pub genetic: GaConfig,
}

impl ComparisonConfig {
    pub fn with_hill_climb(mut self, config: HillClimbConfig) -> Self {
        self.hill_climb = config;
        self
    }

    pub fn with_tolerance(mut self, tmax: usize) -> Self {
        self.tolerance = Some(tmax);
        self
    }

    pub fn with_annealing(mut self, config: SaConfig) -> Self {
        self.annealing = config;
        self
    }

    pub fn with_genetic(mut self, config: GaConfig) -> Self {
        self.genetic = config;
        self
    }
}

/// One method's line in a [`ComparisonReport`].
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub method: Method,

    /// Human-readable parameter summary.
    pub note: String,

    pub makespan: u64,

    /// `100 * (initial - makespan) / initial`, 0 when the initial makespan is 0.
    pub gain_percent: f64,

    pub schedule: Schedule,
}

/// Result of running every method on the same initial schedule.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub initial_makespan: u64,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonReport {
    /// The row with the highest gain. Ties go to the earlier row.
    pub fn best(&self) -> Option<&ComparisonRow> {
        self.rows.iter().fold(None, |best: Option<&ComparisonRow>, row| match best {
            Some(b) if b.gain_percent >= row.gain_percent => Some(b),
            _ => Some(row),
        })
    }

    pub fn row(&self, method: Method) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.method == method)
    }
}

/// Percentage improvement of `makespan` over `initial`.
pub fn gain_percent(initial: u64, makespan: u64) -> f64 {
    if initial == 0 {
        return 0.0;
    }
    100.0 * (initial as f64 - makespan as f64) / initial as f64
}

/// Holds an instance and the initial schedule every search starts from.
///
/// # Examples
///
/// ```
/// use u_jobshop::model::Instance;
/// use u_jobshop::random::create_rng;
/// use u_jobshop::session::{ComparisonConfig, SchedulingSession};
///
/// let inst = Instance::new(vec![
///     vec![("M1", 3), ("M2", 5)],
///     vec![("M2", 4), ("M1", 2)],
/// ]).unwrap();
/// let mut session = SchedulingSession::new(inst);
/// session.initialize_sequential();
///
/// let mut rng = create_rng(42);
/// let report = session
///     .compare(&ComparisonConfig::default(), &mut rng)
///     .unwrap()
///     .unwrap();
/// assert_eq!(report.rows.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SchedulingSession {
    instance: Instance,
    initial: Option<Schedule>,
}

impl SchedulingSession {
    pub fn new(instance: Instance) -> Self {
        Self {
            instance,
            initial: None,
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn initial_schedule(&self) -> Option<&Schedule> {
        self.initial.as_ref()
    }

    /// Sets the initial schedule to the fully sequential per-job schedule.
    pub fn initialize_sequential(&mut self) -> &Schedule {
        self.initial.insert(sequential_schedule(&self.instance))
    }

    /// Sets the initial schedule to a random feasible schedule.
    pub fn initialize_random<R: Rng>(&mut self, rng: &mut R) -> &Schedule {
        self.initial.insert(random_schedule(&self.instance, rng))
    }

    /// Sets a caller-built initial schedule after checking it against the instance.
    pub fn with_initial_schedule(mut self, schedule: Schedule) -> Result<Self, ScheduleError> {
        schedule.verify(&self.instance)?;
        self.initial = Some(schedule);
        Ok(self)
    }

    /// Runs every method from the initial schedule.
    ///
    /// Returns `Ok(None)` (with a warning) when no initial schedule has been set.
    pub fn compare<R: Rng>(
        &self,
        config: &ComparisonConfig,
        rng: &mut R,
    ) -> Result<Option<ComparisonReport>, ScheduleError> {
        let Some(initial) = &self.initial else {
            log::warn!("compare called before an initial schedule was generated");
            return Ok(None);
        };

        let instance = &self.instance;
        let initial_makespan = initial.makespan();
        let tmax = config.tolerance.unwrap_or(instance.job_count()).max(1);
        let row = |method: Method, note: String, schedule: Schedule| {
            let makespan = schedule.makespan();
            ComparisonRow {
                method,
                note,
                makespan,
                gain_percent: gain_percent(initial_makespan, makespan),
                schedule,
            }
        };

        let mut rows = Vec::with_capacity(4);

        let hc = hill_climb(instance, initial, &config.hill_climb, rng)?;
        rows.push(row(Method::HillClimb, "tmax = 1".into(), hc.schedule));

        let hct = hill_climb_bounded(instance, initial, tmax, &config.hill_climb, rng)?;
        rows.push(row(
            Method::HillClimbTolerance,
            format!("tmax = {tmax}"),
            hct.schedule,
        ));

        let sa = simulated_annealing(instance, initial, &config.annealing, rng)?;
        let a = &config.annealing;
        rows.push(row(
            Method::SimulatedAnnealing,
            format!(
                "T0 = {}, Tmin = {}, r = {}",
                a.initial_temperature, a.min_temperature, a.cooling_factor
            ),
            sa.schedule,
        ));

        let ga = genetic_algorithm(instance, &config.genetic, rng)?;
        let g = &config.genetic;
        rows.push(row(
            Method::GeneticAlgorithm,
            format!(
                "population = {}, generations = {}, crossover = {}, mutation = {}, elite = {}",
                g.population_size, g.generations, g.crossover_rate, g.mutation_rate, g.elite_rate
            ),
            ga.schedule,
        ));

        for r in &rows {
            log::info!("{}: makespan {} ({:+.2}%)", r.method, r.makespan, r.gain_percent);
        }

        Ok(Some(ComparisonReport {
            initial_makespan,
            rows,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScheduledOperation;
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
    fn test_gain_percent() {
        assert!((gain_percent(30, 24) - 20.0).abs() < 1e-12);
        assert!((gain_percent(20, 25) + 25.0).abs() < 1e-12);
        assert_eq!(gain_percent(0, 0), 0.0);
    }

    #[test]
    fn test_compare_without_initial_schedule() {
        let session = SchedulingSession::new(sample());
        let mut rng = create_rng(0);
        let report = session.compare(&ComparisonConfig::default(), &mut rng).unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn test_compare_all_methods() {
        let mut session = SchedulingSession::new(sample());
        assert_eq!(session.initialize_sequential().makespan(), 30);

        let mut rng = create_rng(42);
        let report = session
            .compare(&ComparisonConfig::default(), &mut rng)
            .unwrap()
            .unwrap();

        assert_eq!(report.initial_makespan, 30);
        let methods: Vec<Method> = report.rows.iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![
                Method::HillClimb,
                Method::HillClimbTolerance,
                Method::SimulatedAnnealing,
                Method::GeneticAlgorithm,
            ]
        );
        assert_eq!(report.row(Method::HillClimbTolerance).unwrap().note, "tmax = 3");
        for row in &report.rows {
            assert!(row.makespan <= 30, "{} regressed: {}", row.method, row.makespan);
            assert!(row.gain_percent >= 0.0);
            assert!(row.schedule.verify(session.instance()).is_ok());
        }
    }

    #[test]
    fn test_best_picks_highest_gain() {
        let mk = |method, gain_percent| ComparisonRow {
            method,
            note: String::new(),
            makespan: 0,
            gain_percent,
            schedule: Schedule::new(),
        };
        let report = ComparisonReport {
            initial_makespan: 10,
            rows: vec![
                mk(Method::HillClimb, 10.0),
                mk(Method::SimulatedAnnealing, 20.0),
                mk(Method::GeneticAlgorithm, 20.0),
            ],
        };
        assert_eq!(report.best().unwrap().method, Method::SimulatedAnnealing);
        let empty = ComparisonReport {
            initial_makespan: 0,
            rows: vec![],
        };
        assert!(empty.best().is_none());
    }

    #[test]
    fn test_with_initial_schedule_verifies() {
        let inst = sample();
        let bad = Schedule::from_entries(vec![ScheduledOperation::new(0, 0, 0, 0, 3)]);
        assert!(SchedulingSession::new(inst.clone()).with_initial_schedule(bad).is_err());

        let good = sequential_schedule(&inst);
        let session = SchedulingSession::new(inst).with_initial_schedule(good.clone()).unwrap();
        assert_eq!(session.initial_schedule(), Some(&good));
    }

    #[test]
    fn test_initialize_random_is_feasible() {
        let mut session = SchedulingSession::new(sample());
        let mut rng = create_rng(5);
        let schedule = session.initialize_random(&mut rng).clone();
        assert!(schedule.verify(session.instance()).is_ok());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::SimulatedAnnealing.to_string(), "Simulated Annealing");
    }
}

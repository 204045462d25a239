//! Job-repetition chromosome and its repair operator.
//!
//! A chromosome is a flat sequence of job indices in which every job `j`
//! appears exactly `operations(j)` times. Decoding reads it left to right:
//! the n-th occurrence of `j` dispatches the n-th operation of `j`.
//! Every permutation of a valid chromosome is valid again, which is what
//! makes swap mutation safe. Positional crossover is not, so children are
//! passed through [`repair`].

use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::operators::{single_point_crossover, swap_mutation};
use crate::builder::decode_chromosome;
use crate::error::ScheduleError;
use crate::model::{Instance, Schedule};

/// A job-repetition encoded GA individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chromosome {
    genes: Vec<usize>,
}

impl Chromosome {
    /// Each job index repeated once per operation, in job order.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_jobshop::ga::Chromosome;
    /// use u_jobshop::model::Instance;
    ///
    /// let inst = Instance::new(vec![
    ///     vec![("M1", 3), ("M2", 2)],
    ///     vec![("M2", 4)],
    /// ]).unwrap();
    /// assert_eq!(Chromosome::base(&inst).genes(), &[0, 0, 1]);
    /// ```
    pub fn base(instance: &Instance) -> Self {
        let genes = instance
            .operation_counts()
            .into_iter()
            .enumerate()
            .flat_map(|(job, count)| std::iter::repeat_n(job, count))
            .collect();
        Self { genes }
    }

    /// A uniformly shuffled copy of [`Chromosome::base`].
    pub fn random<R: Rng>(instance: &Instance, rng: &mut R) -> Self {
        let mut chromosome = Self::base(instance);
        chromosome.genes.shuffle(rng);
        chromosome
    }

    /// Wraps raw genes without checking them.
    ///
    /// Use [`repair`] to obtain a chromosome that is valid for an instance.
    pub fn from_genes(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Whether every job appears exactly as often as it has operations.
    pub fn counts_match(&self, instance: &Instance) -> bool {
        let mut remaining = instance.operation_counts();
        for &job in &self.genes {
            match remaining.get_mut(job) {
                Some(count) if *count > 0 => *count -= 1,
                _ => return false,
            }
        }
        remaining.iter().all(|&count| count == 0)
    }

    /// Single-point crossover followed by [`repair`] of both children.
    ///
    /// # Panics
    /// Panics if the parents have different lengths.
    pub fn crossover<R: Rng>(
        &self,
        other: &Chromosome,
        instance: &Instance,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        let (a, b) = single_point_crossover(&self.genes, &other.genes, rng);
        (repair(instance, &a), repair(instance, &b))
    }

    /// Swaps the genes at two distinct random positions.
    pub fn mutate<R: Rng>(&mut self, rng: &mut R) {
        swap_mutation(&mut self.genes, rng);
    }

    /// Decodes into a schedule (see [`decode_chromosome`]).
    pub fn decode(&self, instance: &Instance) -> Result<Schedule, ScheduleError> {
        decode_chromosome(instance, &self.genes)
    }
}

/// Restores the job-count multiset of a raw gene sequence.
///
/// Genes are kept in place while their job still needs occurrences.
/// Surplus and unknown genes leave holes that are filled, left to right,
/// with the missing occurrences in job order. Missing occurrences beyond
/// the available holes are appended; holes left over are dropped. A
/// sequence that is already valid is returned unchanged.
///
/// # Examples
///
/// ```
/// use u_jobshop::ga::repair;
/// use u_jobshop::model::Instance;
///
/// let inst = Instance::new(vec![
///     vec![("M1", 1), ("M2", 1)],
///     vec![("M2", 1), ("M1", 1)],
/// ]).unwrap();
///
/// let fixed = repair(&inst, &[0, 0, 0, 1]);
/// assert_eq!(fixed.genes(), &[0, 0, 1, 1]);
/// ```
pub fn repair(instance: &Instance, raw: &[usize]) -> Chromosome {
    let mut needed = instance.operation_counts();
    let mut slots: Vec<Option<usize>> = Vec::with_capacity(raw.len());

    for &job in raw {
        match needed.get_mut(job) {
            Some(count) if *count > 0 => {
                *count -= 1;
                slots.push(Some(job));
            }
            _ => slots.push(None),
        }
    }

    let mut missing = needed
        .iter()
        .enumerate()
        .flat_map(|(job, &count)| std::iter::repeat_n(job, count));

    let mut genes = Vec::with_capacity(instance.operation_count());
    for slot in slots {
        match slot {
            Some(job) => genes.push(job),
            None => {
                if let Some(job) = missing.next() {
                    genes.push(job);
                }
            }
        }
    }
    genes.extend(missing);

    Chromosome { genes }
}

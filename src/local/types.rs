//! Core trait for single-solution local search.

use rand::Rng;

/// Defines a local search problem over some solution representation.
///
/// The user implements neighbor generation and cost evaluation; the
/// runners handle acceptance, termination, and best tracking.
///
/// # Minimization
///
/// Lower cost is better. A candidate without a cost (`None`) is
/// infeasible and is always rejected.
///
/// # Examples
///
/// ```ignore
/// struct SortProblem;
///
/// impl LocalSearchProblem for SortProblem {
///     type Solution = Vec<usize>;
///
///     fn cost(&self, perm: &Vec<usize>) -> Option<u64> {
///         Some(perm.iter().enumerate().filter(|&(i, &v)| i != v).count() as u64)
///     }
///
///     fn neighbor<R: Rng>(&self, perm: &Vec<usize>, rng: &mut R) -> Vec<usize> {
///         let mut next = perm.clone();
///         let i = rng.random_range(0..next.len());
///         let j = rng.random_range(0..next.len());
///         next.swap(i, j);
///         next
///     }
/// }
/// ```
pub trait LocalSearchProblem: Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Cost of a solution, or `None` if it is infeasible.
    fn cost(&self, solution: &Self::Solution) -> Option<u64>;

    /// Generates a neighbor of `solution` without modifying it.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}

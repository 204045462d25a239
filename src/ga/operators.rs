//! Genetic operators on raw gene slices.
//!
//! These operate on `&[usize]` job-index sequences and know nothing about
//! instances. [`single_point_crossover`] is positional and does not
//! preserve job counts; [`swap_mutation`] does.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Bierwirth (1995), "A Generalized Permutation Approach to Job Shop
//!   Scheduling with Genetic Algorithms"

use rand::Rng;

/// Single-point crossover.
///
/// Cuts both parents at one random index in `[1, n-1]` and returns
/// `(p1[..cut] + p2[cut..], p2[..cut] + p1[cut..])`. Parents shorter than
/// two genes are returned as copies.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let cut = rng.random_range(1..n);
    splice(parent1, parent2, cut)
}

fn splice(parent1: &[usize], parent2: &[usize], cut: usize) -> (Vec<usize>, Vec<usize>) {
    let mut child1 = Vec::with_capacity(parent1.len());
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(parent2.len());
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

/// Swap mutation: exchange the genes at two distinct random positions.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(genes: &mut [usize], rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    let picked = rand::seq::index::sample(rng, n, 2);
    genes.swap(picked.index(0), picked.index(1));
}

//! Fitness-proportionate (roulette wheel) selection.
//!
//! Makespans are turned into weights by [`fitness_weights`]; parents are
//! then drawn with [`roulette_select`].
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, Ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

/// Raw fitness of a makespan: `1 / makespan`, or 0 for a zero makespan.
pub fn fitness(makespan: u64) -> f64 {
    if makespan > 0 {
        1.0 / makespan as f64
    } else {
        0.0
    }
}

/// Selection weights for a population, normalized to sum to 1.
///
/// Falls back to a uniform distribution when every raw fitness is 0.
///
/// # Examples
///
/// ```
/// use u_jobshop::ga::fitness_weights;
///
/// let w = fitness_weights(&[10, 10, 20, 20]);
/// assert!((w[0] - 1.0 / 3.0).abs() < 1e-12);
/// assert!((w[2] - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn fitness_weights(makespans: &[u64]) -> Vec<f64> {
    if makespans.is_empty() {
        return Vec::new();
    }
    let raw: Vec<f64> = makespans.iter().map(|&m| fitness(m)).collect();
    let total: f64 = raw.iter().sum();
    if total > 0.0 {
        raw.into_iter().map(|f| f / total).collect()
    } else {
        vec![1.0 / makespans.len() as f64; makespans.len()]
    }
}

/// Roulette wheel selection over non-negative weights.
///
/// Draws `u` uniformly in `[0, total)` and returns the first index whose
/// cumulative weight reaches `u`, skipping zero weights. The last index
/// is returned if float rounding leaves the draw uncovered. A zero total
/// selects uniformly; an empty slice returns 0.
///
/// # Complexity
/// O(n) per selection (linear scan)
pub fn roulette_select<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let n = weights.len();
    if n <= 1 {
        return 0;
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return rng.random_range(0..n);
    }

    let draw = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if w > 0.0 && cumulative >= draw {
            return i;
        }
    }
    n - 1
}

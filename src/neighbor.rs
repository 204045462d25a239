//! Neighbor generation for machine orderings.

use rand::seq::index::sample;
use rand::Rng;

use crate::model::MachineOrdering;

/// Produces a single-swap neighbor of `ordering`.
///
/// Picks a machine uniformly among those with at least one operation and,
/// if it has two or more, swaps two distinct positions of its sequence.
/// A machine with a single operation yields an unchanged copy (no-op move).
/// The input is never modified.
pub fn perturb<R: Rng>(ordering: &MachineOrdering, rng: &mut R) -> MachineOrdering {
    let mut next = ordering.clone();

    let busy: Vec<usize> = ordering
        .sequences()
        .iter()
        .enumerate()
        .filter(|(_, seq)| !seq.is_empty())
        .map(|(m, _)| m)
        .collect();
    if busy.is_empty() {
        return next;
    }

    let machine = busy[rng.random_range(0..busy.len())];
    let len = ordering.sequences()[machine].len();
    if len >= 2 {
        let picked = sample(rng, len, 2);
        next.swap(machine, picked.index(0), picked.index(1));
    }
    next
}

//! Makespan evaluation.

use crate::model::Schedule;

/// Makespan of a schedule: the maximum finish time, 0 when empty.
pub fn evaluate(schedule: &Schedule) -> u64 {
    schedule
        .entries()
        .iter()
        .map(|e| e.finish)
        .max()
        .unwrap_or(0)
}

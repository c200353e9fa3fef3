//! Constrained nearest-neighbor sequencer.
//!
//! Solves the path variant of the problem: index 0 (start) and index n-1
//! (end) are fixed, only the interior order is chosen. Greedy and O(n²),
//! which is fine at the point counts this tool sees; a worse tour beats an
//! exact solver's combinatorial cost here.

use crate::error::PlanError;
use crate::matrix::{CellCost, CostMatrix};
use crate::model::{Leg, Preference};

fn metric(cell: CellCost, preference: Preference) -> f64 {
    match preference {
        Preference::Distance => cell.distance_meters,
        Preference::Time => cell.duration_seconds,
    }
}

/// Produce a visiting order over matrix indices: starts at 0, ends at n-1,
/// visits every interior index exactly once.
///
/// At each step the cheapest reachable unvisited interior index wins; ties
/// break to the lowest index, so the result is fully deterministic. Fails
/// with [`PlanError::RouteImpossible`] when some step has no reachable
/// candidate left; the order never silently omits a stop.
pub fn sequence(matrix: &CostMatrix, preference: Preference) -> Result<Vec<usize>, PlanError> {
    let n = matrix.len();
    if n < 2 {
        return Err(PlanError::RouteImpossible);
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    order.push(0);
    visited[0] = true;

    // Interior indices are 1..n-1 exclusive; the end is appended last.
    while order.len() < n - 1 {
        let current = order[order.len() - 1];
        let mut best: Option<(usize, f64)> = None;

        for candidate in 1..n - 1 {
            if visited[candidate] {
                continue;
            }
            let Some(cell) = matrix.cost(current, candidate) else {
                // No known path to this candidate; it may still be reached
                // from a later stop.
                continue;
            };
            let value = metric(cell, preference);
            if best.is_none_or(|(_, best_value)| value < best_value) {
                best = Some((candidate, value));
            }
        }

        match best {
            Some((candidate, _)) => {
                order.push(candidate);
                visited[candidate] = true;
            }
            None => return Err(PlanError::RouteImpossible),
        }
    }

    order.push(n - 1);
    Ok(order)
}

/// Re-read the matrix along a finalized order and sum it into legs and
/// totals. The scan above never checks the final hop into the end index, so
/// an unreachable cell can still surface here; that too is
/// [`PlanError::RouteImpossible`].
pub fn aggregate(
    matrix: &CostMatrix,
    order: &[usize],
) -> Result<(Vec<Leg>, f64, f64), PlanError> {
    let mut legs = Vec::with_capacity(order.len().saturating_sub(1));
    let mut total_distance = 0.0;
    let mut total_duration = 0.0;

    for pair in order.windows(2) {
        let cell = matrix
            .cost(pair[0], pair[1])
            .ok_or(PlanError::RouteImpossible)?;
        total_distance += cell.distance_meters;
        total_duration += cell.duration_seconds;
        legs.push(Leg {
            distance_meters: cell.distance_meters,
            duration_seconds: cell.duration_seconds,
        });
    }

    Ok((legs, total_distance, total_duration))
}

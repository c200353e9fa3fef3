//! All-pairs cost matrix over an ordered point list.
//!
//! Indexed by the flattened point order `[start, waypoints…, end]`. The
//! matrix is not assumed symmetric (one-way streets are real) and the
//! diagonal is never consulted. A `None` cell means no known path between
//! that pair; it is never coerced to zero or infinity.

use crate::error::PlanError;

/// Validated travel cost of one ordered pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellCost {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Square matrix of pairwise costs with per-cell reachability.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    cells: Vec<Vec<Option<CellCost>>>,
}

impl CostMatrix {
    /// Build from row-major cells. Fails if the matrix is not square; a
    /// malformed shape can only come from a broken provider response.
    pub fn from_rows(cells: Vec<Vec<Option<CellCost>>>) -> Result<Self, PlanError> {
        let n = cells.len();
        if cells.iter().any(|row| row.len() != n) {
            return Err(PlanError::ProviderUnavailable(
                "cost matrix response is not square".to_string(),
            ));
        }
        Ok(Self { cells })
    }

    /// Number of points (matrix dimension).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cost of travelling `from -> to`, or `None` when the pair is
    /// unreachable or out of bounds.
    pub fn cost(&self, from: usize, to: usize) -> Option<CellCost> {
        self.cells.get(from)?.get(to).copied().flatten()
    }
}

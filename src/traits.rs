//! Seams for the external collaborators the planner depends on.
//!
//! These are intentionally minimal. Concrete adapters (OSRM, Nominatim,
//! haversine estimation) live in their own modules; tests substitute mocks.

use crate::error::PlanError;
use crate::matrix::CostMatrix;
use crate::model::{GeoPoint, Leg, TravelMode};

/// Resolves a free-text address to a [`GeoPoint`].
pub trait Geocoder {
    /// Fails with [`PlanError::AddressNotFound`] when the address yields no
    /// match.
    fn geocode(&self, address: &str) -> Result<GeoPoint, PlanError>;
}

/// Provides an all-pairs cost matrix for a set of points.
///
/// The matrix must be square over exactly the given points, in order.
/// Pairs the provider reports as unroutable appear as unreachable cells,
/// not as errors.
pub trait PairwiseCostProvider {
    fn pairwise_costs(
        &self,
        points: &[GeoPoint],
        mode: TravelMode,
    ) -> Result<CostMatrix, PlanError>;
}

/// Solution returned by a provider's native waypoint optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSolution {
    /// Visiting order of the interior waypoints, as a permutation of the
    /// input waypoint indices.
    pub waypoint_order: Vec<usize>,
    /// Provider-reported costs, one leg per consecutive stop pair.
    pub legs: Vec<Leg>,
}

/// Delegates the whole ordering decision to the provider.
pub trait WaypointOptimizer {
    /// Fails with [`PlanError::ProviderOptimizationFailed`] on any
    /// non-success provider status.
    fn optimize_waypoints(
        &self,
        start: &GeoPoint,
        end: &GeoPoint,
        waypoints: &[GeoPoint],
        mode: TravelMode,
    ) -> Result<ProviderSolution, PlanError>;
}

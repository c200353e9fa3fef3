//! Haversine cost provider (fallback when no routing server is available).
//!
//! Uses great-circle distance and an assumed per-mode speed. Less accurate
//! than a road network (ignores roads entirely) but always available, and
//! every pair is reachable by construction.

use crate::matrix::{CellCost, CostMatrix};
use crate::model::{GeoPoint, TravelMode};
use crate::traits::PairwiseCostProvider;
use crate::error::PlanError;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average speeds per travel mode, km/h.
fn assumed_speed_kmh(mode: TravelMode) -> f64 {
    match mode {
        TravelMode::Driving => 40.0,
        TravelMode::Bicycling => 15.0,
        TravelMode::Walking => 5.0,
    }
}

/// Great-circle estimate of pairwise costs.
#[derive(Debug, Clone, Default)]
pub struct HaversineCosts;

impl HaversineCosts {
    /// Haversine distance between two points in kilometers.
    fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

impl PairwiseCostProvider for HaversineCosts {
    fn pairwise_costs(
        &self,
        points: &[GeoPoint],
        mode: TravelMode,
    ) -> Result<CostMatrix, PlanError> {
        let speed = assumed_speed_kmh(mode);
        let cells = points
            .iter()
            .map(|from| {
                points
                    .iter()
                    .map(|to| {
                        let km = Self::haversine_km(from, to);
                        Some(CellCost {
                            distance_meters: km * 1000.0,
                            duration_seconds: km / speed * 3600.0,
                        })
                    })
                    .collect()
            })
            .collect();

        CostMatrix::from_rows(cells)
    }
}

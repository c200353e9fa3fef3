//! Test fixtures for route-planner.
//!
//! Provides point builders, hand-constructed cost matrices, and mock
//! provider implementations for the planner seams.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use route_planner::error::PlanError;
use route_planner::matrix::{CellCost, CostMatrix};
use route_planner::model::{GeoPoint, TravelMode};
use route_planner::traits::{
    Geocoder, PairwiseCostProvider, ProviderSolution, WaypointOptimizer,
};

pub fn point(address: &str, lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(address, lat, lng)
}

/// Reachable cell with the given (distance, duration).
pub fn c(distance: f64, duration: f64) -> Option<(f64, f64)> {
    Some((distance, duration))
}

/// Unreachable cell.
pub fn x() -> Option<(f64, f64)> {
    None
}

/// Build a matrix from (distance, duration) cells.
pub fn matrix(rows: Vec<Vec<Option<(f64, f64)>>>) -> CostMatrix {
    let cells = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    cell.map(|(distance_meters, duration_seconds)| CellCost {
                        distance_meters,
                        duration_seconds,
                    })
                })
                .collect()
        })
        .collect();
    CostMatrix::from_rows(cells).expect("fixture matrix must be square")
}

/// Square matrix where both metrics of cell (i, j) derive from |i - j|.
pub fn distance_ladder(n: usize) -> CostMatrix {
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    let steps = i.abs_diff(j) as f64;
                    c(steps * 1000.0, steps * 60.0)
                })
                .collect()
        })
        .collect();
    matrix(rows)
}

/// Cost provider that hands back a fixed matrix regardless of points.
pub struct StaticCosts {
    pub matrix: CostMatrix,
}

impl PairwiseCostProvider for StaticCosts {
    fn pairwise_costs(
        &self,
        _points: &[GeoPoint],
        _mode: TravelMode,
    ) -> Result<CostMatrix, PlanError> {
        Ok(self.matrix.clone())
    }
}

/// Cost provider that always fails, for exercising error propagation.
pub struct UnavailableCosts;

impl PairwiseCostProvider for UnavailableCosts {
    fn pairwise_costs(
        &self,
        _points: &[GeoPoint],
        _mode: TravelMode,
    ) -> Result<CostMatrix, PlanError> {
        Err(PlanError::ProviderUnavailable("scripted outage".to_string()))
    }
}

/// Waypoint optimizer with a scripted outcome and a call counter.
pub struct ScriptedOptimizer {
    solution: Option<ProviderSolution>,
    pub calls: Cell<usize>,
}

impl ScriptedOptimizer {
    pub fn failing() -> Self {
        Self {
            solution: None,
            calls: Cell::new(0),
        }
    }

    pub fn returning(solution: ProviderSolution) -> Self {
        Self {
            solution: Some(solution),
            calls: Cell::new(0),
        }
    }
}

impl WaypointOptimizer for ScriptedOptimizer {
    fn optimize_waypoints(
        &self,
        _start: &GeoPoint,
        _end: &GeoPoint,
        _waypoints: &[GeoPoint],
        _mode: TravelMode,
    ) -> Result<ProviderSolution, PlanError> {
        self.calls.set(self.calls.get() + 1);
        match &self.solution {
            Some(solution) => Ok(solution.clone()),
            None => Err(PlanError::ProviderOptimizationFailed(
                "scripted failure".to_string(),
            )),
        }
    }
}

/// Geocoder backed by a fixed address table.
pub struct TableGeocoder {
    points: HashMap<String, GeoPoint>,
}

impl TableGeocoder {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self {
            points: points
                .into_iter()
                .map(|point| (point.address.clone(), point))
                .collect(),
        }
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, address: &str) -> Result<GeoPoint, PlanError> {
        self.points
            .get(address)
            .cloned()
            .ok_or_else(|| PlanError::AddressNotFound {
                address: address.to_string(),
            })
    }
}

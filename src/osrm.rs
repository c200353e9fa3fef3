//! OSRM HTTP adapter.
//!
//! Implements both provider seams against a single OSRM instance: the
//! `/table` service yields the all-pairs cost matrix, the `/trip` service
//! (fixed first/last, no roundtrip) acts as the native waypoint optimizer.

use serde::Deserialize;
use tracing::debug;

use crate::error::PlanError;
use crate::matrix::{CellCost, CostMatrix};
use crate::model::{GeoPoint, Leg, TravelMode};
use crate::traits::{PairwiseCostProvider, ProviderSolution, WaypointOptimizer};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, PlanError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn coordinate_path(points: &[GeoPoint]) -> String {
        points
            .iter()
            .map(|point| format!("{:.6},{:.6}", point.lng, point.lat))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// OSRM profile segment for a travel mode.
fn profile(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Driving => "car",
        TravelMode::Bicycling => "bicycle",
        TravelMode::Walking => "foot",
    }
}

impl PairwiseCostProvider for OsrmClient {
    fn pairwise_costs(
        &self,
        points: &[GeoPoint],
        mode: TravelMode,
    ) -> Result<CostMatrix, PlanError> {
        let url = format!(
            "{}/table/v1/{}/{}?annotations=duration,distance",
            self.config.base_url,
            profile(mode),
            Self::coordinate_path(points)
        );
        debug!("requesting OSRM table for {} points", points.len());

        let body: OsrmTableResponse = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json()?;

        if body.code != "Ok" {
            return Err(PlanError::ProviderUnavailable(format!(
                "OSRM table returned code {}",
                body.code
            )));
        }

        let durations = body.durations.unwrap_or_default();
        let distances = body.distances.unwrap_or_default();
        if durations.len() != points.len() || distances.len() != points.len() {
            return Err(PlanError::ProviderUnavailable(
                "OSRM table response is missing rows".to_string(),
            ));
        }

        // A cell is usable only when OSRM reported both metrics; a null in
        // either annotation marks the pair unreachable.
        let cells = durations
            .into_iter()
            .zip(distances)
            .map(|(duration_row, distance_row)| {
                duration_row
                    .into_iter()
                    .zip(distance_row)
                    .map(|(duration, distance)| match (duration, distance) {
                        (Some(duration_seconds), Some(distance_meters)) => Some(CellCost {
                            distance_meters,
                            duration_seconds,
                        }),
                        _ => None,
                    })
                    .collect()
            })
            .collect();

        CostMatrix::from_rows(cells)
    }
}

impl WaypointOptimizer for OsrmClient {
    fn optimize_waypoints(
        &self,
        start: &GeoPoint,
        end: &GeoPoint,
        waypoints: &[GeoPoint],
        mode: TravelMode,
    ) -> Result<ProviderSolution, PlanError> {
        let mut points = Vec::with_capacity(waypoints.len() + 2);
        points.push(start.clone());
        points.extend(waypoints.iter().cloned());
        points.push(end.clone());

        let url = format!(
            "{}/trip/v1/{}/{}?source=first&destination=last&roundtrip=false",
            self.config.base_url,
            profile(mode),
            Self::coordinate_path(&points)
        );
        debug!("requesting OSRM trip for {} waypoints", waypoints.len());

        let body: OsrmTripResponse = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json()?;

        if body.code != "Ok" {
            return Err(PlanError::ProviderOptimizationFailed(format!(
                "OSRM trip returned code {}",
                body.code
            )));
        }

        let trip = body
            .trips
            .into_iter()
            .next()
            .ok_or_else(|| {
                PlanError::ProviderOptimizationFailed("OSRM trip returned no trips".to_string())
            })?;
        if body.waypoints.len() != points.len() {
            return Err(PlanError::ProviderOptimizationFailed(
                "OSRM trip waypoint count mismatch".to_string(),
            ));
        }

        // `waypoint_index` is each input point's position in the trip. With
        // source=first and destination=last the endpoints must stay fixed.
        let n = points.len();
        let first = body.waypoints[0].waypoint_index;
        let last = body.waypoints[n - 1].waypoint_index;
        if first != 0 || last != n - 1 {
            return Err(PlanError::ProviderOptimizationFailed(
                "OSRM trip moved a fixed endpoint".to_string(),
            ));
        }

        let mut interior: Vec<(usize, usize)> = body.waypoints[1..n - 1]
            .iter()
            .enumerate()
            .map(|(input_index, waypoint)| (waypoint.waypoint_index, input_index))
            .collect();
        interior.sort_unstable();
        let waypoint_order = interior.into_iter().map(|(_, input)| input).collect();

        let legs = trip
            .legs
            .into_iter()
            .map(|leg| Leg {
                distance_meters: leg.distance,
                duration_seconds: leg.duration,
            })
            .collect();

        Ok(ProviderSolution {
            waypoint_order,
            legs,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    durations: Option<Vec<Vec<Option<f64>>>>,
    distances: Option<Vec<Vec<Option<f64>>>>,
}

#[derive(Debug, Deserialize)]
struct OsrmTripResponse {
    code: String,
    #[serde(default)]
    trips: Vec<OsrmTrip>,
    #[serde(default)]
    waypoints: Vec<OsrmTripWaypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmTrip {
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmTripWaypoint {
    waypoint_index: usize,
}

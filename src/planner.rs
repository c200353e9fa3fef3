//! Selection policy composing the provider's native optimizer with the
//! local cost-matrix heuristic.

use tracing::{debug, warn};

use crate::error::PlanError;
use crate::model::{OptimizedRoute, Preference, RouteRequest, TravelMode};
use crate::sequencer::{aggregate, sequence};
use crate::store::RouteRecord;
use crate::traits::{Geocoder, PairwiseCostProvider, WaypointOptimizer};

/// Planning knobs.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Largest waypoint count for which the provider's native optimizer is
    /// attempted before falling back to the local heuristic.
    pub native_waypoint_limit: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            native_waypoint_limit: 10,
        }
    }
}

/// Optimize the visiting order of a request.
///
/// With at most `native_waypoint_limit` waypoints the provider's own
/// optimizer is tried first; any failure there falls back exactly once to
/// the cost-matrix + nearest-neighbor path. Above the limit the native
/// optimizer is never invoked (providers cap accepted waypoint counts).
/// Heuristic-path failures propagate to the caller verbatim.
pub fn plan<C, W>(
    request: &RouteRequest,
    preference: Preference,
    mode: TravelMode,
    costs: &C,
    optimizer: &W,
    options: &PlanOptions,
) -> Result<OptimizedRoute, PlanError>
where
    C: PairwiseCostProvider,
    W: WaypointOptimizer,
{
    if request.waypoints.len() <= options.native_waypoint_limit {
        match plan_via_provider(request, mode, optimizer) {
            Ok(route) => return Ok(route),
            Err(err) => {
                warn!("provider optimization failed, using local heuristic: {err}");
            }
        }
    }

    plan_via_heuristic(request, preference, mode, costs)
}

/// Native path: the provider reorders the waypoints and reports per-leg
/// costs; totals are summed from its legs, never recomputed.
pub fn plan_via_provider<W>(
    request: &RouteRequest,
    mode: TravelMode,
    optimizer: &W,
) -> Result<OptimizedRoute, PlanError>
where
    W: WaypointOptimizer,
{
    let solution =
        optimizer.optimize_waypoints(&request.start, &request.end, &request.waypoints, mode)?;

    let k = request.waypoints.len();
    if !is_permutation(&solution.waypoint_order, k) {
        return Err(PlanError::ProviderOptimizationFailed(format!(
            "waypoint order {:?} is not a permutation of 0..{k}",
            solution.waypoint_order
        )));
    }
    if solution.legs.len() != k + 1 {
        return Err(PlanError::ProviderOptimizationFailed(format!(
            "expected {} legs, provider returned {}",
            k + 1,
            solution.legs.len()
        )));
    }

    let mut stops = Vec::with_capacity(k + 2);
    stops.push(request.start.clone());
    for &index in &solution.waypoint_order {
        stops.push(request.waypoints[index].clone());
    }
    stops.push(request.end.clone());

    let total_distance_meters = solution.legs.iter().map(|leg| leg.distance_meters).sum();
    let total_duration_seconds = solution.legs.iter().map(|leg| leg.duration_seconds).sum();

    Ok(OptimizedRoute {
        stops,
        legs: solution.legs,
        total_distance_meters,
        total_duration_seconds,
        travel_mode: mode,
    })
}

/// Heuristic path: all-pairs matrix, nearest-neighbor order, leg-by-leg
/// aggregation against the same matrix.
pub fn plan_via_heuristic<C>(
    request: &RouteRequest,
    preference: Preference,
    mode: TravelMode,
    costs: &C,
) -> Result<OptimizedRoute, PlanError>
where
    C: PairwiseCostProvider,
{
    let points = request.flattened();
    debug!("building {0}x{0} cost matrix", points.len());
    let matrix = costs.pairwise_costs(&points, mode)?;
    if matrix.len() != points.len() {
        return Err(PlanError::ProviderUnavailable(format!(
            "cost matrix has {} rows for {} points",
            matrix.len(),
            points.len()
        )));
    }

    let order = sequence(&matrix, preference)?;
    let (legs, total_distance_meters, total_duration_seconds) = aggregate(&matrix, &order)?;
    let stops = order.iter().map(|&index| points[index].clone()).collect();

    Ok(OptimizedRoute {
        stops,
        legs,
        total_distance_meters,
        total_duration_seconds,
        travel_mode: mode,
    })
}

/// Resolve raw addresses into a request. Geocodes start, end, then each
/// waypoint in input order; the first failure aborts the whole attempt.
pub fn geocode_request<G>(
    geocoder: &G,
    start: &str,
    end: &str,
    waypoints: &[String],
) -> Result<RouteRequest, PlanError>
where
    G: Geocoder,
{
    let start = geocoder.geocode(start)?;
    let end = geocoder.geocode(end)?;
    let waypoints = waypoints
        .iter()
        .map(|address| geocoder.geocode(address))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RouteRequest::new(start, end, waypoints))
}

/// Re-run a persisted record: addresses are re-geocoded and the route
/// re-optimized. A stored result is never replayed verbatim, so stale
/// coordinates or provider changes cannot leak into the output.
pub fn replan<G, C, W>(
    record: &RouteRecord,
    geocoder: &G,
    costs: &C,
    optimizer: &W,
    options: &PlanOptions,
) -> Result<OptimizedRoute, PlanError>
where
    G: Geocoder,
    C: PairwiseCostProvider,
    W: WaypointOptimizer,
{
    let request = geocode_request(
        geocoder,
        &record.start_address,
        &record.end_address,
        &record.waypoint_addresses,
    )?;
    plan(
        &request,
        record.preference,
        record.travel_mode,
        costs,
        optimizer,
        options,
    )
}

fn is_permutation(order: &[usize], k: usize) -> bool {
    if order.len() != k {
        return false;
    }
    let mut seen = vec![false; k];
    for &index in order {
        if index >= k || seen[index] {
            return false;
        }
        seen[index] = true;
    }
    true
}

//! Core data model for route planning.
//!
//! These are plain carriers; resolving addresses, fetching costs, and
//! ordering stops all happen elsewhere. Display-string concerns (contact
//! annotations and the like) stay out of the model entirely.

use serde::{Deserialize, Serialize};

/// A resolved location: display address, coordinates, and an optional
/// provider-specific place identifier. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub place_id: Option<String>,
}

impl GeoPoint {
    pub fn new(address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            address: address.into(),
            lat,
            lng,
            place_id: None,
        }
    }
}

/// A single optimization request: fixed start, fixed end, and waypoints in
/// their unoptimized input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub waypoints: Vec<GeoPoint>,
}

impl RouteRequest {
    pub fn new(start: GeoPoint, end: GeoPoint, waypoints: Vec<GeoPoint>) -> Self {
        Self {
            start,
            end,
            waypoints,
        }
    }

    /// Flattened point list `[start, waypoints…, end]`, the index space the
    /// cost matrix and sequencer operate in.
    pub fn flattened(&self) -> Vec<GeoPoint> {
        let mut points = Vec::with_capacity(self.waypoints.len() + 2);
        points.push(self.start.clone());
        points.extend(self.waypoints.iter().cloned());
        points.push(self.end.clone());
        points
    }
}

/// Transport mode parameterizing cost computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Bicycling,
    Walking,
}

impl Default for TravelMode {
    fn default() -> Self {
        TravelMode::Driving
    }
}

impl TravelMode {
    /// Display label for result rendering.
    pub fn label(self) -> &'static str {
        match self {
            TravelMode::Driving => "by car",
            TravelMode::Bicycling => "by bicycle",
            TravelMode::Walking => "on foot",
        }
    }
}

/// Which metric the heuristic sequencer minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Distance,
    Time,
}

impl Default for Preference {
    fn default() -> Self {
        Preference::Time
    }
}

impl Preference {
    /// Parse a free-text preference parameter. Anything other than
    /// `"distance"` resolves to time-weighted optimization, the safe
    /// default.
    pub fn from_param(param: &str) -> Self {
        match param {
            "distance" => Preference::Distance,
            _ => Preference::Time,
        }
    }
}

/// Travel cost of one segment between consecutive stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// The optimizer's output: stops in visiting order (first = start, last =
/// end), one leg per consecutive pair, raw totals, and the mode used.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedRoute {
    pub stops: Vec<GeoPoint>,
    pub legs: Vec<Leg>,
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
    pub travel_mode: TravelMode,
}

impl OptimizedRoute {
    /// Total distance as kilometers with one decimal, e.g. `"12.3 km"`.
    pub fn total_distance_text(&self) -> String {
        format!("{:.1} km", self.total_distance_meters / 1000.0)
    }

    /// Total duration as a compact day/hour/minute string.
    pub fn total_duration_text(&self) -> String {
        format_duration(self.total_duration_seconds)
    }

    pub fn travel_mode_label(&self) -> &'static str {
        self.travel_mode.label()
    }
}

/// Compact duration rendering: nonzero days and hours are shown, minutes are
/// shown when nonzero or when they are the only component, e.g. `"1d 2h"`,
/// `"1h 5min"`, `"0min"`.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{days}d "));
    }
    if hours > 0 {
        out.push_str(&format!("{hours}h "));
    }
    if minutes > 0 || (days == 0 && hours == 0) {
        out.push_str(&format!("{minutes}min"));
    }
    out.trim_end().to_string()
}

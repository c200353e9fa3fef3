//! route-planner core
//!
//! Orders a fixed-start, fixed-end route through interior waypoints so that
//! total travel distance or duration is approximately minimal. Pairwise
//! costs come from an external routing provider; a local nearest-neighbor
//! heuristic covers the cases the provider's native optimizer cannot.

pub mod error;
pub mod model;
pub mod matrix;
pub mod traits;
pub mod sequencer;
pub mod planner;
pub mod osrm;
pub mod nominatim;
pub mod haversine;
pub mod store;

//! Error taxonomy for route planning.

use thiserror::Error;

/// Failures surfaced by geocoding, cost retrieval, and route optimization.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A supplied address could not be resolved to coordinates.
    #[error("address could not be geocoded: {address}")]
    AddressNotFound { address: String },

    /// The routing provider could not be reached or returned a
    /// transport-level error (timeouts included).
    #[error("routing provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// No complete tour exists: every remaining candidate step, or a leg of
    /// the chosen order, had no known path (e.g. points on different
    /// islands).
    #[error("no connection between at least two points")]
    RouteImpossible,

    /// The provider's native waypoint optimizer returned a non-success
    /// status or an unusable solution.
    #[error("provider waypoint optimization failed: {0}")]
    ProviderOptimizationFailed(String),
}

impl From<reqwest::Error> for PlanError {
    fn from(err: reqwest::Error) -> Self {
        PlanError::ProviderUnavailable(err.to_string())
    }
}

//! Nominatim geocoding client.

use serde::Deserialize;
use tracing::debug;

use crate::error::PlanError;
use crate::model::GeoPoint;
use crate::traits::Geocoder;

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "route-planner/0.1".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, PlanError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, address: &str) -> Result<GeoPoint, PlanError> {
        let url = format!("{}/search", self.config.base_url);
        debug!("geocoding address via Nominatim");

        let results: Vec<NominatimResult> = self
            .client
            .get(url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json()?;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| PlanError::AddressNotFound {
                address: address.to_string(),
            })?;

        let lat: f64 = result.lat.parse().map_err(|_| {
            PlanError::ProviderUnavailable("Nominatim returned an invalid latitude".to_string())
        })?;
        let lng: f64 = result.lon.parse().map_err(|_| {
            PlanError::ProviderUnavailable("Nominatim returned an invalid longitude".to_string())
        })?;

        Ok(GeoPoint {
            address: result.display_name,
            lat,
            lng,
            place_id: result.place_id.map(|id| id.to_string()),
        })
    }
}

/// Nominatim search result (coordinates arrive as strings).
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
    place_id: Option<u64>,
}

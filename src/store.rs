//! Persistence of named route records.
//!
//! Records keep the original addresses, never resolved coordinates: loading
//! a record re-geocodes and re-optimizes (see `planner::replan`), so stale
//! coordinates or provider changes cannot resurface.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Preference, RouteRequest, TravelMode};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("store format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// A named, timestamped route record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub name: String,
    /// Unix timestamp (seconds) of when the record was saved.
    pub saved_at: u64,
    pub start_address: String,
    pub end_address: String,
    pub waypoint_addresses: Vec<String>,
    pub preference: Preference,
    pub travel_mode: TravelMode,
}

impl RouteRecord {
    /// Capture a request's addresses under a user-chosen name.
    pub fn new(
        name: impl Into<String>,
        request: &RouteRequest,
        preference: Preference,
        travel_mode: TravelMode,
    ) -> Self {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);

        Self {
            name: name.into(),
            saved_at,
            start_address: request.start.address.clone(),
            end_address: request.end.address.clone(),
            waypoint_addresses: request
                .waypoints
                .iter()
                .map(|point| point.address.clone())
                .collect(),
            preference,
            travel_mode,
        }
    }
}

/// Stores and retrieves named route records.
pub trait RouteStore {
    fn save(&self, record: &RouteRecord) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<RouteRecord>, StoreError>;
    /// Remove every record with the given name; returns whether any existed.
    fn delete(&self, name: &str) -> Result<bool, StoreError>;
}

/// File-backed store: the whole record list lives in one JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Vec<RouteRecord>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, records: &[RouteRecord]) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(records)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl RouteStore for JsonFileStore {
    fn save(&self, record: &RouteRecord) -> Result<(), StoreError> {
        let mut records = self.read_all()?;
        records.push(record.clone());
        self.write_all(&records)
    }

    fn list(&self) -> Result<Vec<RouteRecord>, StoreError> {
        self.read_all()
    }

    fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let mut records = self.read_all()?;
        let before = records.len();
        records.retain(|record| record.name != name);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records)?;
        Ok(true)
    }
}

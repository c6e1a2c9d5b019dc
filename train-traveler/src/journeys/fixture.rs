//! File-backed journey service for development and testing.
//!
//! Loads journey results from JSON files and serves them as if they were
//! live planner responses.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Area, JourneyResult, JourneySnapshot};

use super::error::FetchError;
use super::service::JourneyService;

/// File holding the results served by `get_direct_journeys`.
pub const DIRECT_JOURNEYS_FILE: &str = "direct_journeys.json";

/// File holding the results served by `get_last_direct_journey`.
pub const LAST_DIRECT_JOURNEY_FILE: &str = "last_direct_journey.json";

#[derive(Debug, Default)]
struct FixtureData {
    direct: Vec<JourneyResult>,
    last: Vec<JourneyResult>,
}

/// Journey service that serves data from JSON files.
///
/// Expects a directory containing `direct_journeys.json` and, optionally,
/// `last_direct_journey.json`, each holding an array of journey results.
#[derive(Clone)]
pub struct FixtureJourneyService {
    data: Arc<RwLock<FixtureData>>,
}

impl FixtureJourneyService {
    /// Load fixtures from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let data = load_dir(data_dir.as_ref())?;
        Ok(Self {
            data: Arc::new(RwLock::new(data)),
        })
    }

    /// Build a service from in-memory results.
    pub fn from_results(direct: Vec<JourneyResult>, last: Vec<JourneyResult>) -> Self {
        Self {
            data: Arc::new(RwLock::new(FixtureData { direct, last })),
        }
    }

    /// Reload fixtures from disk. On failure the current data is kept.
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), FetchError> {
        let fresh = load_dir(data_dir.as_ref())?;
        *self.data.write().await = fresh;
        Ok(())
    }
}

impl JourneyService for FixtureJourneyService {
    async fn get_direct_journeys(
        &self,
        start: &Area,
        end: &Area,
        count: u32,
    ) -> Result<JourneySnapshot, FetchError> {
        let data = self.data.read().await;
        let journeys = data
            .direct
            .iter()
            .take(count as usize)
            .cloned()
            .collect();
        Ok(JourneySnapshot::new(start.clone(), end.clone(), journeys))
    }

    async fn get_last_direct_journey(
        &self,
        start: &Area,
        end: &Area,
    ) -> Result<JourneySnapshot, FetchError> {
        let data = self.data.read().await;
        let last = data.last.last().cloned().ok_or_else(|| {
            FetchError::Unavailable(format!(
                "no last journey between {} and {}",
                start.label(),
                end.label()
            ))
        })?;
        Ok(JourneySnapshot::new(start.clone(), end.clone(), vec![last]))
    }
}

fn load_dir(data_dir: &Path) -> Result<FixtureData, FetchError> {
    let direct_path = data_dir.join(DIRECT_JOURNEYS_FILE);
    let direct = load_file(&direct_path)?;

    let last_path = data_dir.join(LAST_DIRECT_JOURNEY_FILE);
    let last = if last_path.is_file() {
        load_file(&last_path)?
    } else {
        Vec::new()
    };

    Ok(FixtureData { direct, last })
}

fn load_file(path: &Path) -> Result<Vec<JourneyResult>, FetchError> {
    let json = std::fs::read_to_string(path).map_err(|e| FetchError::Fixture {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&json).map_err(|e| FetchError::Fixture {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

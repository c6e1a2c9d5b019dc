//! Route entry configuration.
//!
//! A route entry is the stored configuration of one monitored route: how to
//! reach the journey planner, the two stop areas, and how to poll. It is
//! read once at startup and turned into one or two [`CoordinatorConfig`]s.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::coordinator::{CoordinatorConfig, DEFAULT_JOURNEY_COUNT, DEFAULT_POLL_INTERVAL_SECS};
use crate::domain::time::REFERENCE_TZ;
use crate::domain::{Area, AreaId, Coord, DomainError};

/// Default planner base URL.
pub const DEFAULT_CONNECTION_URL: &str = "https://api.sncf.com/v1";

/// Default coverage region.
pub const DEFAULT_CONNECTION_REGION: &str = "sncf";

/// Errors that can occur while loading a route entry.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The entry file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The entry is not valid JSON or misses fields
    #[error("invalid route entry: {0}")]
    Json(#[from] serde_json::Error),

    /// A field has an unacceptable value
    #[error("invalid route entry: {0}")]
    Invalid(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Planner connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_url")]
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_region")]
    pub region: String,
}

/// A stop area as stored in the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaEntry {
    pub area_id: AreaId,
    pub area_name: String,
    pub area_label: String,
    pub area_coord: Coord,
}

impl AreaEntry {
    pub fn to_area(&self) -> Result<Area, ConfigError> {
        let coord = Coord::new(self.area_coord.lon, self.area_coord.lat)?;
        Ok(Area::new(
            self.area_id.clone(),
            &self.area_name,
            &self.area_label,
            coord,
        ))
    }
}

/// Stored configuration of one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub connection: ConnectionConfig,
    pub start_area: AreaEntry,
    pub end_area: AreaEntry,

    /// Number of journeys requested by the "next journey" coordinator.
    #[serde(default = "default_journey")]
    pub journey: u32,

    /// Poll period of the "next journey" coordinator, in seconds.
    #[serde(default = "default_scan_interval")]
    pub scan_interval: u64,

    /// Also track the last journey of the day.
    #[serde(default)]
    pub last_journey: bool,

    /// Stop polling overnight once the next departure is tomorrow.
    #[serde(default)]
    pub pause_update_experimental: bool,

    /// Zone of the transit network. Defaults to Europe/Paris.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<Tz>,
}

fn default_url() -> String {
    DEFAULT_CONNECTION_URL.to_string()
}

fn default_region() -> String {
    DEFAULT_CONNECTION_REGION.to_string()
}

fn default_journey() -> u32 {
    DEFAULT_JOURNEY_COUNT
}

fn default_scan_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl RouteEntry {
    /// Read and validate an entry file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate an entry.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let entry: Self = serde_json::from_str(json)?;
        entry.validate()?;
        Ok(entry)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connection.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("empty API key".into()));
        }
        if self.connection.url.trim().is_empty() {
            return Err(ConfigError::Invalid("empty connection URL".into()));
        }
        if self.journey == 0 {
            return Err(ConfigError::Invalid("non-positive journey count".into()));
        }
        if self.scan_interval == 0 {
            return Err(ConfigError::Invalid("non-positive scan interval".into()));
        }
        self.start_area.to_area()?;
        self.end_area.to_area()?;
        Ok(())
    }

    pub fn timezone(&self) -> Tz {
        self.timezone.unwrap_or(REFERENCE_TZ)
    }

    /// The "next journey" configuration, followed by the "last journey" one
    /// when enabled.
    pub fn coordinator_configs(&self) -> Result<Vec<CoordinatorConfig>, ConfigError> {
        let start = self.start_area.to_area()?;
        let end = self.end_area.to_area()?;

        let next = CoordinatorConfig::next_journey(start.clone(), end.clone())
            .with_journey_count(self.journey)
            .with_poll_interval(self.scan_interval)
            .with_pause(self.pause_update_experimental)
            .with_timezone(self.timezone());

        let mut configs = vec![next];
        if self.last_journey {
            configs.push(
                CoordinatorConfig::last_journey(start, end)
                    .with_journey_count(self.journey)
                    .with_poll_interval(self.scan_interval)
                    .with_timezone(self.timezone()),
            );
        }
        Ok(configs)
    }
}

//! Journey types.
//!
//! A `Journey` is one planned trip between the configured stop areas, as
//! returned by the journey planner. Times are naive wall-clock times in the
//! transit network's local zone; see [`super::time`] for localization.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Public transport information attached to a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    /// Line label (e.g. "TER", "K12")
    pub label: String,
    /// Headsign or terminus of the vehicle
    pub direction: String,
    /// Physical mode (e.g. "TER / Intercités", "Train grande vitesse")
    pub physical_mode: String,
}

/// One leg of a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Duration of the section in seconds.
    pub duration: i64,
    /// Line information. Absent for walking or waiting sections.
    #[serde(default, rename = "informations")]
    pub info: Option<SectionInfo>,
}

impl Section {
    /// Returns the section duration.
    pub fn duration(&self) -> Duration {
        Duration::seconds(self.duration)
    }
}

/// A planned trip from the start area to the end area.
///
/// Sections are kept in the order the planner returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journey {
    #[serde(rename = "departure_date_time")]
    pub departure: NaiveDateTime,
    #[serde(rename = "arrival_date_time")]
    pub arrival: NaiveDateTime,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Journey {
    /// Returns the first section, which carries the line shown to users
    /// for direct journeys.
    pub fn first_section(&self) -> Option<&Section> {
        self.sections.first()
    }

    /// Returns the line information of the first section.
    pub fn first_info(&self) -> Option<&SectionInfo> {
        self.first_section().and_then(|s| s.info.as_ref())
    }

    /// Total time from departure to arrival.
    pub fn total_duration(&self) -> Duration {
        self.arrival.signed_duration_since(self.departure)
    }
}

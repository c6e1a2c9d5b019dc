//! Journey snapshots.
//!
//! A snapshot is the immutable result of one successful fetch. Coordinators
//! publish snapshots behind an `Arc` so the same value can be handed to every
//! subscriber and, during a pause window, served again without copying.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Area, Disruption, Journey};

/// One journey together with the disruptions affecting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyResult {
    pub journey: Journey,
    #[serde(default)]
    pub disruptions: Vec<Disruption>,
}

impl JourneyResult {
    pub fn new(journey: Journey, disruptions: Vec<Disruption>) -> Self {
        Self {
            journey,
            disruptions,
        }
    }

    pub fn is_disrupted(&self) -> bool {
        !self.disruptions.is_empty()
    }
}

/// Result of one fetch for a route.
///
/// Journeys are kept in the order the planner ranked them.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneySnapshot {
    start: Area,
    end: Area,
    journeys: Vec<JourneyResult>,
}

impl JourneySnapshot {
    pub fn new(start: Area, end: Area, journeys: Vec<JourneyResult>) -> Self {
        Self {
            start,
            end,
            journeys,
        }
    }

    pub fn start(&self) -> &Area {
        &self.start
    }

    pub fn end(&self) -> &Area {
        &self.end
    }

    pub fn journeys(&self) -> &[JourneyResult] {
        &self.journeys
    }

    pub fn get(&self, index: usize) -> Option<&JourneyResult> {
        self.journeys.get(index)
    }

    pub fn len(&self) -> usize {
        self.journeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }

    /// Earliest departure across all journeys, as a naive local time.
    pub fn earliest_departure(&self) -> Option<NaiveDateTime> {
        self.journeys.iter().map(|r| r.journey.departure).min()
    }
}

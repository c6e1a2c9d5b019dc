//! Renderers from a journey view to displayed values.
//!
//! Every renderer returns `None` when `index` is past the end of the view.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use crate::domain::{Disruption, JourneyResult, SeverityEffect};

use super::JourneyView;

/// Attributes describing one journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyAttributes {
    /// Line label of the first section
    pub line: Option<String>,

    /// Direction of the first section
    pub direction: Option<String>,

    pub departure_time: DateTime<Tz>,

    pub arrival_time: DateTime<Tz>,

    /// Duration of the first section in seconds
    pub duration: Option<i64>,

    pub physical_mode: Option<String>,

    /// Start stop label
    pub departure: String,

    /// End stop label
    pub arrival: String,
}

/// Type and message of a disruption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisruptionAttributes {
    pub disruption_type: SeverityEffect,
    pub disruption_message: Option<String>,
}

impl From<&Disruption> for DisruptionAttributes {
    fn from(disruption: &Disruption) -> Self {
        Self {
            disruption_type: disruption.severity_effect,
            disruption_message: disruption.first_message().map(str::to_string),
        }
    }
}

/// One entry of the route-level journey list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneySummary {
    #[serde(flatten)]
    pub attributes: JourneyAttributes,
    pub disruptions: Vec<DisruptionAttributes>,
    pub delay: Option<i64>,
}

/// Attributes of the route-level entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneysSummary {
    pub journeys: Vec<JourneySummary>,
}

pub fn departure(view: &JourneyView, index: usize) -> Option<DateTime<Tz>> {
    view.row(index).map(|row| row.departure)
}

pub fn arrival(view: &JourneyView, index: usize) -> Option<DateTime<Tz>> {
    view.row(index).map(|row| row.arrival)
}

/// Duration of the first section in seconds.
pub fn duration(view: &JourneyView, index: usize) -> Option<i64> {
    first_section_duration(view.result(index)?)
}

/// Departure delay at the start stop in seconds. `None` when the journey
/// has no significant delay reported there.
pub fn delay(view: &JourneyView, index: usize) -> Option<i64> {
    view.row(index)?.delay_secs
}

pub fn has_disruption(view: &JourneyView, index: usize) -> Option<bool> {
    view.row(index).map(|row| row.disrupted)
}

pub fn journey_attributes(view: &JourneyView, index: usize) -> Option<JourneyAttributes> {
    let result = view.result(index)?;
    let row = view.row(index)?;
    let info = result.journey.first_info();
    Some(JourneyAttributes {
        line: info.map(|i| i.label.clone()),
        direction: info.map(|i| i.direction.clone()),
        departure_time: row.departure,
        arrival_time: row.arrival,
        duration: first_section_duration(result),
        physical_mode: info.map(|i| i.physical_mode.clone()),
        departure: view.start_label().to_string(),
        arrival: view.end_label().to_string(),
    })
}

/// Attributes of the first disruption, only when the journey is disrupted.
pub fn disruption_attributes(view: &JourneyView, index: usize) -> Option<DisruptionAttributes> {
    view.result(index)?
        .disruptions
        .first()
        .map(DisruptionAttributes::from)
}

pub fn journeys_summary(view: &JourneyView) -> JourneysSummary {
    let journeys = (0..view.len())
        .filter_map(|index| {
            let result = view.result(index)?;
            Some(JourneySummary {
                attributes: journey_attributes(view, index)?,
                disruptions: result
                    .disruptions
                    .iter()
                    .map(DisruptionAttributes::from)
                    .collect(),
                delay: delay(view, index),
            })
        })
        .collect();
    JourneysSummary { journeys }
}

fn first_section_duration(result: &JourneyResult) -> Option<i64> {
    result
        .journey
        .first_section()
        .map(|s| s.duration().num_seconds())
}

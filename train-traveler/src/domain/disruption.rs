//! Disruption types.
//!
//! Only the fields the coordinator and renderers read are modelled:
//! the severity effect, the messages and, for delays, the per-stop
//! base and amended departure times.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Effect classification of a disruption severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityEffect {
    NoService,
    ReducedService,
    SignificantDelays,
    Detour,
    AdditionalService,
    ModifiedService,
    UnknownEffect,
    StopMoved,
    /// Any effect not listed above
    #[serde(other)]
    OtherEffect,
}

impl SeverityEffect {
    /// Wire representation, e.g. `SIGNIFICANT_DELAYS`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityEffect::NoService => "NO_SERVICE",
            SeverityEffect::ReducedService => "REDUCED_SERVICE",
            SeverityEffect::SignificantDelays => "SIGNIFICANT_DELAYS",
            SeverityEffect::Detour => "DETOUR",
            SeverityEffect::AdditionalService => "ADDITIONAL_SERVICE",
            SeverityEffect::ModifiedService => "MODIFIED_SERVICE",
            SeverityEffect::UnknownEffect => "UNKNOWN_EFFECT",
            SeverityEffect::StopMoved => "STOP_MOVED",
            SeverityEffect::OtherEffect => "OTHER_EFFECT",
        }
    }
}

impl fmt::Display for SeverityEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a stop point touched by a disruption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopPoint {
    pub id: String,
    pub name: String,
    pub label: String,
}

/// Timing change at one stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactedStop {
    pub stop_point: StopPoint,
    #[serde(default, rename = "base_departure_time")]
    pub base_departure: Option<NaiveDateTime>,
    #[serde(default, rename = "amended_departure_time")]
    pub amended_departure: Option<NaiveDateTime>,
}

impl ImpactedStop {
    /// Departure delay at this stop. Negative when the vehicle leaves early.
    pub fn departure_delay(&self) -> Option<Duration> {
        Some(self.amended_departure?.signed_duration_since(self.base_departure?))
    }
}

/// A vehicle journey impacted by a disruption, with its stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactedObject {
    #[serde(default)]
    pub impacted_stops: Vec<ImpactedStop>,
}

/// A service disruption attached to a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disruption {
    pub severity_effect: SeverityEffect,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub impacted_objects: Vec<ImpactedObject>,
}

impl Disruption {
    /// Returns true if this disruption is classified as a significant delay.
    pub fn is_delay(&self) -> bool {
        self.severity_effect == SeverityEffect::SignificantDelays
    }

    pub fn first_message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }

    /// Departure delay at the stop whose label is `stop_label`.
    ///
    /// Returns `None` unless this is a delay-type disruption impacting that
    /// stop. When several impacted objects mention the stop, the last one
    /// wins.
    pub fn departure_delay_at(&self, stop_label: &str) -> Option<Duration> {
        if !self.is_delay() {
            return None;
        }
        self.impacted_objects
            .iter()
            .flat_map(|o| o.impacted_stops.iter())
            .filter(|s| s.stop_point.label == stop_label)
            .filter_map(ImpactedStop::departure_delay)
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn stop(label: &str, base: NaiveDateTime, amended: NaiveDateTime) -> ImpactedStop {
        ImpactedStop {
            stop_point: StopPoint {
                id: format!("stop_point:{label}"),
                name: label.to_string(),
                label: label.to_string(),
            },
            base_departure: Some(base),
            amended_departure: Some(amended),
        }
    }

    fn delay(stops: Vec<ImpactedStop>) -> Disruption {
        Disruption {
            severity_effect: SeverityEffect::SignificantDelays,
            messages: vec!["Retard lié à un incident technique".into()],
            impacted_objects: vec![ImpactedObject {
                impacted_stops: stops,
            }],
        }
    }

    #[test]
    fn delay_at_matching_stop() {
        let d = delay(vec![
            stop("Lyon Part Dieu (Lyon)", at(8, 2), at(8, 17)),
            stop("Grenoble (Grenoble)", at(9, 40), at(9, 58)),
        ]);
        assert_eq!(
            d.departure_delay_at("Lyon Part Dieu (Lyon)"),
            Some(Duration::minutes(15))
        );
        assert_eq!(
            d.departure_delay_at("Grenoble (Grenoble)"),
            Some(Duration::minutes(18))
        );
        assert_eq!(d.departure_delay_at("Vienne (Vienne)"), None);
    }

    #[test]
    fn non_delay_effect_has_no_delay() {
        let mut d = delay(vec![stop("A", at(8, 0), at(8, 10))]);
        d.severity_effect = SeverityEffect::NoService;
        assert!(!d.is_delay());
        assert_eq!(d.departure_delay_at("A"), None);
    }

    #[test]
    fn missing_times_yield_none() {
        let mut s = stop("A", at(8, 0), at(8, 10));
        s.amended_departure = None;
        assert_eq!(s.departure_delay(), None);
    }

    #[test]
    fn severity_wire_names() {
        let effect: SeverityEffect = serde_json::from_str("\"SIGNIFICANT_DELAYS\"").unwrap();
        assert_eq!(effect, SeverityEffect::SignificantDelays);
        assert_eq!(effect.to_string(), "SIGNIFICANT_DELAYS");

        let unknown: SeverityEffect = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(unknown, SeverityEffect::OtherEffect);
    }

    #[test]
    fn first_message() {
        let d = delay(vec![]);
        assert_eq!(d.first_message(), Some("Retard lié à un incident technique"));
        let empty = Disruption {
            messages: vec![],
            ..d
        };
        assert_eq!(empty.first_message(), None);
    }
}

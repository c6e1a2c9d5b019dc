//! Entity identifiers and display names.

use super::JourneyView;

/// What a per-journey entity shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Departure instant with the journey attributes
    Journey,
    Departure,
    Arrival,
    Duration,
    Delay,
    /// Whether the journey is disrupted
    Disruption,
}

impl EntityKind {
    fn suffix(&self) -> &'static str {
        match self {
            EntityKind::Journey => "",
            EntityKind::Departure => "departure_",
            EntityKind::Arrival => "arrival_",
            EntityKind::Duration => "duration_",
            EntityKind::Delay => "disruption_delay_",
            EntityKind::Disruption => "disruption_",
        }
    }
}

/// First three characters of `label`, spaces removed, lowercased.
///
/// ```
/// use train_traveler::view::short_name;
///
/// assert_eq!(short_name("Lyon Part Dieu (Lyon)"), "lyo");
/// assert_eq!(short_name("La Roche"), "lar");
/// ```
pub fn short_name(label: &str) -> String {
    label
        .chars()
        .filter(|c| *c != ' ')
        .take(3)
        .collect::<String>()
        .to_lowercase()
}

/// Identifier of the entity showing `kind` for journey `index` (zero based).
pub fn entity_id(view: &JourneyView, kind: EntityKind, index: usize) -> String {
    format!(
        "{}_{}_{}_journey_{}{}",
        short_name(view.start_label()),
        short_name(view.end_label()),
        view.mode().tag(),
        kind.suffix(),
        index + 1
    )
}

/// Identifier of the entity listing every journey of the route.
pub fn route_entity_id(view: &JourneyView) -> String {
    format!(
        "{}_{}_journeys",
        short_name(view.start_label()),
        short_name(view.end_label())
    )
}

/// Name of the device grouping a route's entities.
pub fn device_name(view: &JourneyView) -> String {
    format!("{} - {}", view.start_name(), view.end_name())
}

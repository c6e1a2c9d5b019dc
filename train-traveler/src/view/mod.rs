//! Presentation of published snapshots.
//!
//! A [`JourneyView`] is computed once per published snapshot. Everything a
//! presentation entity shows (departure, delay, attributes, identifiers) is
//! a pure function of the view and a journey index.

mod journey_view;
mod naming;
mod render;

pub use journey_view::{JourneyRow, JourneyView};
pub use naming::{EntityKind, device_name, entity_id, route_entity_id, short_name};
pub use render::{
    DisruptionAttributes, JourneyAttributes, JourneySummary, JourneysSummary, arrival, delay,
    departure, disruption_attributes, duration, has_disruption, journey_attributes,
    journeys_summary,
};

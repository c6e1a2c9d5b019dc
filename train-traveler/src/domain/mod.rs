//! Domain types for route journeys.
//!
//! This module contains the validated value types shared by the fetch port,
//! the coordinator and the renderers: stop areas, journeys, disruptions and
//! the immutable snapshot produced by each successful fetch.

mod area;
mod disruption;
mod error;
mod journey;
mod snapshot;
pub mod time;

pub use area::{Area, AreaId, Coord};
pub use disruption::{Disruption, ImpactedObject, ImpactedStop, SeverityEffect, StopPoint};
pub use error::DomainError;
pub use journey::{Journey, Section, SectionInfo};
pub use snapshot::{JourneyResult, JourneySnapshot};

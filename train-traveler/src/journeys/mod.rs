//! Journey fetch port.
//!
//! Coordinators talk to the journey planner through the [`JourneyService`]
//! trait only. The wire client lives outside this crate; what ships here
//! is a file-backed service for development and a wrapper counting
//! outbound calls.

mod counter;
mod error;
mod fixture;
mod service;

pub use counter::{CallCounter, CountingService};
pub use error::FetchError;
pub use fixture::{DIRECT_JOURNEYS_FILE, FixtureJourneyService, LAST_DIRECT_JOURNEY_FILE};
pub use service::JourneyService;

//! Adaptive polling of one route's journeys.
//!
//! A route gets a "next journey" coordinator and, optionally, a "last
//! journey" one. Each owns its own pause state; they share nothing but the
//! journey service handle.

mod clock;
mod config;
mod error;
mod listeners;
mod poller;
mod policy;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    CoordinatorConfig, DEFAULT_JOURNEY_COUNT, DEFAULT_POLL_INTERVAL_SECS, LAST_JOURNEY_INTERVAL,
    PollMode, TICK_TIMEOUT,
};
pub use error::UpdateFailed;
pub use listeners::{Listener, ListenerId, Listeners};
pub use poller::Coordinator;
pub use policy::{PauseState, UpdatePolicy, pause_until};

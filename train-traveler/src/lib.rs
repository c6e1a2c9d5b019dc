//! Train journey tracker.
//!
//! Polls a journey planner for the next departures between two stop areas,
//! surfaces disruptions and delays, and publishes each result to registered
//! listeners. Polling adapts to the timetable: once the next departure is
//! tomorrow, updates can pause until shortly before it.

pub mod coordinator;
pub mod domain;
pub mod entry;
pub mod journeys;
pub mod logger;
pub mod view;

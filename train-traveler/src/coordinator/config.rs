//! Coordinator configuration.

use std::time::Duration;

use chrono_tz::Tz;

use crate::domain::Area;
use crate::domain::time::REFERENCE_TZ;

/// Poll period of "last journey" coordinators (6 hours).
///
/// Not configurable: the last journey of the day rarely changes, so it is
/// polled on its own long period whatever scan interval the user picked.
pub const LAST_JOURNEY_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

/// Ceiling for one tick, state evaluation and upstream call included.
pub const TICK_TIMEOUT: Duration = Duration::from_secs(30);

/// Default poll period of "next journey" coordinators, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 720;

/// Default number of journeys requested.
pub const DEFAULT_JOURNEY_COUNT: u32 = 1;

/// What a coordinator fetches, chosen once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollMode {
    /// The next `journey_count` departures, polled every `poll_interval_secs`.
    /// With `pause_enabled`, polling stops overnight once the next departure
    /// is tomorrow.
    NextJourney { pause_enabled: bool },
    /// The last departure of the day, polled every [`LAST_JOURNEY_INTERVAL`].
    LastJourney,
}

impl PollMode {
    /// Short tag used in entity identifiers ("next" or "last").
    pub fn tag(&self) -> &'static str {
        match self {
            PollMode::NextJourney { .. } => "next",
            PollMode::LastJourney => "last",
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            PollMode::NextJourney { .. } => "next journey",
            PollMode::LastJourney => "last journey",
        }
    }

    pub fn pause_enabled(&self) -> bool {
        matches!(self, PollMode::NextJourney { pause_enabled: true })
    }
}

/// Configuration of one coordinator. Immutable once the coordinator is built.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorConfig {
    /// Departure stop area.
    pub start: Area,

    /// Arrival stop area.
    pub end: Area,

    /// Number of journeys requested in "next journey" mode.
    pub journey_count: u32,

    /// User-supplied poll period in seconds. Ignored in "last journey" mode.
    pub poll_interval_secs: u64,

    pub mode: PollMode,

    /// Zone used for day boundaries and pause windows.
    pub timezone: Tz,
}

impl CoordinatorConfig {
    /// "Next journey" configuration with default count and interval, pause disabled.
    pub fn next_journey(start: Area, end: Area) -> Self {
        Self {
            start,
            end,
            journey_count: DEFAULT_JOURNEY_COUNT,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            mode: PollMode::NextJourney {
                pause_enabled: false,
            },
            timezone: REFERENCE_TZ,
        }
    }

    /// "Last journey" configuration.
    pub fn last_journey(start: Area, end: Area) -> Self {
        Self {
            mode: PollMode::LastJourney,
            ..Self::next_journey(start, end)
        }
    }

    /// Set the number of journeys requested.
    pub fn with_journey_count(mut self, count: u32) -> Self {
        self.journey_count = count;
        self
    }

    /// Set the poll period.
    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    /// Enable or disable the overnight pause. No effect in "last journey" mode.
    pub fn with_pause(mut self, enabled: bool) -> Self {
        if let PollMode::NextJourney { pause_enabled } = &mut self.mode {
            *pause_enabled = enabled;
        }
        self
    }

    /// Set the reference zone.
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = tz;
        self
    }

    /// Period between scheduled ticks.
    pub fn update_interval(&self) -> Duration {
        match self.mode {
            PollMode::NextJourney { .. } => Duration::from_secs(self.poll_interval_secs),
            PollMode::LastJourney => LAST_JOURNEY_INTERVAL,
        }
    }
}

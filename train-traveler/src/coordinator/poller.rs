//! Polling coordinator.
//!
//! A [`Coordinator`] owns one route's update policy and its published
//! snapshot. Ticks are serialized: a tick holds the policy lock from state
//! evaluation through publication, so a forced refresh never overlaps a
//! scheduled one.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock, watch};
use tokio::time::{Instant, MissedTickBehavior, interval_at, timeout};
use tracing::{debug, error, info};

use crate::domain::JourneySnapshot;
use crate::journeys::JourneyService;

use super::clock::{Clock, SystemClock};
use super::config::{CoordinatorConfig, TICK_TIMEOUT};
use super::error::UpdateFailed;
use super::listeners::{Listener, ListenerId, Listeners};
use super::policy::{PauseState, UpdatePolicy};

/// Outcome of the most recent tick, as seen by readers.
#[derive(Debug, Default)]
struct Status {
    data: Option<Arc<JourneySnapshot>>,
    last_update_success: bool,
    last_error: Option<String>,
}

/// Periodically refreshes the journeys of one route in one mode.
pub struct Coordinator<S, C = SystemClock> {
    config: CoordinatorConfig,
    service: S,
    clock: C,
    policy: Mutex<UpdatePolicy>,
    status: RwLock<Status>,
    listeners: Listeners,
}

impl<S: JourneyService> Coordinator<S> {
    /// Create a coordinator driven by the system clock.
    pub fn new(config: CoordinatorConfig, service: S) -> Self {
        Self::with_clock(config, service, SystemClock)
    }
}

impl<S: JourneyService, C: Clock> Coordinator<S, C> {
    pub fn with_clock(config: CoordinatorConfig, service: S, clock: C) -> Self {
        info!(
            mode = config.mode.name(),
            start = config.start.label(),
            end = config.end.label(),
            interval_secs = config.update_interval().as_secs(),
            "coordinator created"
        );
        Self {
            config,
            service,
            clock,
            policy: Mutex::new(UpdatePolicy::new()),
            status: RwLock::new(Status::default()),
            listeners: Listeners::new(),
        }
    }

    /// "next journey" or "last journey".
    pub fn name(&self) -> &'static str {
        self.config.mode.name()
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn update_interval(&self) -> Duration {
        self.config.update_interval()
    }

    /// The last successfully published snapshot.
    pub async fn data(&self) -> Option<Arc<JourneySnapshot>> {
        self.status.read().await.data.clone()
    }

    /// Whether the most recent tick succeeded. False before the first tick.
    pub async fn last_update_success(&self) -> bool {
        self.status.read().await.last_update_success
    }

    /// Message of the most recent failure, cleared by the next success.
    pub async fn last_error(&self) -> Option<String> {
        self.status.read().await.last_error.clone()
    }

    pub async fn pause_state(&self) -> PauseState {
        self.policy.lock().await.state().clone()
    }

    pub async fn add_listener(&self, listener: Arc<dyn Listener>) -> ListenerId {
        self.listeners.add(listener).await
    }

    pub async fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id).await
    }

    /// Run one tick now, outside the schedule.
    ///
    /// On success the snapshot is published and listeners are notified once.
    /// On failure the published snapshot is kept and the cause is returned.
    pub async fn refresh_now(&self) -> Result<Arc<JourneySnapshot>, UpdateFailed> {
        let mut policy = self.policy.lock().await;
        let now = self.clock.now();
        let result = self.tick(&mut policy, now).await;

        match result {
            Ok(snapshot) => {
                {
                    let mut status = self.status.write().await;
                    status.data = Some(Arc::clone(&snapshot));
                    status.last_update_success = true;
                    status.last_error = None;
                }
                drop(policy);
                self.listeners.notify(&snapshot).await;
                Ok(snapshot)
            }
            Err(err) => {
                error!(mode = self.name(), error = %err, "journey update failed");
                let mut status = self.status.write().await;
                status.last_update_success = false;
                status.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn tick(
        &self,
        policy: &mut UpdatePolicy,
        now: DateTime<Utc>,
    ) -> Result<Arc<JourneySnapshot>, UpdateFailed> {
        info!(
            mode = self.name(),
            "fetch data for journey {}",
            self.config.start.label()
        );
        let snapshot = timeout(
            TICK_TIMEOUT,
            policy.resolve(&self.service, &self.config, now),
        )
        .await
        .map_err(|_| UpdateFailed::Timeout(TICK_TIMEOUT))??;

        debug!(
            mode = self.name(),
            journeys = snapshot.len(),
            "journeys fetched"
        );
        Ok(snapshot)
    }

    /// Tick every [`update_interval`](Self::update_interval) until
    /// `shutdown` becomes true or its sender is dropped.
    ///
    /// The first tick fires one period after the call; the host performs the
    /// initial load with [`refresh_now`](Self::refresh_now). A slow tick delays
    /// the following ones rather than bunching them up.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        if *shutdown.borrow() {
            return;
        }
        // interval_at panics on a zero period.
        let period = self.update_interval().max(Duration::from_secs(1));
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Failures are recorded in the status and logged.
                    let _ = self.refresh_now().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!(mode = self.name(), "coordinator stopped");
    }
}

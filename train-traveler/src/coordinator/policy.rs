//! Update policy and pause state machine.
//!
//! Each tick the policy decides whether to call the journey service or to
//! serve the snapshot cached when the coordinator paused. A "next journey"
//! coordinator with the pause enabled stops polling once the next departure
//! is tomorrow, and resumes one hour before that departure. Disruptions
//! announced while paused are not seen until polling resumes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::domain::JourneySnapshot;
use crate::domain::time::{compute_resume_at, is_next_day, is_still_paused, localize};
use crate::journeys::{FetchError, JourneyService};

use super::config::{CoordinatorConfig, PollMode};

/// Pause state of one coordinator.
///
/// A paused coordinator always holds the snapshot it serves.
#[derive(Debug, Clone, Default)]
pub enum PauseState {
    /// Every tick calls the journey service.
    #[default]
    Active,
    /// Ticks serve `cached` without calling upstream until `resume_at` has passed.
    Paused {
        resume_at: DateTime<Utc>,
        cached: Arc<JourneySnapshot>,
    },
}

impl PauseState {
    pub fn is_paused(&self) -> bool {
        matches!(self, PauseState::Paused { .. })
    }

    pub fn resume_at(&self) -> Option<DateTime<Utc>> {
        match self {
            PauseState::Active => None,
            PauseState::Paused { resume_at, .. } => Some(*resume_at),
        }
    }

    pub fn cached_snapshot(&self) -> Option<&Arc<JourneySnapshot>> {
        match self {
            PauseState::Active => None,
            PauseState::Paused { cached, .. } => Some(cached),
        }
    }
}

/// Decides, each tick, whether an upstream call happens.
///
/// Owned by exactly one coordinator and only mutated from its ticks.
#[derive(Debug, Default)]
pub struct UpdatePolicy {
    state: PauseState,
}

impl UpdatePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PauseState {
        &self.state
    }

    /// Produce the snapshot for a tick at `now`.
    ///
    /// While paused and `now` has not passed the resume instant, returns the
    /// cached snapshot without calling `service`; repeated calls with the
    /// same `now` leave the state unchanged. Otherwise fetches once, then
    /// pauses if the configuration allows it and the earliest departure is
    /// tomorrow.
    pub async fn resolve<S: JourneyService>(
        &mut self,
        service: &S,
        config: &CoordinatorConfig,
        now: DateTime<Utc>,
    ) -> Result<Arc<JourneySnapshot>, FetchError> {
        if let PauseState::Paused { resume_at, cached } = &self.state {
            let resume_at = *resume_at;
            if is_still_paused(now, resume_at) {
                debug!(%resume_at, "updates paused, serving cached journeys");
                return Ok(Arc::clone(cached));
            }
            info!(%resume_at, "pause window over, resuming updates");
            self.state = PauseState::Active;
        }

        let snapshot = Arc::new(fetch(service, config).await?);

        if config.mode.pause_enabled()
            && let Some(resume_at) = pause_until(&snapshot, now, config.timezone)
        {
            info!(%resume_at, "next departure is tomorrow, pausing updates");
            self.state = PauseState::Paused {
                resume_at,
                cached: Arc::clone(&snapshot),
            };
        }

        Ok(snapshot)
    }
}

async fn fetch<S: JourneyService>(
    service: &S,
    config: &CoordinatorConfig,
) -> Result<JourneySnapshot, FetchError> {
    match config.mode {
        PollMode::NextJourney { .. } => {
            service
                .get_direct_journeys(&config.start, &config.end, config.journey_count)
                .await
        }
        PollMode::LastJourney => {
            service
                .get_last_direct_journey(&config.start, &config.end)
                .await
        }
    }
}

/// Resume instant if `snapshot` warrants a pause at `now`: its earliest
/// departure falls on the next calendar day in `tz`.
pub fn pause_until(
    snapshot: &JourneySnapshot,
    now: DateTime<Utc>,
    tz: Tz,
) -> Option<DateTime<Utc>> {
    let departure = snapshot.earliest_departure()?;
    let departure_at = localize(departure, tz).with_timezone(&Utc);
    is_next_day(departure_at, now, tz).then(|| compute_resume_at(departure, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::test_support::{
        MockService, grenoble, lyon, naive, paris, snapshot_departing,
    };
    use crate::domain::time::REFERENCE_TZ;

    fn next_config(pause: bool) -> CoordinatorConfig {
        CoordinatorConfig::next_journey(lyon(), grenoble())
            .with_journey_count(2)
            .with_pause(pause)
    }

    #[test]
    fn pause_until_next_day_departure() {
        let snap = snapshot_departing(&[naive(2024, 3, 16, 8, 0)]);
        let resume_at = pause_until(&snap, paris(2024, 3, 15, 20, 0), REFERENCE_TZ);
        assert_eq!(resume_at, Some(paris(2024, 3, 16, 7, 0)));
    }

    #[test]
    fn no_pause_for_same_day_departure() {
        let snap = snapshot_departing(&[naive(2024, 3, 15, 22, 0)]);
        assert_eq!(
            pause_until(&snap, paris(2024, 3, 15, 20, 0), REFERENCE_TZ),
            None
        );
    }

    #[test]
    fn no_pause_for_departure_two_days_ahead() {
        let snap = snapshot_departing(&[naive(2024, 3, 17, 8, 0)]);
        assert_eq!(
            pause_until(&snap, paris(2024, 3, 15, 20, 0), REFERENCE_TZ),
            None
        );
    }

    #[test]
    fn no_pause_for_empty_snapshot() {
        let snap = snapshot_departing(&[]);
        assert_eq!(
            pause_until(&snap, paris(2024, 3, 15, 20, 0), REFERENCE_TZ),
            None
        );
    }

    #[test]
    fn pause_decided_on_earliest_departure() {
        // Ranked order puts a later train first; the earliest one is today.
        let snap =
            snapshot_departing(&[naive(2024, 3, 16, 8, 0), naive(2024, 3, 15, 23, 10)]);
        assert_eq!(
            pause_until(&snap, paris(2024, 3, 15, 20, 0), REFERENCE_TZ),
            None
        );
    }

    #[tokio::test]
    async fn active_fetches_every_time() {
        let service = MockService::departing(naive(2024, 3, 15, 21, 0));
        let config = next_config(true);
        let mut policy = UpdatePolicy::new();

        let now = paris(2024, 3, 15, 20, 0);
        policy.resolve(&service, &config, now).await.unwrap();
        policy.resolve(&service, &config, now).await.unwrap();

        assert_eq!(service.direct_calls(), 2);
        assert_eq!(service.requested_counts(), vec![2, 2]);
        assert!(!policy.state().is_paused());
    }

    #[tokio::test]
    async fn pause_disabled_never_pauses() {
        let service = MockService::departing(naive(2024, 3, 16, 8, 0));
        let config = next_config(false);
        let mut policy = UpdatePolicy::new();

        policy
            .resolve(&service, &config, paris(2024, 3, 15, 20, 0))
            .await
            .unwrap();
        assert!(!policy.state().is_paused());
        assert_eq!(policy.state().resume_at(), None);
    }

    #[tokio::test]
    async fn enters_pause_and_caches_snapshot() {
        let service = MockService::departing(naive(2024, 3, 16, 8, 0));
        let config = next_config(true);
        let mut policy = UpdatePolicy::new();

        let fetched = policy
            .resolve(&service, &config, paris(2024, 3, 15, 20, 0))
            .await
            .unwrap();

        let state = policy.state();
        assert!(state.is_paused());
        assert_eq!(state.resume_at(), Some(paris(2024, 3, 16, 7, 0)));
        assert!(Arc::ptr_eq(state.cached_snapshot().unwrap(), &fetched));
    }

    #[tokio::test]
    async fn paused_serves_cache_without_calling() {
        let service = MockService::departing(naive(2024, 3, 16, 8, 0));
        let config = next_config(true);
        let mut policy = UpdatePolicy::new();

        let fetched = policy
            .resolve(&service, &config, paris(2024, 3, 15, 20, 0))
            .await
            .unwrap();

        for now in [
            paris(2024, 3, 15, 21, 0),
            paris(2024, 3, 15, 21, 0),
            paris(2024, 3, 16, 3, 0),
            paris(2024, 3, 16, 7, 0),
        ] {
            let served = policy.resolve(&service, &config, now).await.unwrap();
            assert!(Arc::ptr_eq(&served, &fetched));
            assert_eq!(policy.state().resume_at(), Some(paris(2024, 3, 16, 7, 0)));
        }
        assert_eq!(service.direct_calls(), 1);
    }

    #[tokio::test]
    async fn resumes_after_window() {
        let service = MockService::departing(naive(2024, 3, 16, 8, 0));
        let config = next_config(true);
        let mut policy = UpdatePolicy::new();

        let cached = policy
            .resolve(&service, &config, paris(2024, 3, 15, 20, 0))
            .await
            .unwrap();

        let fresh = policy
            .resolve(&service, &config, paris(2024, 3, 16, 7, 30))
            .await
            .unwrap();

        assert_eq!(service.direct_calls(), 2);
        assert!(!Arc::ptr_eq(&fresh, &cached));
        assert!(!policy.state().is_paused());
        assert!(policy.state().cached_snapshot().is_none());
    }

    #[tokio::test]
    async fn pauses_again_the_next_evening() {
        let service = MockService::departing(naive(2024, 3, 16, 8, 0));
        let config = next_config(true);
        let mut policy = UpdatePolicy::new();

        policy
            .resolve(&service, &config, paris(2024, 3, 15, 20, 0))
            .await
            .unwrap();
        policy
            .resolve(&service, &config, paris(2024, 3, 16, 7, 30))
            .await
            .unwrap();
        assert!(!policy.state().is_paused());

        service.set_departure(naive(2024, 3, 17, 8, 0));
        policy
            .resolve(&service, &config, paris(2024, 3, 16, 20, 0))
            .await
            .unwrap();
        assert_eq!(policy.state().resume_at(), Some(paris(2024, 3, 17, 7, 0)));
        assert_eq!(service.direct_calls(), 3);
    }

    #[tokio::test]
    async fn failed_fetch_after_resume_stays_active() {
        let service = MockService::departing(naive(2024, 3, 16, 8, 0));
        let config = next_config(true);
        let mut policy = UpdatePolicy::new();

        policy
            .resolve(&service, &config, paris(2024, 3, 15, 20, 0))
            .await
            .unwrap();

        service.set_failing(true);
        let result = policy
            .resolve(&service, &config, paris(2024, 3, 16, 7, 30))
            .await;
        assert!(result.is_err());
        assert!(!policy.state().is_paused());
        assert_eq!(service.direct_calls(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_does_not_pause() {
        let service = MockService::departing(naive(2024, 3, 16, 8, 0));
        service.set_failing(true);
        let config = next_config(true);
        let mut policy = UpdatePolicy::new();

        let result = policy
            .resolve(&service, &config, paris(2024, 3, 15, 20, 0))
            .await;
        assert!(matches!(result, Err(FetchError::Unavailable(_))));
        assert!(!policy.state().is_paused());
    }

    #[tokio::test]
    async fn last_journey_mode_never_pauses() {
        let service = MockService::departing(naive(2024, 3, 16, 8, 0));
        let config = CoordinatorConfig::last_journey(lyon(), grenoble()).with_pause(true);
        let mut policy = UpdatePolicy::new();

        for _ in 0..2 {
            policy
                .resolve(&service, &config, paris(2024, 3, 15, 20, 0))
                .await
                .unwrap();
        }
        assert_eq!(service.last_calls(), 2);
        assert_eq!(service.direct_calls(), 0);
        assert!(!policy.state().is_paused());
    }
}

//! Outbound call counting.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::domain::{Area, JourneySnapshot};

use super::error::FetchError;
use super::service::JourneyService;

/// Shared count of calls made to the journey planner.
///
/// Clones share the same count, so one counter can observe every
/// coordinator built on a connection.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicU64>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call and return the new total.
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Journey service wrapper that counts every outbound call.
///
/// Calls are counted when issued, whether or not they succeed.
#[derive(Debug, Clone)]
pub struct CountingService<S> {
    inner: S,
    counter: CallCounter,
}

impl<S> CountingService<S> {
    pub fn new(inner: S, counter: CallCounter) -> Self {
        Self { inner, counter }
    }

    pub fn counter(&self) -> &CallCounter {
        &self.counter
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: JourneyService> JourneyService for CountingService<S> {
    async fn get_direct_journeys(
        &self,
        start: &Area,
        end: &Area,
        count: u32,
    ) -> Result<JourneySnapshot, FetchError> {
        let calls = self.counter.increment();
        debug!(calls, "API calls count");
        self.inner.get_direct_journeys(start, end, count).await
    }

    async fn get_last_direct_journey(
        &self,
        start: &Area,
        end: &Area,
    ) -> Result<JourneySnapshot, FetchError> {
        let calls = self.counter.increment();
        debug!(calls, "API calls count");
        self.inner.get_last_direct_journey(start, end).await
    }
}

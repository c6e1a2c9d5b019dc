//! The journey service port.

use std::future::Future;
use std::sync::Arc;

use crate::domain::{Area, JourneySnapshot};

use super::error::FetchError;

/// Source of journeys between two stop areas.
///
/// Coordinators depend on this trait only. Implementations own the
/// connection to the journey planner and may be shared between the
/// "next journey" and "last journey" coordinators of a route.
pub trait JourneyService: Send + Sync {
    /// Next `count` direct journeys from `start` to `end`, in planner order.
    fn get_direct_journeys(
        &self,
        start: &Area,
        end: &Area,
        count: u32,
    ) -> impl Future<Output = Result<JourneySnapshot, FetchError>> + Send;

    /// Last direct journey of the day from `start` to `end`.
    fn get_last_direct_journey(
        &self,
        start: &Area,
        end: &Area,
    ) -> impl Future<Output = Result<JourneySnapshot, FetchError>> + Send;
}

impl<S: JourneyService> JourneyService for Arc<S> {
    fn get_direct_journeys(
        &self,
        start: &Area,
        end: &Area,
        count: u32,
    ) -> impl Future<Output = Result<JourneySnapshot, FetchError>> + Send {
        (**self).get_direct_journeys(start, end, count)
    }

    fn get_last_direct_journey(
        &self,
        start: &Area,
        end: &Area,
    ) -> impl Future<Output = Result<JourneySnapshot, FetchError>> + Send {
        (**self).get_last_direct_journey(start, end)
    }
}

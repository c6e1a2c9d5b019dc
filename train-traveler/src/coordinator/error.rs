//! Coordinator error types.

use std::time::Duration;

use crate::journeys::FetchError;

/// A tick failed. The published snapshot is left untouched.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateFailed {
    /// The journey service returned an error
    #[error("error fetching journey data: {0}")]
    Upstream(#[source] FetchError),

    /// The tick did not finish within the ceiling
    #[error("journey update timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl From<FetchError> for UpdateFailed {
    fn from(err: FetchError) -> Self {
        UpdateFailed::Upstream(err)
    }
}

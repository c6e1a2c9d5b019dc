//! Fetch port error types.

use std::path::PathBuf;

/// Errors raised by a journey service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The planner could not be reached or returned a server error
    #[error("journey service unavailable: {0}")]
    Unavailable(String),

    /// The API key was rejected
    #[error("unauthorized: check the API key")]
    Unauthorized,

    /// The response could not be understood
    #[error("malformed response: {message}")]
    Malformed { message: String },

    /// Fixture data could not be loaded
    #[error("fixture {path:?}: {message}")]
    Fixture { path: PathBuf, message: String },
}

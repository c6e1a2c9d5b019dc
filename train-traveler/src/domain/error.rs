//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from upstream/IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// An identifier was empty
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    /// An identifier had an invalid shape
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Longitude or latitude out of range
    #[error("invalid coordinate: lon={lon}, lat={lat}")]
    InvalidCoord { lon: f64, lat: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            DomainError::EmptyIdentifier.to_string(),
            "identifier must not be empty"
        );

        let err = DomainError::InvalidIdentifier(" x".into());
        assert_eq!(err.to_string(), "invalid identifier: \" x\"");

        let err = DomainError::InvalidCoord {
            lon: 200.0,
            lat: 1.5,
        };
        assert_eq!(err.to_string(), "invalid coordinate: lon=200, lat=1.5");
    }
}

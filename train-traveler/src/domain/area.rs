//! Stop area types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Identifier of a stop area in the journey planner (e.g. `stop_area:SNCF:87686006`).
///
/// Guaranteed non-empty by construction.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AreaId(String);

impl AreaId {
    /// Parse an area identifier. Surrounding whitespace is rejected rather
    /// than trimmed, since the planner treats ids as opaque.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.is_empty() {
            return Err(DomainError::EmptyIdentifier);
        }
        if s.trim() != s {
            return Err(DomainError::InvalidIdentifier(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AreaId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AreaId> for String {
    fn from(id: AreaId) -> Self {
        id.0
    }
}

impl fmt::Debug for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AreaId({})", self.0)
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

impl Coord {
    /// Create a coordinate, rejecting values outside the valid ranges.
    pub fn new(lon: f64, lat: f64) -> Result<Self, DomainError> {
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoord { lon, lat });
        }
        Ok(Self { lon, lat })
    }
}

/// A stop area at one end of the configured route.
///
/// Built once from configuration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    id: AreaId,
    name: String,
    label: String,
    coord: Coord,
}

impl Area {
    /// Creates a new area.
    pub fn new(id: AreaId, name: impl Into<String>, label: impl Into<String>, coord: Coord) -> Self {
        Self {
            id,
            name: name.into(),
            label: label.into(),
            coord,
        }
    }

    pub fn id(&self) -> &AreaId {
        &self.id
    }

    /// Short name, e.g. "Lyon Part Dieu".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label, usually the name followed by the city, e.g. "Lyon Part Dieu (Lyon)".
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }
}

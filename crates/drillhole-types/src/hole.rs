use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique borehole identifier, shared by the collar, survey and feature tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoleId(pub String);

impl HoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HoleId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for HoleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Surface anchor of a borehole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollarRecord {
    pub hole_id: HoleId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CollarRecord {
    pub fn new(hole_id: impl Into<HoleId>, x: f64, y: f64, z: f64) -> Self {
        Self {
            hole_id: hole_id.into(),
            x,
            y,
            z,
        }
    }
}

/// A directional measurement taken at a given along-hole distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyStation {
    pub hole_id: HoleId,
    /// Along-hole distance from the collar.
    pub at: f64,
    /// Azimuth in degrees, clockwise from north.
    pub az: f64,
    /// Dip in degrees, positive downward.
    pub dip: f64,
}

impl SurveyStation {
    pub fn new(hole_id: impl Into<HoleId>, at: f64, az: f64, dip: f64) -> Self {
        Self {
            hole_id: hole_id.into(),
            at,
            az,
            dip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hole_id_serializes_as_plain_string() {
        let id = HoleId::from("DH1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"DH1\"");
        let back: HoleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_hole_id_display() {
        assert_eq!(HoleId::new("RC-042").to_string(), "RC-042");
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hole::HoleId;

/// The value attached to a feature interval: a category label or a measured scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Numeric(f64),
    Category(String),
}

impl FeatureValue {
    /// Value carried by the gap that closes a numeric borehole line.
    pub const NAN: Self = FeatureValue::Numeric(f64::NAN);

    pub fn is_nan(&self) -> bool {
        matches!(self, FeatureValue::Numeric(v) if v.is_nan())
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Numeric(v) => write!(f, "{v}"),
            FeatureValue::Category(label) => f.write_str(label),
        }
    }
}

impl From<&str> for FeatureValue {
    fn from(label: &str) -> Self {
        FeatureValue::Category(label.to_owned())
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Numeric(v)
    }
}

/// A depth range along a borehole tagged with a single feature value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInterval {
    pub hole_id: HoleId,
    pub from: f64,
    pub to: f64,
    pub value: FeatureValue,
}

impl FeatureInterval {
    pub fn new(hole_id: impl Into<HoleId>, from: f64, to: f64, value: impl Into<FeatureValue>) -> Self {
        Self {
            hole_id: hole_id.into(),
            from,
            to,
            value: value.into(),
        }
    }

    pub fn length(&self) -> f64 {
        self.to - self.from
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_values() {
        let values: Vec<FeatureValue> = serde_json::from_str(r#"["ORE", 1.25]"#).unwrap();
        assert_eq!(values[0], FeatureValue::from("ORE"));
        assert_eq!(values[1], FeatureValue::from(1.25));
    }

    #[test]
    fn test_nan_marker() {
        assert!(FeatureValue::NAN.is_nan());
        assert!(!FeatureValue::from(0.0).is_nan());
        assert!(!FeatureValue::from("WASTE").is_nan());
    }

    #[test]
    fn test_interval_length() {
        let interval = FeatureInterval::new("DH1", 12.5, 20.0, "ORE");
        assert!((interval.length() - 7.5).abs() < 1e-12);
    }
}

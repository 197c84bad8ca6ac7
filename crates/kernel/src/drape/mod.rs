//! Projection of from/to feature intervals onto a fitted borehole curve.
//!
//! The output is a flat point sequence meant for a line renderer: a point with
//! no position is a gap marker that breaks the line.

use drillhole_types::{ColumnData, FeatureInterval, FeatureValue};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrajectoryError};
use crate::geometry::point::Point3d;
use crate::trajectory::curve::TrajectoryCurve;

/// How a feature column is laid out along the hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Text labels; every interval is its own line segment.
    Categorical,
    /// Scalars; one continuous, color-graded line per borehole.
    Numeric,
}

impl FeatureKind {
    /// Kind implied by a column's element type, if it can be draped at all.
    pub fn of(data: &ColumnData) -> Option<Self> {
        match data {
            ColumnData::Text(_) => Some(FeatureKind::Categorical),
            ColumnData::Float(_) => Some(FeatureKind::Numeric),
            ColumnData::Integer(_) => None,
        }
    }

    /// Gap emitted after each interval.
    fn interval_gap(self, value: &FeatureValue) -> Option<DrapedPoint> {
        match self {
            FeatureKind::Categorical => Some(DrapedPoint::gap(value.clone())),
            FeatureKind::Numeric => None,
        }
    }

    /// Gap emitted once after all of a borehole's intervals.
    fn hole_gap(self) -> Option<DrapedPoint> {
        match self {
            FeatureKind::Categorical => None,
            FeatureKind::Numeric => Some(DrapedPoint::gap(FeatureValue::NAN)),
        }
    }

    /// Points emitted for a borehole with `intervals` intervals.
    pub fn points_per_hole(self, intervals: usize) -> usize {
        match self {
            FeatureKind::Categorical => 3 * intervals,
            FeatureKind::Numeric => 2 * intervals + 1,
        }
    }
}

/// A point on the hole carrying a feature value, or a gap marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrapedPoint {
    pub position: Option<Point3d>,
    pub value: FeatureValue,
}

impl DrapedPoint {
    pub fn at(position: Point3d, value: FeatureValue) -> Self {
        Self {
            position: Some(position),
            value,
        }
    }

    pub fn gap(value: FeatureValue) -> Self {
        Self {
            position: None,
            value,
        }
    }

    pub fn is_gap(&self) -> bool {
        self.position.is_none()
    }

    pub fn to_row(&self) -> PointRow {
        PointRow {
            x: self.position.map(|p| p.x),
            y: self.position.map(|p| p.y),
            z: self.position.map(|p| p.z),
            value: (!self.value.is_nan()).then(|| self.value.clone()),
        }
    }
}

/// Flat `{X, Y, Z, value}` record with nullable coordinates.
///
/// The NaN carried by a numeric line break is written as a `null` value so
/// the row reads back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRow {
    #[serde(rename = "X")]
    pub x: Option<f64>,
    #[serde(rename = "Y")]
    pub y: Option<f64>,
    #[serde(rename = "Z")]
    pub z: Option<f64>,
    pub value: Option<FeatureValue>,
}

/// Depth used to normalize a borehole's intervals: the deepest TO.
pub fn feature_extent(intervals: &[FeatureInterval]) -> Option<f64> {
    intervals.iter().map(|i| i.to).reduce(f64::max)
}

/// Drape a borehole's intervals onto its curve, in row order.
///
/// Each interval's FROM and TO are divided by `total_length` to get curve
/// parameters; both ends are sampled and tagged with the interval's value.
pub fn drape(
    curve: &TrajectoryCurve,
    total_length: f64,
    intervals: &[FeatureInterval],
    kind: FeatureKind,
) -> Result<Vec<DrapedPoint>> {
    if intervals.is_empty() {
        return Err(TrajectoryError::EmptyFeatureTable);
    }

    let mut points = Vec::with_capacity(kind.points_per_hole(intervals.len()));
    for interval in intervals {
        let start = curve.sample(interval.from / total_length)?;
        let end = curve.sample(interval.to / total_length)?;
        points.push(DrapedPoint::at(start, interval.value.clone()));
        points.push(DrapedPoint::at(end, interval.value.clone()));
        points.extend(kind.interval_gap(&interval.value));
    }
    points.extend(kind.hole_gap());
    Ok(points)
}

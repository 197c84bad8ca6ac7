use drillhole_types::{CollarRecord, HoleId, SurveyStation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::segment::solve_segment;
use crate::error::{Result, TrajectoryError};
use crate::geometry::point::Point3d;
use crate::geometry::vector::Vec3;

/// Fewest survey stations that define a trajectory.
pub const MIN_SURVEY_STATIONS: usize = 2;

/// Borehole centerline at each survey station, in absolute coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    pub hole_id: HoleId,
    /// One knot per survey station; the first is the collar.
    pub knots: Vec<Point3d>,
    /// Along-hole distance (AT) of each knot.
    pub depths: Vec<f64>,
}

impl Trajectory {
    pub fn collar(&self) -> Point3d {
        self.knots[0]
    }

    pub fn bottom(&self) -> Point3d {
        self.knots[self.knots.len() - 1]
    }

    /// Along-hole distance between the first and the last station.
    pub fn surveyed_length(&self) -> f64 {
        self.depths[self.depths.len() - 1] - self.depths[0]
    }

    pub fn num_knots(&self) -> usize {
        self.knots.len()
    }
}

/// Chain minimum-curvature displacements from the collar down the hole.
///
/// `stations` must belong to the collar's hole and be sorted by AT.
pub fn build_trajectory(collar: &CollarRecord, stations: &[SurveyStation]) -> Result<Trajectory> {
    if stations.len() < MIN_SURVEY_STATIONS {
        return Err(TrajectoryError::InsufficientSurveyData {
            required: MIN_SURVEY_STATIONS,
            provided: stations.len(),
        });
    }

    let origin = Point3d::new(collar.x, collar.y, collar.z);
    let mut offset = Vec3::ZERO;
    let mut knots = Vec::with_capacity(stations.len());
    knots.push(origin + offset);

    for pair in stations.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        if lower.at <= upper.at {
            return Err(TrajectoryError::UnorderedSurvey {
                previous: upper.at,
                at: lower.at,
            });
        }
        offset += solve_segment(lower.at - upper.at, upper.az, upper.dip, lower.az, lower.dip);
        knots.push(origin + offset);
    }

    debug!(hole = %collar.hole_id, knots = knots.len(), "trajectory built");

    Ok(Trajectory {
        hole_id: collar.hole_id.clone(),
        knots,
        depths: stations.iter().map(|s| s.at).collect(),
    })
}

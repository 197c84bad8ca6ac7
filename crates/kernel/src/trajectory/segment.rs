//! Minimum-curvature displacement between two consecutive survey stations.
//!
//! Angles come in as degrees with dip positive downward. Internally the dip is
//! turned into an inclination from the vertical (`90° - dip`) so that the
//! direction vector of a station is
//! `(sin(inc)·sin(az), sin(inc)·cos(az), -cos(inc))` in (east, north, up).

use crate::geometry::vector::Vec3;

/// Inclination from vertical, in radians, for a downward-positive dip in degrees.
pub fn inclination(dip_deg: f64) -> f64 {
    (90.0 - dip_deg).to_radians()
}

/// Dog-leg angle (radians) between two station directions given in radians.
pub fn dogleg_angle(inc1: f64, az1: f64, inc2: f64, az2: f64) -> f64 {
    let cos_dl = (inc2 - inc1).cos() - inc1.sin() * inc2.sin() * (1.0 - (az2 - az1).cos());
    cos_dl.clamp(-1.0, 1.0).acos()
}

/// Minimum-curvature ratio factor `2·tan(dl/2)/dl`, or 1 for a straight segment.
pub fn ratio_factor(dogleg: f64) -> f64 {
    if dogleg > 0.0 {
        2.0 * (dogleg / 2.0).tan() / dogleg
    } else {
        1.0
    }
}

/// Displacement `(dx, dy, dz)` covered by a course of length `course_length`
/// between two stations.
pub fn solve_segment(course_length: f64, az1: f64, dip1: f64, az2: f64, dip2: f64) -> Vec3 {
    let az1 = az1.to_radians();
    let az2 = az2.to_radians();
    let inc1 = inclination(dip1);
    let inc2 = inclination(dip2);

    let rf = ratio_factor(dogleg_angle(inc1, az1, inc2, az2));
    let half = 0.5 * course_length * rf;

    Vec3::new(
        half * (inc1.sin() * az1.sin() + inc2.sin() * az2.sin()),
        half * (inc1.sin() * az1.cos() + inc2.sin() * az2.cos()),
        -half * (inc1.cos() + inc2.cos()),
    )
}

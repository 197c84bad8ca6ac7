//! Continuous curves fitted through trajectory knots.
//!
//! Both curve kinds are parametrized by normalized chord length over the
//! knots, so `u = 0` is the collar and `u = 1` the deepest station. Chord
//! length only approximates along-hole distance: dividing a depth by the
//! hole length gives a parameter that is close to, but not exactly at, that
//! depth on a curved hole.

use serde::{Deserialize, Serialize};

use crate::config::DesurveyConfig;
use crate::error::{Result, TrajectoryError};
use crate::geometry::bspline::{chord_length_params, BSplineCurve};
use crate::geometry::point::Point3d;
use crate::trajectory::builder::MIN_SURVEY_STATIONS;

/// Piecewise-linear curve through the knots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point3d>,
    /// Parameter of each point, 0 at the first and 1 at the last.
    pub params: Vec<f64>,
}

impl Polyline {
    pub fn evaluate(&self, u: f64) -> Point3d {
        let i = self.params.partition_point(|&t| t <= u);
        if i == 0 {
            return self.points[0];
        }
        if i >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let (t0, t1) = (self.params[i - 1], self.params[i]);
        let span = t1 - t0;
        if span <= 0.0 {
            return self.points[i - 1];
        }
        self.points[i - 1].lerp(&self.points[i], (u - t0) / span)
    }
}

/// A borehole centerline that can be sampled anywhere in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrajectoryCurve {
    Linear(Polyline),
    Quadratic(BSplineCurve),
}

impl TrajectoryCurve {
    pub fn degree(&self) -> usize {
        match self {
            TrajectoryCurve::Linear(_) => 1,
            TrajectoryCurve::Quadratic(c) => c.degree,
        }
    }

    /// Point at parameter `u`. Values outside [0, 1] (or NaN) are rejected.
    pub fn sample(&self, u: f64) -> Result<Point3d> {
        if !(0.0..=1.0).contains(&u) {
            return Err(TrajectoryError::ParameterOutOfRange { u });
        }
        Ok(match self {
            TrajectoryCurve::Linear(p) => p.evaluate(u),
            TrajectoryCurve::Quadratic(c) => c.evaluate(u),
        })
    }

    /// Arc length estimated from `num_samples` chords.
    pub fn approximate_length(&self, num_samples: usize) -> f64 {
        let num_samples = num_samples.max(1);
        let at = |u: f64| match self {
            TrajectoryCurve::Linear(p) => p.evaluate(u),
            TrajectoryCurve::Quadratic(c) => c.evaluate(u),
        };
        let mut length = 0.0;
        let mut prev = at(0.0);
        for i in 1..=num_samples {
            let curr = at(i as f64 / num_samples as f64);
            length += prev.distance_to(&curr);
            prev = curr;
        }
        length
    }
}

/// Fit a curve through a borehole's knots.
///
/// Quadratic interpolation needs enough knots to be well posed; shorter
/// chains get a polyline (see [`DesurveyConfig::use_quadratic`]).
pub fn fit_curve(knots: &[Point3d], config: &DesurveyConfig) -> Result<TrajectoryCurve> {
    if knots.len() < MIN_SURVEY_STATIONS {
        return Err(TrajectoryError::InsufficientSurveyData {
            required: MIN_SURVEY_STATIONS,
            provided: knots.len(),
        });
    }
    let degenerate = || TrajectoryError::DegenerateTrajectory { knots: knots.len() };
    let params = chord_length_params(knots, config.coincidence).ok_or_else(degenerate)?;

    if config.use_quadratic(knots.len()) {
        let spline = BSplineCurve::interpolate(knots, &params, 2).ok_or_else(degenerate)?;
        Ok(TrajectoryCurve::Quadratic(spline))
    } else {
        Ok(TrajectoryCurve::Linear(Polyline {
            points: knots.to_vec(),
            params,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knots(n: usize) -> Vec<Point3d> {
        (0..n)
            .map(|i| {
                let i = i as f64;
                Point3d::new(1000.0 + 0.4 * i * i, 1000.0 + 3.0 * i, 500.0 - 25.0 * i)
            })
            .collect()
    }

    #[test]
    fn test_three_knots_fit_linear() {
        let curve = fit_curve(&knots(3), &DesurveyConfig::default()).unwrap();
        assert_eq!(curve.degree(), 1);
    }

    #[test]
    fn test_four_knots_fit_quadratic() {
        let curve = fit_curve(&knots(4), &DesurveyConfig::default()).unwrap();
        assert_eq!(curve.degree(), 2);
    }

    #[test]
    fn test_endpoints_both_branches() {
        for n in [2, 3, 4, 7] {
            let k = knots(n);
            let curve = fit_curve(&k, &DesurveyConfig::default()).unwrap();
            let start = curve.sample(0.0).unwrap();
            let end = curve.sample(1.0).unwrap();
            assert!(start.distance_to(&k[0]) < 1e-9, "n={n} start {start:?}");
            assert!(end.distance_to(&k[n - 1]) < 1e-9, "n={n} end {end:?}");
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        let curve = fit_curve(&knots(5), &DesurveyConfig::default()).unwrap();
        assert_eq!(
            curve.sample(1.01).unwrap_err(),
            TrajectoryError::ParameterOutOfRange { u: 1.01 }
        );
        assert!(curve.sample(-0.2).is_err());
        assert!(curve.sample(f64::NAN).is_err());
    }

    #[test]
    fn test_polyline_midpoint_of_straight_hole() {
        let k = vec![Point3d::new(0.0, 0.0, 0.0), Point3d::new(0.0, 0.0, -100.0)];
        let curve = fit_curve(&k, &DesurveyConfig::default()).unwrap();
        let mid = curve.sample(0.5).unwrap();
        assert!((mid.z + 50.0).abs() < 1e-12);
        assert!((curve.approximate_length(16) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_coincident_knots_are_degenerate() {
        let k = vec![Point3d::new(5.0, 5.0, 5.0); 4];
        let err = fit_curve(&k, &DesurveyConfig::default()).unwrap_err();
        assert_eq!(err, TrajectoryError::DegenerateTrajectory { knots: 4 });
    }

    #[test]
    fn test_single_knot_is_insufficient() {
        let err = fit_curve(&knots(1), &DesurveyConfig::default()).unwrap_err();
        assert!(matches!(err, TrajectoryError::InsufficientSurveyData { provided: 1, .. }));
    }
}

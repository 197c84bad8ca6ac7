use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// A clamped, non-rational B-spline curve in 3D.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BSplineCurve {
    /// Degree of the curve.
    pub degree: usize,
    /// Control points in 3D.
    pub control_points: Vec<Point3d>,
    /// Knot vector (must have len = control_points.len() + degree + 1).
    pub knots: Vec<f64>,
}

impl BSplineCurve {
    pub fn new(degree: usize, control_points: Vec<Point3d>, knots: Vec<f64>) -> Self {
        assert!(
            knots.len() == control_points.len() + degree + 1,
            "Knot vector length must be n + p + 1"
        );
        Self {
            degree,
            control_points,
            knots,
        }
    }

    /// Global interpolation through `points` at the given parameters.
    ///
    /// `params` must be non-decreasing, start at 0 and end at 1. Interior knots
    /// are placed by averaging `degree` consecutive parameters, which keeps the
    /// collocation matrix banded and (for distinct parameters) non-singular.
    /// Returns `None` when the system cannot be solved.
    pub fn interpolate(points: &[Point3d], params: &[f64], degree: usize) -> Option<Self> {
        let count = points.len();
        if count <= degree || params.len() != count || degree == 0 {
            return None;
        }
        let n = count - 1;
        let p = degree;

        let mut knots = vec![0.0; p + 1];
        for j in 1..=(n - p) {
            let avg = params[j..j + p].iter().sum::<f64>() / p as f64;
            knots.push(avg);
        }
        knots.extend(std::iter::repeat(1.0).take(p + 1));

        let mut collocation = DMatrix::<f64>::zeros(count, count);
        for (row, &t) in params.iter().enumerate() {
            let span = find_span(&knots, n, p, t);
            let basis = basis_functions(&knots, span, t, p);
            for (i, value) in basis.iter().enumerate() {
                collocation[(row, span - p + i)] = *value;
            }
        }

        let rhs = DMatrix::from_fn(count, 3, |r, c| points[r].to_array()[c]);
        let solved = collocation.lu().solve(&rhs)?;
        if solved.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let control_points = (0..count)
            .map(|r| Point3d::new(solved[(r, 0)], solved[(r, 1)], solved[(r, 2)]))
            .collect();
        Some(Self::new(p, control_points, knots))
    }

    /// Number of control points.
    pub fn num_control_points(&self) -> usize {
        self.control_points.len()
    }

    /// Parameter domain [t_min, t_max].
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[self.degree], self.knots[self.knots.len() - self.degree - 1])
    }

    /// Evaluate the curve at parameter t using de Boor's algorithm.
    pub fn evaluate(&self, t: f64) -> Point3d {
        let p = self.degree;
        let span = find_span(&self.knots, self.num_control_points() - 1, p, t);
        let basis = basis_functions(&self.knots, span, t, p);

        let mut point = Vec3::ZERO;
        for (i, b) in basis.iter().enumerate() {
            point += self.control_points[span - p + i].to_vec3() * *b;
        }
        Point3d::new(point.x, point.y, point.z)
    }
}

/// Normalized cumulative chord length of a polyline, from 0 at the first
/// point to exactly 1 at the last.
///
/// Returns `None` for fewer than two points or when the whole polyline is
/// shorter than `min_length`.
pub fn chord_length_params(points: &[Point3d], min_length: f64) -> Option<Vec<f64>> {
    if points.len() < 2 {
        return None;
    }
    let mut params = Vec::with_capacity(points.len());
    let mut total = 0.0;
    params.push(0.0);
    for pair in points.windows(2) {
        total += pair[0].distance_to(&pair[1]);
        params.push(total);
    }
    if total < min_length {
        return None;
    }
    for t in params.iter_mut() {
        *t /= total;
    }
    if let Some(last) = params.last_mut() {
        *last = 1.0;
    }
    Some(params)
}

/// Find the knot span index for parameter t using binary search.
fn find_span(knots: &[f64], n: usize, p: usize, t: f64) -> usize {
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[p] {
        return p;
    }

    let mut low = p;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Compute the p + 1 non-zero B-spline basis functions at parameter t.
fn basis_functions(knots: &[f64], span: usize, t: f64, p: usize) -> Vec<f64> {
    let mut n_vals = vec![0.0; p + 1];
    let mut left = vec![0.0; p + 1];
    let mut right = vec![0.0; p + 1];

    n_vals[0] = 1.0;
    for j in 1..=p {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n_vals[r] / (right[r + 1] + left[j - r]);
            n_vals[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n_vals[j] = saved;
    }
    n_vals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bent_hole() -> Vec<Point3d> {
        vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(2.0, 1.0, -30.0),
            Point3d::new(6.0, 3.0, -58.0),
            Point3d::new(13.0, 6.0, -84.0),
            Point3d::new(22.0, 10.0, -107.0),
        ]
    }

    #[test]
    fn test_quadratic_bezier_midpoint() {
        let c = BSplineCurve::new(
            2,
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(5.0, 10.0, 0.0),
                Point3d::new(10.0, 0.0, 0.0),
            ],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        );
        let mid = c.evaluate(0.5);
        assert!((mid.x - 5.0).abs() < 1e-10);
        assert!((mid.y - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_chord_length_params() {
        let points = vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(0.0, 0.0, -10.0),
            Point3d::new(0.0, 0.0, -40.0),
        ];
        let params = chord_length_params(&points, 1e-9).unwrap();
        assert_eq!(params, vec![0.0, 0.25, 1.0]);
    }

    #[test]
    fn test_chord_length_params_degenerate() {
        let same = vec![Point3d::new(1.0, 2.0, 3.0); 3];
        assert!(chord_length_params(&same, 1e-9).is_none());
        assert!(chord_length_params(&same[..1], 1e-9).is_none());
    }

    #[test]
    fn test_interpolation_passes_through_points() {
        let points = bent_hole();
        let params = chord_length_params(&points, 1e-9).unwrap();
        let curve = BSplineCurve::interpolate(&points, &params, 2).unwrap();

        assert_eq!(curve.num_control_points(), points.len());
        assert_eq!(curve.domain(), (0.0, 1.0));
        for (point, t) in points.iter().zip(&params) {
            let on_curve = curve.evaluate(*t);
            assert!(
                on_curve.distance_to(point) < 1e-9,
                "t={} gave {:?}, expected {:?}",
                t,
                on_curve,
                point
            );
        }
    }

    #[test]
    fn test_interpolation_rejects_too_few_points() {
        let points = vec![Point3d::ORIGIN, Point3d::new(0.0, 0.0, -1.0)];
        assert!(BSplineCurve::interpolate(&points, &[0.0, 1.0], 2).is_none());
    }

    #[test]
    fn test_interpolation_rejects_repeated_parameters() {
        let points = vec![
            Point3d::ORIGIN,
            Point3d::new(0.0, 0.0, -10.0),
            Point3d::new(0.0, 0.0, -10.0),
            Point3d::new(0.0, 0.0, -20.0),
        ];
        let params = chord_length_params(&points, 1e-9).unwrap();
        assert!(BSplineCurve::interpolate(&points, &params, 2).is_none());
    }
}

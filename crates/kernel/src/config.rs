//! Tunables for trajectory reconstruction and batch draping.

/// Configuration for the desurvey pipeline.
#[derive(Debug, Clone, Copy)]
pub struct DesurveyConfig {
    /// Boreholes with at least this many knots get a quadratic curve; fewer
    /// fall back to a polyline. Values below 3 are treated as 3.
    pub quadratic_min_knots: usize,
    /// Process boreholes on the rayon thread pool.
    pub parallel: bool,
    /// Knot chains shorter than this (metres) are degenerate.
    pub coincidence: f64,
}

impl Default for DesurveyConfig {
    fn default() -> Self {
        Self {
            quadratic_min_knots: 4,
            parallel: true,
            coincidence: 1e-7,
        }
    }
}

impl DesurveyConfig {
    /// Single-threaded pass over the boreholes.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Polyline curves for every borehole regardless of knot count.
    pub fn linear_only() -> Self {
        Self {
            quadratic_min_knots: usize::MAX,
            ..Self::default()
        }
    }

    /// Whether a borehole with `num_knots` knots gets a quadratic curve.
    pub fn use_quadratic(&self, num_knots: usize) -> bool {
        num_knots >= self.quadratic_min_knots.max(3)
    }
}

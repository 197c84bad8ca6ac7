pub mod builder;
pub mod curve;
pub mod segment;

pub use builder::{build_trajectory, Trajectory, MIN_SURVEY_STATIONS};
pub use curve::{fit_curve, Polyline, TrajectoryCurve};
pub use segment::solve_segment;

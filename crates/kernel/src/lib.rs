//! Borehole trajectory reconstruction and feature draping.
//!
//! Survey stations are chained into 3D knots with the minimum-curvature
//! method, a curve is fitted through the knots, and from/to feature intervals
//! are projected onto that curve as a point sequence ready for line rendering.

pub mod config;
pub mod drape;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod trajectory;
pub mod validation;

// Re-export the main entry points at crate root for convenience.
pub use config::DesurveyConfig;
pub use drape::{drape, DrapedPoint, FeatureKind, PointRow};
pub use error::{Result, TrajectoryError};
pub use geometry::point::Point3d;
pub use pipeline::{drape_feature, DrapeBatch, HoleDrape, SkippedHole};
pub use trajectory::{build_trajectory, fit_curve, solve_segment, Trajectory, TrajectoryCurve};
pub use validation::{validate, ValidatedInput, ValidationConfig, ValidationReport};

//! Error taxonomy for trajectory reconstruction and draping.

use thiserror::Error;

/// Result alias used across the kernel.
pub type Result<T> = std::result::Result<T, TrajectoryError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    /// A borehole needs at least two survey stations to define a direction change.
    #[error("insufficient survey data: {provided} station(s), need at least {required}")]
    InsufficientSurveyData { required: usize, provided: usize },

    /// Along-hole distances must strictly increase between consecutive stations.
    #[error("survey stations out of order: AT {at} follows AT {previous}")]
    UnorderedSurvey { previous: f64, at: f64 },

    /// The borehole has survey rows but no collar row.
    #[error("borehole has no collar record")]
    MissingCollar,

    /// The borehole has no feature rows, so its draping length is undefined.
    #[error("borehole has no feature intervals")]
    EmptyFeatureTable,

    /// All knots coincide (or the fit system is singular); no curve can be parametrized.
    #[error("degenerate trajectory: {knots} knots do not span a curve")]
    DegenerateTrajectory { knots: usize },

    /// A curve was sampled outside its [0, 1] domain. Indicates a normalization bug.
    #[error("curve parameter {u} outside [0, 1]")]
    ParameterOutOfRange { u: f64 },

    /// The requested feature column does not exist in the feature table.
    #[error("unknown feature column '{column}'")]
    UnknownFeatureColumn { column: String },

    /// The requested column exists but its element type cannot be draped.
    #[error("feature column '{column}' has unsupported type {dtype}")]
    UnsupportedFeatureColumn { column: String, dtype: &'static str },
}

impl TrajectoryError {
    /// Whether this failure only removes one borehole from a batch.
    ///
    /// `ParameterOutOfRange` and the column lookup errors are not per-borehole
    /// conditions and abort the whole batch.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientSurveyData { .. }
                | Self::UnorderedSurvey { .. }
                | Self::MissingCollar
                | Self::EmptyFeatureTable
                | Self::DegenerateTrajectory { .. }
        )
    }
}

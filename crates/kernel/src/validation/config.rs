//! Configuration for input validation.

/// Thresholds and policies applied by [`super::validate`].
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Boreholes with fewer survey stations are reported (as a warning) and
    /// later skipped by the pipeline.
    pub min_survey_stations: usize,
    /// Treat a borehole missing from any of the three tables as an error.
    /// When false it is a warning and the pipeline excludes that borehole.
    pub require_matching_ids: bool,
    /// Report collar/survey columns beyond the schema.
    pub warn_on_extra_columns: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_survey_stations: 2,
            require_matching_ids: true,
            warn_on_extra_columns: true,
        }
    }
}

impl ValidationConfig {
    /// Accept tables whose borehole sets differ.
    pub fn lenient() -> Self {
        Self {
            require_matching_ids: false,
            ..Self::default()
        }
    }
}

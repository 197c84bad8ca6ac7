//! Typed tables that have passed validation.

use std::collections::{HashMap, HashSet};

use drillhole_types::{CollarRecord, FeatureInterval, FeatureValue, HoleId, RawColumn, SurveyStation};

use super::types::ValidationReport;
use crate::drape::FeatureKind;
use crate::error::{Result, TrajectoryError};

/// Collar, survey and feature tables that passed [`super::validate`].
///
/// Only validation constructs this type, so every function taking it can rely
/// on the schema: required columns present, correct types, finite values,
/// ordered survey depths and well-formed intervals.
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    pub(super) collars: Vec<CollarRecord>,
    pub(super) stations: Vec<SurveyStation>,
    pub(super) features: FeatureTable,
    pub(super) report: ValidationReport,
}

impl ValidatedInput {
    pub fn collars(&self) -> &[CollarRecord] {
        &self.collars
    }

    pub fn stations(&self) -> &[SurveyStation] {
        &self.stations
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    /// Warnings raised while validating; errors never reach this type.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Every borehole ID, in order of first appearance in the survey table,
    /// then the collar table, then the feature table.
    ///
    /// Boreholes missing from the survey table only get here when validation
    /// ran with lenient ID matching.
    pub fn hole_order(&self) -> Vec<HoleId> {
        let mut seen = HashSet::new();
        self.stations
            .iter()
            .map(|s| &s.hole_id)
            .chain(self.collars.iter().map(|c| &c.hole_id))
            .chain(&self.features.ids)
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect()
    }

    /// Survey stations grouped by borehole, keeping table order within each.
    pub fn stations_by_hole(&self) -> HashMap<HoleId, Vec<SurveyStation>> {
        let mut grouped: HashMap<HoleId, Vec<SurveyStation>> = HashMap::new();
        for station in &self.stations {
            grouped.entry(station.hole_id.clone()).or_default().push(station.clone());
        }
        grouped
    }
}

/// The feature table: interval bounds plus any number of feature columns.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    pub(super) ids: Vec<HoleId>,
    pub(super) from: Vec<f64>,
    pub(super) to: Vec<f64>,
    pub(super) columns: Vec<RawColumn>,
}

impl FeatureTable {
    /// Names of the columns other than ID, FROM and TO.
    pub fn feature_columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Kind of a feature column, or why it cannot be draped.
    pub fn kind_of(&self, column: &str) -> Result<FeatureKind> {
        self.resolve(column).map(|(kind, _)| kind)
    }

    /// All intervals for `column`, in table row order.
    pub fn intervals(&self, column: &str) -> Result<(FeatureKind, Vec<FeatureInterval>)> {
        let (kind, col) = self.resolve(column)?;
        let values: Vec<FeatureValue> = match kind {
            FeatureKind::Categorical => col
                .data
                .as_text()
                .unwrap_or_default()
                .iter()
                .cloned()
                .map(FeatureValue::Category)
                .collect(),
            FeatureKind::Numeric => col
                .data
                .as_float()
                .unwrap_or_default()
                .iter()
                .copied()
                .map(FeatureValue::Numeric)
                .collect(),
        };

        let intervals = values
            .into_iter()
            .enumerate()
            .map(|(row, value)| FeatureInterval {
                hole_id: self.ids[row].clone(),
                from: self.from[row],
                to: self.to[row],
                value,
            })
            .collect();
        Ok((kind, intervals))
    }

    /// Look up a column and decide its kind. Every categorical versus numeric
    /// decision goes through here.
    fn resolve(&self, column: &str) -> Result<(FeatureKind, &RawColumn)> {
        let col = self.lookup(column)?;
        let kind = FeatureKind::of(&col.data).ok_or_else(|| TrajectoryError::UnsupportedFeatureColumn {
            column: column.to_owned(),
            dtype: col.data.dtype(),
        })?;
        Ok((kind, col))
    }

    fn lookup(&self, column: &str) -> Result<&RawColumn> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .ok_or_else(|| TrajectoryError::UnknownFeatureColumn {
                column: column.to_owned(),
            })
    }
}

//! Validation of raw collar, survey and feature tables.
//!
//! Validation is a pure function from raw tables to either a
//! [`ValidatedInput`] or a [`ValidationReport`] describing why the tables were
//! rejected. Passes run in order, and content checks only run once the
//! structure is sound:
//! - **Structure**: required columns, element types, equal column lengths.
//! - **Content**: finite values, unique collars, ordered survey depths,
//!   well-formed intervals, survey station counts.
//! - **Consistency**: the same borehole IDs in all three tables.

pub mod config;
pub mod input;
pub mod types;

pub use config::*;
pub use input::*;
pub use types::*;

use std::collections::{BTreeSet, HashMap, HashSet};

use drillhole_types::{CollarRecord, ColumnData, HoleId, RawColumn, RawTable, SurveyStation};
use tracing::{debug, info, instrument};

const COLLAR_TABLE: &str = "collar";
const SURVEY_TABLE: &str = "survey";

const COLLAR_COLUMNS: [&str; 4] = ["ID", "X", "Y", "Z"];
const SURVEY_COLUMNS: [&str; 4] = ["ID", "AT", "AZ", "DIP"];
const INTERVAL_COLUMNS: [&str; 3] = ["ID", "FROM", "TO"];

/// Validate the three input tables.
///
/// On success the returned input carries any warnings; on failure the report
/// lists every error found by the passes that ran.
#[instrument(skip_all, fields(table = %table.name))]
pub fn validate(
    collar: &RawTable,
    survey: &RawTable,
    table: &RawTable,
    config: &ValidationConfig,
) -> Result<ValidatedInput, ValidationReport> {
    let mut report = ValidationReport::default();

    check_shape(collar, COLLAR_TABLE, &COLLAR_COLUMNS, config.warn_on_extra_columns, &mut report);
    check_shape(survey, SURVEY_TABLE, &SURVEY_COLUMNS, config.warn_on_extra_columns, &mut report);
    check_shape(table, &table.name, &INTERVAL_COLUMNS, false, &mut report);
    check_feature_columns(table, &mut report);

    let collar_cols = (
        text_column(collar, COLLAR_TABLE, "ID", &mut report),
        float_column(collar, COLLAR_TABLE, "X", &mut report),
        float_column(collar, COLLAR_TABLE, "Y", &mut report),
        float_column(collar, COLLAR_TABLE, "Z", &mut report),
    );
    let survey_cols = (
        text_column(survey, SURVEY_TABLE, "ID", &mut report),
        float_column(survey, SURVEY_TABLE, "AT", &mut report),
        float_column(survey, SURVEY_TABLE, "AZ", &mut report),
        float_column(survey, SURVEY_TABLE, "DIP", &mut report),
    );
    let table_cols = (
        text_column(table, &table.name, "ID", &mut report),
        float_column(table, &table.name, "FROM", &mut report),
        float_column(table, &table.name, "TO", &mut report),
    );

    let (
        (Some(c_id), Some(c_x), Some(c_y), Some(c_z)),
        (Some(s_id), Some(s_at), Some(s_az), Some(s_dip)),
        (Some(t_id), Some(t_from), Some(t_to)),
    ) = (collar_cols, survey_cols, table_cols)
    else {
        return Err(finish(report));
    };
    if !report.is_valid() {
        return Err(finish(report));
    }
    debug!("table structure valid");

    let collars: Vec<CollarRecord> = (0..c_id.len())
        .map(|row| CollarRecord::new(c_id[row].as_str(), c_x[row], c_y[row], c_z[row]))
        .collect();
    let stations: Vec<SurveyStation> = (0..s_id.len())
        .map(|row| SurveyStation::new(s_id[row].as_str(), s_at[row], s_az[row], s_dip[row]))
        .collect();
    let ids: Vec<HoleId> = t_id.iter().map(|id| HoleId::from(id.as_str())).collect();

    check_collars(&collars, &mut report);
    check_survey(&stations, config, &mut report);
    check_intervals(&table.name, &ids, t_from, t_to, &mut report);
    check_hole_ids(&table.name, &collars, &stations, &ids, config, &mut report);

    if !report.is_valid() {
        return Err(finish(report));
    }

    let columns = table
        .columns
        .iter()
        .filter(|c| !INTERVAL_COLUMNS.contains(&c.name.as_str()))
        .cloned()
        .collect();
    let report = finish(report);
    Ok(ValidatedInput {
        collars,
        stations,
        features: FeatureTable {
            ids,
            from: t_from.to_vec(),
            to: t_to.to_vec(),
            columns,
        },
        report,
    })
}

fn finish(report: ValidationReport) -> ValidationReport {
    info!(
        valid = report.is_valid(),
        error_count = report.error_count(),
        warning_count = report.warning_count(),
        "validation complete"
    );
    report
}

/// Required columns present, extra columns noted, all columns the same length.
fn check_shape(
    table: &RawTable,
    name: &str,
    required: &[&str],
    warn_extra: bool,
    report: &mut ValidationReport,
) {
    for column in required {
        if !table.has_column(column) {
            report.push(
                ValidationFinding::error(FindingCode::MissingColumn, name, column)
                    .expected("column present")
                    .actual("missing"),
            );
        }
    }
    if warn_extra {
        for column in table.column_names().filter(|c| !required.contains(c)) {
            report.push(
                ValidationFinding::warning(FindingCode::ExtraColumn, name, column)
                    .expected(format!("only {}", required.join(", ")))
                    .actual("additional column"),
            );
        }
    }

    let rows = table.row_count();
    for column in table.columns.iter().filter(|c| c.data.len() != rows) {
        report.push(
            ValidationFinding::error(FindingCode::RaggedColumn, name, &column.name)
                .expected(format!("{rows} rows"))
                .actual(format!("{} rows", column.data.len())),
        );
    }
}

/// Feature columns must be drapeable; integer columns are kept but flagged.
fn check_feature_columns(table: &RawTable, report: &mut ValidationReport) {
    let features = table
        .columns
        .iter()
        .filter(|c| !INTERVAL_COLUMNS.contains(&c.name.as_str()));
    for column in features {
        if let ColumnData::Integer(_) = column.data {
            report.push(
                ValidationFinding::warning(FindingCode::UnsupportedFeatureType, &table.name, &column.name)
                    .expected("text or float")
                    .actual(column.data.dtype()),
            );
        }
    }
}

fn typed_column<'a>(
    table: &'a RawTable,
    name: &str,
    field: &str,
    expected: &'static str,
    report: &mut ValidationReport,
) -> Option<&'a RawColumn> {
    let column = table.column(field)?;
    if column.data.dtype() != expected {
        report.push(
            ValidationFinding::error(FindingCode::WrongType, name, field)
                .expected(expected)
                .actual(column.data.dtype()),
        );
        return None;
    }
    Some(column)
}

fn text_column<'a>(
    table: &'a RawTable,
    name: &str,
    field: &str,
    report: &mut ValidationReport,
) -> Option<&'a [String]> {
    typed_column(table, name, field, "text", report)?.data.as_text()
}

fn float_column<'a>(
    table: &'a RawTable,
    name: &str,
    field: &str,
    report: &mut ValidationReport,
) -> Option<&'a [f64]> {
    typed_column(table, name, field, "float", report)?.data.as_float()
}

fn non_finite(name: &str, field: &str, hole_id: &HoleId, value: f64) -> ValidationFinding {
    ValidationFinding::error(FindingCode::NonFiniteValue, name, field)
        .for_hole(hole_id)
        .expected("finite number")
        .actual(value.to_string())
}

fn check_collars(collars: &[CollarRecord], report: &mut ValidationReport) {
    let mut seen = HashSet::new();
    for collar in collars {
        for (field, value) in [("X", collar.x), ("Y", collar.y), ("Z", collar.z)] {
            if !value.is_finite() {
                report.push(non_finite(COLLAR_TABLE, field, &collar.hole_id, value));
            }
        }
        if !seen.insert(&collar.hole_id) {
            report.push(
                ValidationFinding::error(FindingCode::DuplicateCollar, COLLAR_TABLE, "ID")
                    .for_hole(&collar.hole_id)
                    .expected("one collar row")
                    .actual("repeated"),
            );
        }
    }
}

fn check_survey(stations: &[SurveyStation], config: &ValidationConfig, report: &mut ValidationReport) {
    let mut last_at: HashMap<&HoleId, f64> = HashMap::new();
    let mut counts: HashMap<&HoleId, usize> = HashMap::new();
    let mut order: Vec<&HoleId> = Vec::new();

    for station in stations {
        for (field, value) in [("AT", station.at), ("AZ", station.az), ("DIP", station.dip)] {
            if !value.is_finite() {
                report.push(non_finite(SURVEY_TABLE, field, &station.hole_id, value));
            }
        }

        if let Some(previous) = last_at.insert(&station.hole_id, station.at) {
            if station.at <= previous {
                report.push(
                    ValidationFinding::error(FindingCode::UnorderedSurvey, SURVEY_TABLE, "AT")
                        .for_hole(&station.hole_id)
                        .expected(format!("AT greater than {previous}"))
                        .actual(station.at.to_string()),
                );
            }
        } else {
            order.push(&station.hole_id);
        }
        *counts.entry(&station.hole_id).or_default() += 1;
    }

    for hole_id in order {
        let count = counts[hole_id];
        if count < config.min_survey_stations {
            report.push(
                ValidationFinding::warning(FindingCode::InsufficientSurvey, SURVEY_TABLE, "ID")
                    .for_hole(hole_id)
                    .expected(format!("at least {} stations", config.min_survey_stations))
                    .actual(format!("{count} station(s)")),
            );
        }
    }
}

fn check_intervals(name: &str, ids: &[HoleId], from: &[f64], to: &[f64], report: &mut ValidationReport) {
    for ((hole_id, &from), &to) in ids.iter().zip(from).zip(to) {
        if !from.is_finite() {
            report.push(non_finite(name, "FROM", hole_id, from));
        } else if !to.is_finite() {
            report.push(non_finite(name, "TO", hole_id, to));
        } else if from < 0.0 || from >= to {
            report.push(
                ValidationFinding::error(FindingCode::InvalidInterval, name, "FROM")
                    .for_hole(hole_id)
                    .expected("0 <= FROM < TO")
                    .actual(format!("FROM {from}, TO {to}")),
            );
        }
    }
}

/// Every borehole must appear in collar, survey and the feature table.
fn check_hole_ids(
    name: &str,
    collars: &[CollarRecord],
    stations: &[SurveyStation],
    ids: &[HoleId],
    config: &ValidationConfig,
    report: &mut ValidationReport,
) {
    let in_collar: BTreeSet<&HoleId> = collars.iter().map(|c| &c.hole_id).collect();
    let in_survey: BTreeSet<&HoleId> = stations.iter().map(|s| &s.hole_id).collect();
    let in_table: BTreeSet<&HoleId> = ids.iter().collect();
    let severity = if config.require_matching_ids {
        Severity::Error
    } else {
        Severity::Warning
    };

    let all: BTreeSet<&HoleId> = in_collar.iter().chain(&in_survey).chain(&in_table).copied().collect();
    for hole_id in all {
        for (table, present) in [
            (COLLAR_TABLE, in_collar.contains(hole_id)),
            (SURVEY_TABLE, in_survey.contains(hole_id)),
            (name, in_table.contains(hole_id)),
        ] {
            if !present {
                report.push(
                    ValidationFinding::error(FindingCode::IdMismatch, table, "ID")
                        .with_severity(severity)
                        .for_hole(hole_id)
                        .expected("borehole present in collar, survey and feature tables")
                        .actual("missing"),
                );
            }
        }
    }
}

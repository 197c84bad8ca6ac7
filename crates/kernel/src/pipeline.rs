//! Batch draping of one feature column across every borehole.
//!
//! Each borehole is reconstructed and draped independently; per-borehole
//! results land in a vector indexed like the borehole order, so the output
//! sequence is the same whether or not the work ran in parallel.

use std::collections::HashMap;

use drillhole_types::{CollarRecord, FeatureInterval, HoleId, SurveyStation};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::DesurveyConfig;
use crate::drape::{drape, feature_extent, DrapedPoint, FeatureKind, PointRow};
use crate::error::{Result, TrajectoryError};
use crate::geometry::point::Point3d;
use crate::trajectory::{build_trajectory, fit_curve};
use crate::validation::ValidatedInput;

/// Draped output for one borehole.
#[derive(Debug, Clone, Serialize)]
pub struct HoleDrape {
    pub hole_id: HoleId,
    /// Trajectory knots, collar first.
    pub knots: Vec<Point3d>,
    /// 1 for a polyline, 2 for a quadratic curve.
    pub curve_degree: usize,
    pub points: Vec<DrapedPoint>,
}

/// A borehole left out of the batch, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedHole {
    pub hole_id: HoleId,
    pub reason: TrajectoryError,
}

/// Result of draping one feature column over all boreholes.
#[derive(Debug, Clone)]
pub struct DrapeBatch {
    pub column: String,
    pub kind: FeatureKind,
    /// Successfully draped boreholes, in [`ValidatedInput::hole_order`] order.
    pub holes: Vec<HoleDrape>,
    pub skipped: Vec<SkippedHole>,
}

impl DrapeBatch {
    /// All points, borehole after borehole.
    pub fn points(&self) -> impl Iterator<Item = &DrapedPoint> {
        self.holes.iter().flat_map(|h| h.points.iter())
    }

    pub fn rows(&self) -> Vec<PointRow> {
        self.points().map(DrapedPoint::to_row).collect()
    }

    pub fn hole(&self, hole_id: &HoleId) -> Option<&HoleDrape> {
        self.holes.iter().find(|h| &h.hole_id == hole_id)
    }

    pub fn is_skipped(&self, hole_id: &HoleId) -> bool {
        self.skipped.iter().any(|s| &s.hole_id == hole_id)
    }
}

/// Everything one borehole needs, gathered before any geometry runs.
struct HoleJob<'a> {
    hole_id: HoleId,
    collar: Option<&'a CollarRecord>,
    stations: Vec<SurveyStation>,
    intervals: Vec<FeatureInterval>,
}

/// Reconstruct every borehole and drape `column` onto it.
///
/// Column lookup happens once, up front. Per-borehole failures that only
/// concern that borehole are collected in [`DrapeBatch::skipped`]; anything
/// else (a curve sampled outside its domain) aborts the batch.
#[instrument(skip(input, config), fields(parallel = config.parallel))]
pub fn drape_feature(input: &ValidatedInput, column: &str, config: &DesurveyConfig) -> Result<DrapeBatch> {
    let (kind, intervals) = input.features().intervals(column)?;

    let collars: HashMap<&HoleId, &CollarRecord> =
        input.collars().iter().map(|c| (&c.hole_id, c)).collect();
    let mut stations = input.stations_by_hole();
    let mut intervals_by_hole: HashMap<HoleId, Vec<FeatureInterval>> = HashMap::new();
    for interval in intervals {
        intervals_by_hole.entry(interval.hole_id.clone()).or_default().push(interval);
    }

    let jobs: Vec<HoleJob<'_>> = input
        .hole_order()
        .into_iter()
        .map(|hole_id| HoleJob {
            collar: collars.get(&hole_id).copied(),
            stations: stations.remove(&hole_id).unwrap_or_default(),
            intervals: intervals_by_hole.remove(&hole_id).unwrap_or_default(),
            hole_id,
        })
        .collect();

    info!(holes = jobs.len(), ?kind, "draping feature column");

    let results: Vec<Result<HoleDrape>> = if config.parallel {
        jobs.par_iter().map(|job| drape_hole(job, kind, config)).collect()
    } else {
        jobs.iter().map(|job| drape_hole(job, kind, config)).collect()
    };

    let (holes, skipped) = sort_results(&jobs, results)?;
    info!(draped = holes.len(), skipped = skipped.len(), "draping complete");

    Ok(DrapeBatch {
        column: column.to_owned(),
        kind,
        holes,
        skipped,
    })
}

/// Split per-borehole results into draped and skipped boreholes, keeping job
/// order. The first error that is not skippable is returned instead.
fn sort_results(
    jobs: &[HoleJob<'_>],
    results: Vec<Result<HoleDrape>>,
) -> Result<(Vec<HoleDrape>, Vec<SkippedHole>)> {
    let mut holes = Vec::with_capacity(jobs.len());
    let mut skipped = Vec::new();
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(hole) => holes.push(hole),
            Err(reason) if reason.is_skippable() => {
                warn!(hole = %job.hole_id, %reason, "borehole skipped");
                skipped.push(SkippedHole {
                    hole_id: job.hole_id.clone(),
                    reason,
                });
            }
            Err(reason) => return Err(reason),
        }
    }
    Ok((holes, skipped))
}

fn drape_hole(job: &HoleJob<'_>, kind: FeatureKind, config: &DesurveyConfig) -> Result<HoleDrape> {
    let collar = job.collar.ok_or(TrajectoryError::MissingCollar)?;
    let trajectory = build_trajectory(collar, &job.stations)?;
    let curve = fit_curve(&trajectory.knots, config)?;
    let total_length = feature_extent(&job.intervals).ok_or(TrajectoryError::EmptyFeatureTable)?;

    debug!(
        hole = %job.hole_id,
        degree = curve.degree(),
        surveyed_length = trajectory.surveyed_length(),
        curve_length = curve.approximate_length(64),
        total_length,
        "curve fitted"
    );

    let points = drape(&curve, total_length, &job.intervals, kind)?;
    Ok(HoleDrape {
        hole_id: job.hole_id.clone(),
        curve_degree: curve.degree(),
        knots: trajectory.knots,
        points,
    })
}

//! Drape a feature column onto reconstructed borehole trajectories.
//!
//! Usage: `drape_points <tables.json> <column> [--sequential] [--lenient] [--linear]`
//!
//! The input document holds the three raw tables under `collar`, `survey`
//! and `table`. The validation report goes to stderr; the point sequence is
//! written to stdout as JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueHint};
use drillhole_kernel::validation::{validate, ValidationConfig};
use drillhole_kernel::{drape_feature, DesurveyConfig, PointRow};
use drillhole_types::RawTable;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct InputDocument {
    collar: RawTable,
    survey: RawTable,
    table: RawTable,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Drape a feature column onto borehole trajectories", long_about = None)]
struct Args {
    /// JSON document holding the `collar`, `survey` and `table` raw tables
    #[arg(value_hint = ValueHint::FilePath)]
    path: PathBuf,

    /// Feature column of the interval table to drape
    column: String,

    /// Process boreholes one after another instead of on the thread pool
    #[arg(long, action = ArgAction::SetTrue)]
    sequential: bool,

    /// Accept tables whose borehole sets differ; incomplete boreholes are skipped
    #[arg(long, action = ArgAction::SetTrue)]
    lenient: bool,

    /// Fit a polyline through every borehole, never a quadratic curve
    #[arg(long, action = ArgAction::SetTrue)]
    linear: bool,
}

impl Args {
    fn validation_config(&self) -> ValidationConfig {
        if self.lenient {
            ValidationConfig::lenient()
        } else {
            ValidationConfig::default()
        }
    }

    fn desurvey_config(&self) -> DesurveyConfig {
        let base = if self.sequential {
            DesurveyConfig::sequential()
        } else {
            DesurveyConfig::default()
        };
        if self.linear {
            DesurveyConfig {
                parallel: base.parallel,
                ..DesurveyConfig::linear_only()
            }
        } else {
            base
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.path).with_context(|| format!("reading {}", args.path.display()))?;
    let doc: InputDocument =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", args.path.display()))?;

    let input = match validate(&doc.collar, &doc.survey, &doc.table, &args.validation_config()) {
        Ok(input) => input,
        Err(report) => {
            eprint!("{report}");
            return Ok(false);
        }
    };
    if input.report().warning_count() > 0 {
        eprint!("{}", input.report());
    }

    let batch = drape_feature(&input, &args.column, &args.desurvey_config())?;

    for skipped in &batch.skipped {
        eprintln!("skipped {}: {}", skipped.hole_id, skipped.reason);
    }

    let rows: Vec<PointRow> = batch.rows();
    info!(column = %batch.column, kind = ?batch.kind, points = rows.len(), "writing point sequence");
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(true)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

use drillhole_kernel::validation::{validate, FindingCode, ValidationConfig};
use drillhole_kernel::{drape_feature, DesurveyConfig, FeatureKind, Point3d, PointRow, TrajectoryError};
use drillhole_types::{FeatureValue, HoleId, RawColumn, RawTable};

fn collar(rows: &[(&str, f64, f64, f64)]) -> RawTable {
    RawTable::new(
        "collar",
        vec![
            RawColumn::text("ID", &rows.iter().map(|r| r.0).collect::<Vec<_>>()),
            RawColumn::float("X", &rows.iter().map(|r| r.1).collect::<Vec<_>>()),
            RawColumn::float("Y", &rows.iter().map(|r| r.2).collect::<Vec<_>>()),
            RawColumn::float("Z", &rows.iter().map(|r| r.3).collect::<Vec<_>>()),
        ],
    )
}

fn survey(rows: &[(&str, f64, f64, f64)]) -> RawTable {
    RawTable::new(
        "survey",
        vec![
            RawColumn::text("ID", &rows.iter().map(|r| r.0).collect::<Vec<_>>()),
            RawColumn::float("AT", &rows.iter().map(|r| r.1).collect::<Vec<_>>()),
            RawColumn::float("AZ", &rows.iter().map(|r| r.2).collect::<Vec<_>>()),
            RawColumn::float("DIP", &rows.iter().map(|r| r.3).collect::<Vec<_>>()),
        ],
    )
}

fn lith(rows: &[(&str, f64, f64, &str, f64)]) -> RawTable {
    RawTable::new(
        "lith",
        vec![
            RawColumn::text("ID", &rows.iter().map(|r| r.0).collect::<Vec<_>>()),
            RawColumn::float("FROM", &rows.iter().map(|r| r.1).collect::<Vec<_>>()),
            RawColumn::float("TO", &rows.iter().map(|r| r.2).collect::<Vec<_>>()),
            RawColumn::text("ROCK", &rows.iter().map(|r| r.3).collect::<Vec<_>>()),
            RawColumn::float("CU", &rows.iter().map(|r| r.4).collect::<Vec<_>>()),
        ],
    )
}

/// Two inclined holes plus a steep one with five stations.
fn three_holes() -> (RawTable, RawTable, RawTable) {
    let collar = collar(&[
        ("DH1", 1000.0, 1000.0, 500.0),
        ("DH2", 1100.0, 950.0, 505.0),
        ("DH3", 1200.0, 900.0, 510.0),
    ]);
    let survey = survey(&[
        ("DH1", 0.0, 0.0, 60.0),
        ("DH1", 60.0, 5.0, 62.0),
        ("DH1", 120.0, 8.0, 65.0),
        ("DH2", 0.0, 90.0, 55.0),
        ("DH2", 90.0, 95.0, 57.0),
        ("DH3", 0.0, 180.0, 80.0),
        ("DH3", 40.0, 182.0, 79.0),
        ("DH3", 80.0, 185.0, 77.0),
        ("DH3", 120.0, 189.0, 76.0),
        ("DH3", 160.0, 192.0, 74.0),
    ]);
    let lith = lith(&[
        ("DH1", 0.0, 30.0, "OVB", 0.0),
        ("DH1", 30.0, 120.0, "ORE", 1.2),
        ("DH2", 0.0, 45.0, "OVB", 0.1),
        ("DH2", 45.0, 70.0, "ORE", 0.9),
        ("DH2", 70.0, 90.0, "WASTE", 0.2),
        ("DH3", 0.0, 160.0, "ORE", 2.5),
    ]);
    (collar, survey, lith)
}

#[test]
fn test_single_hole_categorical_scenario() {
    let collar = collar(&[("DH1", 1000.0, 1000.0, 500.0)]);
    let survey = survey(&[
        ("DH1", 0.0, 0.0, 0.0),
        ("DH1", 50.0, 10.0, 5.0),
        ("DH1", 100.0, 15.0, 10.0),
    ]);
    let lith = lith(&[("DH1", 0.0, 50.0, "ORE", 1.0), ("DH1", 50.0, 100.0, "WASTE", 0.1)]);

    let input = validate(&collar, &survey, &lith, &ValidationConfig::default()).unwrap();
    let batch = drape_feature(&input, "ROCK", &DesurveyConfig::default()).unwrap();

    assert_eq!(batch.kind, FeatureKind::Categorical);
    assert!(batch.skipped.is_empty());
    let hole = batch.hole(&HoleId::from("DH1")).unwrap();
    assert_eq!(hole.knots.len(), 3);
    assert_eq!(hole.knots[0], Point3d::new(1000.0, 1000.0, 500.0));
    assert_eq!(hole.curve_degree, 1);

    let points: Vec<_> = batch.points().collect();
    assert_eq!(points.len(), 6);
    assert!(points[2].is_gap());
    assert_eq!(points[2].value, FeatureValue::from("ORE"));
    assert!(points[5].is_gap());
    assert_eq!(points[5].value, FeatureValue::from("WASTE"));

    let top = points[0].position.unwrap();
    let bottom = points[4].position.unwrap();
    assert!(top.distance_to(&hole.knots[0]) < 1e-9);
    assert!(bottom.distance_to(&hole.knots[2]) < 1e-9);
}

#[test]
fn test_single_station_hole_is_skipped() {
    let collar = collar(&[("DH1", 0.0, 0.0, 100.0), ("DH2", 50.0, 0.0, 100.0)]);
    let survey = survey(&[
        ("DH1", 0.0, 0.0, 90.0),
        ("DH1", 100.0, 0.0, 90.0),
        ("DH2", 0.0, 0.0, 90.0),
    ]);
    let lith = lith(&[("DH1", 0.0, 100.0, "ORE", 1.0), ("DH2", 0.0, 40.0, "ORE", 1.0)]);

    let input = validate(&collar, &survey, &lith, &ValidationConfig::default()).unwrap();
    assert_eq!(input.report().findings_of(FindingCode::InsufficientSurvey).len(), 1);

    let batch = drape_feature(&input, "ROCK", &DesurveyConfig::default()).unwrap();
    assert_eq!(batch.holes.len(), 1);
    assert_eq!(batch.skipped.len(), 1);
    assert_eq!(batch.skipped[0].hole_id, HoleId::from("DH2"));
    assert_eq!(
        batch.skipped[0].reason,
        TrajectoryError::InsufficientSurveyData {
            required: 2,
            provided: 1
        }
    );
    assert_eq!(batch.points().count(), 3);
}

#[test]
fn test_numeric_holes_are_separated_by_one_gap() {
    let (collar, survey, lith) = three_holes();
    let input = validate(&collar, &survey, &lith, &ValidationConfig::default()).unwrap();
    let batch = drape_feature(&input, "CU", &DesurveyConfig::default()).unwrap();

    assert_eq!(batch.kind, FeatureKind::Numeric);
    let order: Vec<&str> = batch.holes.iter().map(|h| h.hole_id.as_str()).collect();
    assert_eq!(order, vec!["DH1", "DH2", "DH3"]);
    assert_eq!(batch.hole(&HoleId::from("DH3")).unwrap().curve_degree, 2);

    let counts: Vec<usize> = batch.holes.iter().map(|h| h.points.len()).collect();
    assert_eq!(counts, vec![5, 7, 3]);
    for hole in &batch.holes {
        let last = hole.points.last().unwrap();
        assert!(last.is_gap());
        assert!(last.value.is_nan());
        assert_eq!(hole.points.iter().filter(|p| p.is_gap()).count(), 1);
    }
    assert_eq!(batch.points().count(), 15);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let (collar, survey, lith) = three_holes();
    let input = validate(&collar, &survey, &lith, &ValidationConfig::default()).unwrap();

    let parallel = drape_feature(&input, "ROCK", &DesurveyConfig::default()).unwrap();
    let sequential = drape_feature(&input, "ROCK", &DesurveyConfig::sequential()).unwrap();

    let a: Vec<_> = parallel.points().cloned().collect();
    let b: Vec<_> = sequential.points().cloned().collect();
    assert_eq!(a, b);
}

#[test]
fn test_unknown_column_aborts() {
    let (collar, survey, lith) = three_holes();
    let input = validate(&collar, &survey, &lith, &ValidationConfig::default()).unwrap();
    let err = drape_feature(&input, "AU", &DesurveyConfig::default()).unwrap_err();
    assert_eq!(err, TrajectoryError::UnknownFeatureColumn { column: "AU".into() });
}

#[test]
fn test_lenient_ids_exclude_incomplete_holes() {
    let collar = collar(&[("DH1", 0.0, 0.0, 100.0), ("DH3", 80.0, 0.0, 100.0)]);
    let survey = survey(&[
        ("DH1", 0.0, 0.0, 90.0),
        ("DH1", 100.0, 0.0, 90.0),
        ("DH2", 0.0, 0.0, 90.0),
        ("DH2", 100.0, 0.0, 90.0),
        ("DH3", 0.0, 0.0, 90.0),
        ("DH3", 100.0, 0.0, 90.0),
    ]);
    let lith = lith(&[("DH1", 0.0, 100.0, "ORE", 1.0), ("DH2", 0.0, 100.0, "ORE", 1.0)]);

    assert!(validate(&collar, &survey, &lith, &ValidationConfig::default()).is_err());

    let input = validate(&collar, &survey, &lith, &ValidationConfig::lenient()).unwrap();
    let batch = drape_feature(&input, "ROCK", &DesurveyConfig::default()).unwrap();
    assert_eq!(batch.holes.len(), 1);
    assert_eq!(batch.skipped.len(), 2);
    assert_eq!(batch.skipped[0].reason, TrajectoryError::MissingCollar);
    assert_eq!(batch.skipped[1].reason, TrajectoryError::EmptyFeatureTable);
    assert!(batch.is_skipped(&HoleId::from("DH3")));
}

#[test]
fn test_lenient_ids_report_unsurveyed_holes() {
    let collar = collar(&[("DH1", 0.0, 0.0, 100.0), ("DH9", 40.0, 0.0, 100.0)]);
    let survey = survey(&[("DH1", 0.0, 0.0, 90.0), ("DH1", 100.0, 0.0, 90.0)]);
    let lith = lith(&[
        ("DH1", 0.0, 100.0, "ORE", 1.0),
        ("DH9", 0.0, 50.0, "ORE", 1.0),
        ("DH8", 0.0, 30.0, "WASTE", 0.1),
    ]);

    let input = validate(&collar, &survey, &lith, &ValidationConfig::lenient()).unwrap();
    let batch = drape_feature(&input, "ROCK", &DesurveyConfig::default()).unwrap();

    assert_eq!(batch.holes.len(), 1);
    assert_eq!(batch.holes[0].hole_id, HoleId::from("DH1"));
    assert_eq!(batch.skipped.len(), 2);
    assert_eq!(batch.skipped[0].hole_id, HoleId::from("DH9"));
    assert_eq!(
        batch.skipped[0].reason,
        TrajectoryError::InsufficientSurveyData {
            required: 2,
            provided: 0
        }
    );
    assert_eq!(batch.skipped[1].hole_id, HoleId::from("DH8"));
    assert_eq!(batch.skipped[1].reason, TrajectoryError::MissingCollar);
}

#[test]
fn test_vertical_hole_positions_follow_depth() {
    let collar = collar(&[("DH1", 500.0, 500.0, 100.0)]);
    let survey = survey(&[
        ("DH1", 0.0, 0.0, 90.0),
        ("DH1", 50.0, 0.0, 90.0),
        ("DH1", 100.0, 0.0, 90.0),
        ("DH1", 200.0, 0.0, 90.0),
    ]);
    let lith = lith(&[("DH1", 25.0, 75.0, "ORE", 1.0), ("DH1", 150.0, 200.0, "ORE", 2.0)]);

    let input = validate(&collar, &survey, &lith, &ValidationConfig::default()).unwrap();
    let batch = drape_feature(&input, "ROCK", &DesurveyConfig::default()).unwrap();
    let z: Vec<f64> = batch.points().filter_map(|p| p.position).map(|p| p.z).collect();
    let expected = [75.0, 25.0, -50.0, -100.0];
    for (got, want) in z.iter().zip(expected) {
        assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
    }
}

#[test]
fn test_rows_serialize_with_null_gaps() {
    let (collar, survey, lith) = three_holes();
    let input = validate(&collar, &survey, &lith, &ValidationConfig::default()).unwrap();
    let batch = drape_feature(&input, "CU", &DesurveyConfig::sequential()).unwrap();

    let rows = batch.rows();
    let json = serde_json::to_value(&rows).unwrap();
    let gap = &json[4];
    assert!(gap["X"].is_null());
    assert!(gap["Z"].is_null());
    assert!(gap["value"].is_null());
    assert!(json[0]["X"].is_number());

    let text = serde_json::to_string(&rows).unwrap();
    let back: Vec<PointRow> = serde_json::from_str(&text).unwrap();
    assert_eq!(back.len(), rows.len());
    for (read, written) in back.iter().zip(&rows) {
        assert_eq!(read.value, written.value);
        assert_eq!(read.x.is_none(), written.x.is_none());
        if let (Some(a), Some(b)) = (read.z, written.z) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}

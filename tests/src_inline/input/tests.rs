use std::fs::File;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use super::columns::{read_labels, read_predictions};
use super::layout::InputLayout;
use super::*;
use crate::fixtures::{make_temp_dir, write_file, write_manifest, write_model_type};
use crate::model::profile::TrackProfile;

fn directory_profile() -> TrackProfile {
    TrackProfile {
        model_order: ModelOrder::Directory,
        ..TrackProfile::single_table_v1()
    }
}

#[test]
fn test_labels_skip_header() {
    let dir = make_temp_dir("labels");
    let path = dir.join("challenge_label.csv");
    write_file(&path, "is_train\n0\n1\n1.0\n\n0\n");
    assert_eq!(read_labels(&path).unwrap(), vec![0, 1, 1, 0]);
}

#[test]
fn test_label_outside_binary_rejected() {
    let dir = make_temp_dir("labels_bad");
    let path = dir.join("challenge_label.csv");
    write_file(&path, "is_train\n0\n2\n");
    match read_labels(&path) {
        Err(InputError::InvalidLabel { line, value, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(value, 2.0);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_predictions_without_header() {
    let dir = make_temp_dir("preds");
    let path = dir.join("prediction.csv");
    write_file(&path, "0.25\n# comment\n  0.5  \n1e-3\n");
    assert_eq!(read_predictions(&path).unwrap(), vec![0.25, 0.5, 0.001]);
}

#[test]
fn test_prediction_with_two_columns_rejected() {
    let dir = make_temp_dir("preds_cols");
    let path = dir.join("prediction.csv");
    write_file(&path, "0.25\n0.5,0.1\n");
    let err = read_predictions(&path).unwrap_err();
    assert!(matches!(err, InputError::Parse { .. }));
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_prediction_not_a_number_rejected() {
    let dir = make_temp_dir("preds_nan");
    let path = dir.join("prediction.csv");
    write_file(&path, "abc\n");
    assert!(matches!(
        read_predictions(&path),
        Err(InputError::Parse { .. })
    ));
}

#[test]
fn test_gzip_predictions() {
    let dir = make_temp_dir("preds_gz");
    let path = dir.join("prediction.csv.gz");
    let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    enc.write_all(b"0.1\n0.9\n").unwrap();
    enc.finish().unwrap();
    assert_eq!(read_predictions(&path).unwrap(), vec![0.1, 0.9]);
}

#[test]
fn test_range_violation_not_clamped() {
    let err = validate_vectors("m", &[0, 1, 1], &[0.2, 1.5, 0.3]).unwrap_err();
    match err {
        InputError::RangeViolation { line, value, .. } => {
            assert_eq!(line, 2);
            assert_eq!(value, 1.5);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(
        validate_vectors("m", &[0, 1], &[-0.01, 0.3]),
        Err(InputError::RangeViolation { line: 1, .. })
    ));
    assert!(matches!(
        validate_vectors("m", &[0, 1], &[0.5, f64::NAN]),
        Err(InputError::RangeViolation { line: 2, .. })
    ));
    assert!(validate_vectors("m", &[0, 1], &[0.0, 1.0]).is_ok());
}

#[test]
fn test_range_violation_reports_file_line() {
    let dir = make_temp_dir("preds_range_line");
    let path = dir.join("prediction.csv");
    write_file(&path, "0.1\n\n# comment\n0.4\n1.5\n");
    let err = read_predictions(&path).unwrap_err();
    match &err {
        InputError::RangeViolation { line, value, .. } => {
            assert_eq!(*line, 5);
            assert_eq!(*value, 1.5);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(err.to_string().ends_with("prediction 1.5 at line 5 is outside [0, 1]"));
}

#[test]
fn test_length_mismatch() {
    assert!(matches!(
        validate_vectors("m", &[0, 1, 1], &[0.2, 0.3]),
        Err(InputError::LengthMismatch {
            labels: 3,
            predictions: 2,
            ..
        })
    ));
}

#[test]
fn test_manifest_order_drives_concatenation() {
    let base = make_temp_dir("manifest_order");
    write_model_type(
        &base,
        "tabddpm_black_box",
        "dev",
        &[
            ("tabddpm_1", &[0, 1], &[0.1, 0.9]),
            ("tabddpm_2", &[1, 0], &[0.8, 0.3]),
        ],
    );
    write_manifest(
        &base,
        "tabddpm",
        &[
            ("dev_black_box", &["tabddpm_2", "tabddpm_1"]),
            ("final_black_box", &[]),
        ],
    );

    let layout = InputLayout::from_base(&base);
    let profile = TrackProfile::single_table_v1();
    let plan = plan_model_type(&layout, &profile, "tabddpm_black_box", "dev").unwrap();
    assert_eq!(plan[0].model_id, "tabddpm_2");
    let set = load_challenge_set("tabddpm_black_box", &plan).unwrap();
    assert_eq!(set.model_ids, vec!["tabddpm_2", "tabddpm_1"]);
    assert_eq!(set.labels, vec![1, 0, 0, 1]);
    assert_eq!(set.predictions, vec![0.8, 0.3, 0.1, 0.9]);
}

#[test]
fn test_directory_order_sorted() {
    let base = make_temp_dir("dir_order");
    write_model_type(
        &base,
        "clavaddpm_black_box",
        "eval",
        &[
            ("clavaddpm_b", &[1], &[0.7]),
            ("clavaddpm_a", &[0], &[0.2]),
        ],
    );
    let layout = InputLayout::from_base(&base);
    let plan = plan_model_type(&layout, &directory_profile(), "clavaddpm_black_box", "eval").unwrap();
    let ids = plan.iter().map(|p| p.model_id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["clavaddpm_a", "clavaddpm_b"]);
}

#[test]
fn test_missing_manifest() {
    let base = make_temp_dir("no_manifest");
    write_model_type(&base, "tabsyn_black_box", "dev", &[("tabsyn_1", &[0, 1], &[0.1, 0.9])]);
    let layout = InputLayout::from_base(&base);
    let err = plan_model_type(&layout, &TrackProfile::single_table_v1(), "tabsyn_black_box", "dev")
        .unwrap_err();
    match err {
        InputError::MissingManifest(path) => {
            assert!(path.ends_with("ref/tabsyn_mapping_final.json"))
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_manifest_without_partition() {
    let base = make_temp_dir("manifest_key");
    write_model_type(&base, "tabsyn_black_box", "dev", &[("tabsyn_1", &[0, 1], &[0.1, 0.9])]);
    write_manifest(&base, "tabsyn", &[("eval_black_box", &["tabsyn_1"])]);
    let layout = InputLayout::from_base(&base);
    let err = plan_model_type(&layout, &TrackProfile::single_table_v1(), "tabsyn_black_box", "dev")
        .unwrap_err();
    match err {
        InputError::ManifestPartitionMissing { key, available, .. } => {
            assert_eq!(key, "dev_black_box");
            assert_eq!(available, "eval_black_box");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_missing_paths_reported_before_reading() {
    let base = make_temp_dir("missing_paths");
    write_model_type(&base, "tabsyn_black_box", "dev", &[("tabsyn_1", &[0, 1], &[0.1, 0.9])]);
    let layout = InputLayout::from_base(&base);
    let profile = TrackProfile::single_table_v1();

    write_manifest(&base, "tabsyn", &[("dev_black_box", &["tabsyn_1", "tabsyn_2"])]);
    assert!(matches!(
        plan_model_type(&layout, &profile, "tabsyn_black_box", "dev"),
        Err(InputError::MissingModelDirectory(_))
    ));

    let ref_dir = base.join("ref/tabsyn_black_box/dev/tabsyn_2");
    let res_dir = base.join("res/tabsyn_black_box/dev/tabsyn_2");
    std::fs::create_dir_all(&ref_dir).unwrap();
    std::fs::create_dir_all(&res_dir).unwrap();
    assert!(matches!(
        plan_model_type(&layout, &profile, "tabsyn_black_box", "dev"),
        Err(InputError::MissingLabelFile(_))
    ));

    write_file(&ref_dir.join("challenge_label.csv"), "is_train\n1\n");
    assert!(matches!(
        plan_model_type(&layout, &profile, "tabsyn_black_box", "dev"),
        Err(InputError::MissingPredictionFile(_))
    ));

    assert!(matches!(
        plan_model_type(&layout, &profile, "tabsyn_black_box", "final"),
        Err(InputError::MissingModelDirectory(_))
    ));
}

#[test]
fn test_unsafe_model_id_rejected() {
    let base = make_temp_dir("bad_id");
    write_model_type(&base, "tabsyn_black_box", "dev", &[("tabsyn_1", &[0, 1], &[0.1, 0.9])]);
    write_manifest(&base, "tabsyn", &[("dev_black_box", &["../tabsyn_1"])]);
    let layout = InputLayout::from_base(&base);
    assert!(matches!(
        plan_model_type(&layout, &TrackProfile::single_table_v1(), "tabsyn_black_box", "dev"),
        Err(InputError::Parse { .. })
    ));
}

#[test]
fn test_per_model_length_mismatch() {
    let base = make_temp_dir("model_len");
    write_model_type(
        &base,
        "tabsyn_black_box",
        "dev",
        &[("tabsyn_1", &[0, 1, 1], &[0.1, 0.9])],
    );
    let layout = InputLayout::from_base(&base);
    let plan = plan_model_type(&layout, &directory_profile(), "tabsyn_black_box", "dev").unwrap();
    let err = load_challenge_set("tabsyn_black_box", &plan).unwrap_err();
    match err {
        InputError::LengthMismatch { context, .. } => assert!(context.ends_with("prediction.csv")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_track_profile_from_json() {
    let dir = make_temp_dir("profile");
    let path = dir.join("track.json");
    write_file(
        &path,
        r#"{"name": "round2", "model_types": ["tabsyn_black_box"], "model_order": "directory"}"#,
    );
    let profile = load_track_profile(&path).unwrap();
    assert_eq!(profile.name, "round2");
    assert_eq!(profile.model_order, ModelOrder::Directory);
    assert_eq!(profile.max_fpr, 0.1);
    assert!(profile.drop_intermediate);
    assert!(!profile.detailed);
    assert_eq!(profile.manifest_key("final"), "final_black_box");

    write_file(
        &path,
        r#"{"name": "bad", "model_types": ["tabsyn_black_box"], "max_fpr": 0}"#,
    );
    assert!(matches!(
        load_track_profile(&path),
        Err(InputError::InvalidProfile { .. })
    ));
}

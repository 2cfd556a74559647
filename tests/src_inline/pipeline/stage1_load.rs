use super::*;
use crate::fixtures::{make_temp_dir, write_manifest, write_model_type};
use crate::input::InputError;

#[test]
fn test_loads_only_submitted_model_types() {
    let base = make_temp_dir("stage1");
    write_model_type(&base, "tabddpm_black_box", "dev", &[("tabddpm_1", &[0, 1], &[0.3, 0.6])]);
    write_manifest(&base, "tabddpm", &[("dev_black_box", &["tabddpm_1"])]);
    // Ground truth for tabsyn exists but the submission has no tabsyn folder.
    std::fs::create_dir_all(base.join("ref/tabsyn_black_box/dev")).unwrap();

    let layout = InputLayout::from_base(&base);
    let out = run_stage1(&layout, &TrackProfile::single_table_v1(), "dev").unwrap();
    assert_eq!(out.sets.len(), 1);
    assert_eq!(out.sets[0].model_type, "tabddpm_black_box");
    assert_eq!(out.skipped, vec!["tabsyn_black_box".to_string()]);
}

#[test]
fn test_empty_submission_yields_no_sets() {
    let base = make_temp_dir("stage1_empty");
    std::fs::create_dir_all(base.join("res")).unwrap();
    let layout = InputLayout::from_base(&base);
    let out = run_stage1(&layout, &TrackProfile::single_table_v1(), "dev").unwrap();
    assert!(out.sets.is_empty());
    assert_eq!(out.skipped.len(), 2);
}

#[test]
fn test_broken_submission_fails_hard() {
    let base = make_temp_dir("stage1_broken");
    write_model_type(&base, "tabddpm_black_box", "dev", &[("tabddpm_1", &[0, 1], &[0.3, 2.0])]);
    write_manifest(&base, "tabddpm", &[("dev_black_box", &["tabddpm_1"])]);
    let layout = InputLayout::from_base(&base);
    let err = run_stage1(&layout, &TrackProfile::single_table_v1(), "dev").unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Input(InputError::RangeViolation { .. })
    ));
}

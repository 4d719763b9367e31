//! Config domain: tests for tuning parsing and validation.

use super::{MovementTuning, checked_tuning, parse_tuning, validate_tuning};

const SHIPPED_TUNING: &str = include_str!("../../assets/config/tuning.ron");

#[test]
fn test_shipped_tuning_matches_defaults() {
    let tuning = parse_tuning("tuning.ron", SHIPPED_TUNING).expect("shipped tuning parses");
    assert_eq!(tuning, MovementTuning::default());
}

#[test]
fn test_defaults_are_valid() {
    assert!(validate_tuning(&MovementTuning::default()).is_empty());
}

#[test]
fn test_partial_file_fills_defaults() {
    let tuning = parse_tuning("partial", "(grapple: (swing_speed: 12.5))").expect("parses");
    assert_eq!(tuning.grapple.swing_speed, 12.5);
    assert_eq!(tuning.grapple.max_distance, 10.0);
    assert_eq!(tuning.dash, MovementTuning::default().dash);
}

#[test]
fn test_parse_error_names_source() {
    let err = parse_tuning("broken.ron", "(body: (width: ))").unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().starts_with("Failed to load broken.ron"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = super::load_tuning(std::path::Path::new("does/not/exist.ron")).unwrap_err();
    assert!(err.message.starts_with("IO error"));
}

#[test]
fn test_degenerate_ray_counts_rejected() {
    let mut tuning = MovementTuning::default();
    tuning.body.horizontal_rays = 1;
    tuning.body.vertical_rays = 0;

    let errors = validate_tuning(&tuning);
    let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
    assert!(fields.contains(&"body.horizontal_rays"));
    assert!(fields.contains(&"body.vertical_rays"));
}

#[test]
fn test_inset_wider_than_box_rejected() {
    let mut tuning = MovementTuning::default();
    tuning.body.ray_inset = 1.5;
    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "body.ray_inset");
}

#[test]
fn test_slow_factor_out_of_range_rejected() {
    let mut tuning = MovementTuning::default();
    tuning.slow_motion.factor = 0.0;
    assert_eq!(validate_tuning(&tuning)[0].field, "slow_motion.factor");

    tuning.slow_motion.factor = 1.5;
    assert_eq!(validate_tuning(&tuning)[0].field, "slow_motion.factor");
}

#[test]
fn test_upward_gravity_rejected() {
    let mut tuning = MovementTuning::default();
    tuning.motor.gravity = 9.8;
    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("motor.gravity"));
}

#[test]
fn test_invalid_tuning_falls_back_to_defaults() {
    let tuning = parse_tuning(
        "bad.ron",
        "(simulation: (tick_rate: 0.0), body: (horizontal_rays: 1))",
    )
    .expect("parses");
    assert!(!validate_tuning(&tuning).is_empty());
    assert_eq!(checked_tuning(tuning), MovementTuning::default());
}

#[test]
fn test_valid_tuning_is_kept() {
    let mut tuning = MovementTuning::default();
    tuning.grapple.swing_speed = 12.5;
    assert_eq!(checked_tuning(tuning.clone()), tuning);
}

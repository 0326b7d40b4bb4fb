// ABOUTME: Tests for coach and form analysis configuration loading and validation
// ABOUTME: Environment override tests run serially because they mutate process env vars
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use pierre_core::errors::ErrorCode;
use pierre_form_coach::config::{CoachConfig, ConfigError, FormAnalysisConfig};
use pierre_form_coach::logging::{LogFormat, LoggingConfig};
use pierre_form_coach::messages::Locale;
use serial_test::serial;

const COACH_KEYS: [&str; 7] = [
    "COACH_FEEDBACK_INTERVAL_MS",
    "COACH_CORRECTION_GRACE_MS",
    "COACH_HOLD_TICK_MS",
    "COACH_MILESTONE_ACK_MS",
    "COACH_HOLD_MILESTONES",
    "COACH_LOCALE",
    "COACH_START_MUTED",
];

const FORM_KEYS: [&str; 7] = [
    "FORM_EXTENDED_ANGLE",
    "FORM_FLEXED_ANGLE",
    "FORM_PLANK_ELBOW_MIN_ANGLE",
    "FORM_PLANK_HIP_HIGH_FACTOR",
    "FORM_PLANK_HIP_SAG_FACTOR",
    "FORM_PLANK_HEAD_RAISED_FACTOR",
    "FORM_PLANK_HEAD_DROPPED_FACTOR",
];

fn clear_env() {
    for key in COACH_KEYS.iter().chain(FORM_KEYS.iter()) {
        env::remove_var(key);
    }
}

#[test]
fn test_defaults() {
    let config = CoachConfig::default();

    assert_eq!(config.feedback.interval_ms, 1500);
    assert_eq!(config.feedback.correction_grace_ms, 3000);
    assert_eq!(config.hold.tick_interval_ms, 1000);
    assert_eq!(config.hold.milestone_ack_ms, 3000);
    assert_eq!(config.hold.milestones, vec![30]);
    assert_eq!(config.locale, Locale::En);
    assert!(!config.start_muted);
    assert!(config.validate().is_ok());

    let analysis = &config.analysis;
    assert!((analysis.repetition.extended_angle - 160.0).abs() < f64::EPSILON);
    assert!((analysis.repetition.flexed_angle - 90.0).abs() < f64::EPSILON);
    assert!((analysis.squat.knee_to_ankle_ratio - 1.3).abs() < f64::EPSILON);
    assert!((analysis.deadlift.lockout_angle - 170.0).abs() < f64::EPSILON);
    assert!((analysis.plank.elbow_min_angle - 80.0).abs() < f64::EPSILON);
    assert!((analysis.plank.elbow_max_angle - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_inverted_hysteresis_rejected() {
    let mut config = FormAnalysisConfig::default();
    config.repetition.flexed_angle = 170.0;

    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_angle_out_of_range_rejected() {
    let mut config = FormAnalysisConfig::default();
    config.deadlift.lockout_angle = 190.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    let mut config = FormAnalysisConfig::default();
    config.squat.spine_min_angle = f64::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_non_positive_ratio_rejected() {
    let mut config = FormAnalysisConfig::default();
    config.squat.knee_to_ankle_ratio = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_tick_and_zero_milestone_rejected() {
    let mut config = CoachConfig::default();
    config.hold.tick_interval_ms = 0;
    let error = config.validate().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);

    let mut config = CoachConfig::default();
    config.hold.milestones = vec![30, 0];
    assert!(config.validate().is_err());
}

#[test]
fn test_analysis_error_converts_to_app_error() {
    let mut config = CoachConfig::default();
    config.analysis.plank.elbow_min_angle = 120.0;

    let error = config.validate().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains("elbow_min_angle"));
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    env::set_var("COACH_FEEDBACK_INTERVAL_MS", "2000");
    env::set_var("COACH_HOLD_MILESTONES", "60, 30,90");
    env::set_var("COACH_LOCALE", "zh-CN");
    env::set_var("COACH_START_MUTED", "true");
    env::set_var("FORM_EXTENDED_ANGLE", "155");

    let config = CoachConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.feedback.interval_ms, 2000);
    assert_eq!(config.feedback.correction_grace_ms, 3000);
    assert_eq!(config.hold.milestones, vec![60, 30, 90]);
    assert_eq!(config.locale, Locale::ZhCn);
    assert!(config.start_muted);
    assert!((config.analysis.repetition.extended_angle - 155.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_plank_factors_overridable_from_env() {
    clear_env();
    env::set_var("FORM_PLANK_HIP_HIGH_FACTOR", "0.9");
    env::set_var("FORM_PLANK_HIP_SAG_FACTOR", "1.1");
    env::set_var("FORM_PLANK_HEAD_RAISED_FACTOR", "0.85");
    env::set_var("FORM_PLANK_HEAD_DROPPED_FACTOR", "1.15");

    let config = FormAnalysisConfig::from_environment().unwrap();
    clear_env();

    let plank = config.plank;
    assert!((plank.hip_high_factor - 0.9).abs() < f64::EPSILON);
    assert!((plank.hip_sag_factor - 1.1).abs() < f64::EPSILON);
    assert!((plank.head_raised_factor - 0.85).abs() < f64::EPSILON);
    assert!((plank.head_dropped_factor - 1.15).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_from_env_without_overrides_matches_defaults() {
    clear_env();
    let config = CoachConfig::from_env().unwrap();
    assert_eq!(config, CoachConfig::default());
}

#[test]
#[serial]
fn test_from_env_rejects_unparseable_values() {
    clear_env();
    env::set_var("COACH_HOLD_TICK_MS", "soon");
    let error = CoachConfig::from_env().unwrap_err();
    clear_env();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains("COACH_HOLD_TICK_MS"));

    env::set_var("COACH_HOLD_MILESTONES", "30,abc");
    assert!(CoachConfig::from_env().is_err());
    clear_env();

    env::set_var("COACH_LOCALE", "fr");
    assert!(CoachConfig::from_env().is_err());
    clear_env();

    env::set_var("FORM_FLEXED_ANGLE", "ninety");
    let error = CoachConfig::from_env().unwrap_err();
    clear_env();
    assert!(error.message.contains("FORM_FLEXED_ANGLE"));
}

#[test]
#[serial]
fn test_from_env_validates_result() {
    clear_env();
    env::set_var("FORM_FLEXED_ANGLE", "165");
    let result = CoachConfig::from_env();
    clear_env();
    assert!(result.is_err());
}

#[test]
fn test_locale_parsing() {
    assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
    assert_eq!("zh_CN".parse::<Locale>().unwrap(), Locale::ZhCn);
    assert_eq!("ZH-cn".parse::<Locale>().unwrap(), Locale::ZhCn);
    assert!("de".parse::<Locale>().is_err());
    assert_eq!(Locale::ZhCn.to_string(), "zh-CN");
}

#[test]
fn test_log_format_names() {
    assert_eq!(LogFormat::from_name("json"), LogFormat::Json);
    assert_eq!(LogFormat::from_name("COMPACT"), LogFormat::Compact);
    assert_eq!(LogFormat::from_name("anything"), LogFormat::Pretty);

    let config = LoggingConfig::default();
    assert_eq!(config.service_name, "pierre-form-coach");
    assert_eq!(config.format, LogFormat::Pretty);
}

// ABOUTME: Tests for per-exercise feature extraction from landmark frames
// ABOUTME: Verifies dominant angles, secondary distances, and behaviour with missing landmarks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    deadlift_frame, plank_frame, pushup_frame, squat_front_frame, squat_side_frame, PlankPose,
    PoseBuilder,
};
use pierre_core::constants::landmarks::{LEFT_HIP, LEFT_KNEE, NOSE, RIGHT_HIP};
use pierre_core::models::{Frame, Point};
use pierre_intelligence::features::{
    extract_deadlift, extract_plank, extract_pushup, extract_squat_front, extract_squat_side,
};

const EPS: f64 = 1e-6;

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("feature should be present");
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_squat_front_features() {
    let features = extract_squat_front(&squat_front_frame(120.0, 0.9));

    assert_close(features.dominant_angle, 120.0);
    assert_close(features.knee_distance, 0.18);
    assert_close(features.ankle_distance, 0.2);
    assert!(features.spine_angle.is_none());
    assert!(features.body_straightness.is_none());
}

#[test]
fn test_squat_side_features() {
    let features = extract_squat_side(&squat_side_frame(100.0, 95.0));

    assert_close(features.dominant_angle, 100.0);
    assert_close(features.spine_angle, 95.0);
    assert!(features.knee_distance.is_none());
}

#[test]
fn test_deadlift_features() {
    let features = extract_deadlift(&deadlift_frame(150.0, 0.08));

    assert_close(features.dominant_angle, 150.0);
    assert_close(features.spine_tilt, 0.08);
}

#[test]
fn test_pushup_features() {
    let features = extract_pushup(&pushup_frame(110.0, 0.12));

    assert_close(features.dominant_angle, 110.0);
    assert_close(features.body_straightness, 0.12);
}

#[test]
fn test_plank_features() {
    let features = extract_plank(&plank_frame(PlankPose {
        straightness: 0.03,
        elbow_degrees: 95.0,
        hip_factor: 1.02,
        nose_factor: 0.95,
    }));

    assert!(features.dominant_angle.is_none());
    assert_close(features.body_straightness, 0.03);
    assert_close(features.support_elbow_angle, 95.0);
    assert_close(features.mid_shoulder_y, 0.5);
    assert_close(features.mid_hip_y, 0.51);
    assert_close(features.nose_y, 0.475);
}

#[test]
fn test_empty_frame_yields_no_features() {
    let frame = Frame::empty();

    for features in [
        extract_squat_front(&frame),
        extract_squat_side(&frame),
        extract_deadlift(&frame),
        extract_pushup(&frame),
        extract_plank(&frame),
    ] {
        assert!(features.dominant_angle.is_none());
        assert!(features.knee_distance.is_none());
        assert!(features.spine_tilt.is_none());
        assert!(features.body_straightness.is_none());
        assert!(features.support_elbow_angle.is_none());
    }
}

#[test]
fn test_one_sided_knee_angle_uses_visible_side() {
    // Right leg fully missing: mean over the left side only
    let full = squat_front_frame(130.0, 1.5);
    let landmarks: Vec<Option<Point>> = full
        .landmarks()
        .iter()
        .enumerate()
        .map(|(index, slot)| if index % 2 == 0 { None } else { *slot })
        .collect();
    // Left-side landmarks have odd indices in the 33-point layout
    let frame = Frame::from_landmarks(landmarks).unwrap();

    let features = extract_squat_front(&frame);
    assert_close(features.dominant_angle, 130.0);
    assert!(features.knee_distance.is_none());
}

#[test]
fn test_deadlift_tilt_needs_nose_and_both_hips() {
    let frame = deadlift_frame(150.0, 0.08);
    let without_nose = Frame::from_landmarks(
        frame
            .landmarks()
            .iter()
            .enumerate()
            .map(|(index, slot)| if index == NOSE { None } else { *slot })
            .collect(),
    )
    .unwrap();
    assert!(extract_deadlift(&without_nose).spine_tilt.is_none());

    let one_hip = PoseBuilder::new()
        .set(NOSE, Point::new(0.5, 0.2))
        .set(LEFT_HIP, Point::new(0.5, 0.55))
        .set(LEFT_KNEE, Point::new(0.5, 0.75))
        .build();
    assert!(extract_deadlift(&one_hip).spine_tilt.is_none());

    let both_hips = PoseBuilder::new()
        .set(NOSE, Point::new(0.6, 0.2))
        .pair(LEFT_HIP, RIGHT_HIP, Point::new(0.4, 0.55))
        .build();
    assert_close(extract_deadlift(&both_hips).spine_tilt, 0.1);
}

#[test]
fn test_non_finite_landmark_is_treated_as_absent() {
    let frame = squat_side_frame(100.0, 95.0).with_landmark(LEFT_HIP, f64::NAN, 0.5);
    let features = extract_squat_side(&frame);

    assert!(features.spine_angle.is_none());
    // Right side still determines the knee angle
    assert_close(features.dominant_angle, 100.0);
}

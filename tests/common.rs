// ABOUTME: Shared test utilities and pose builders for integration tests
// ABOUTME: Places landmarks so joint angles and body-line deviations hit exact target values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::similar_names,
    clippy::suboptimal_flops
)]
//! Shared test utilities for `pierre_form_coach`
//!
//! Every builder produces a symmetric body: the left and right sides use the
//! same vertical coordinates, so bilateral means equal the target angle.

use pierre_core::constants::landmarks::{
    LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE, RIGHT_ANKLE,
    RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use pierre_core::models::{Frame, Point};
use pierre_form_coach::config::CoachConfig;
use serde_json::{json, Value};
use std::env;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Default configuration with logging initialized
pub fn test_config() -> CoachConfig {
    init_test_logging();
    CoachConfig::default()
}

/// Point at distance `length` from `vertex` such that the angle
/// `anchor - vertex - result` equals `degrees`
///
/// The ray toward `anchor` is rotated counter-clockwise on screen.
pub fn point_at_angle(vertex: Point, anchor: Point, degrees: f64, length: f64) -> Point {
    let dx = anchor.x - vertex.x;
    let dy = anchor.y - vertex.y;
    let norm = dx.hypot(dy);
    let (ux, uy) = (dx / norm, dy / norm);
    let (sin, cos) = (-degrees).to_radians().sin_cos();
    let rx = ux * cos - uy * sin;
    let ry = ux * sin + uy * cos;
    Point::new(vertex.x + rx * length, vertex.y + ry * length)
}

/// Point on the ray from `vertex` at `degrees` from `anchor`, where the ray
/// crosses height `target_y`
pub fn point_at_angle_on_row(vertex: Point, anchor: Point, degrees: f64, target_y: f64) -> Point {
    let unit = point_at_angle(vertex, anchor, degrees, 1.0);
    let (rx, ry) = (unit.x - vertex.x, unit.y - vertex.y);
    let t = (target_y - vertex.y) / ry;
    assert!(t > 0.0, "ray at {degrees} degrees never reaches y={target_y}");
    Point::new(vertex.x + rx * t, target_y)
}

/// Frame builder over the 33-point layout
#[derive(Debug, Clone, Default)]
pub struct PoseBuilder {
    frame: Frame,
}

impl PoseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, index: usize, point: Point) -> Self {
        self.frame = self.frame.with_landmark(index, point.x, point.y);
        self
    }

    /// Same point on both sides, mirrored around `x = 0.5`
    pub fn pair(self, left: usize, right: usize, point: Point) -> Self {
        self.set(left, point)
            .set(right, Point::new(1.0 - point.x, point.y))
    }

    pub fn build(self) -> Frame {
        self.frame
    }
}

/// Front-view squat with knee angle `knee_degrees` and knee spacing equal to
/// `knee_to_ankle` times the ankle spacing
pub fn squat_front_frame(knee_degrees: f64, knee_to_ankle: f64) -> Frame {
    let ankle_spacing = 0.2;
    let knee_spacing = ankle_spacing * knee_to_ankle;
    let left_ankle = Point::new(0.5 - ankle_spacing / 2.0, 0.9);
    let right_ankle = Point::new(0.5 + ankle_spacing / 2.0, 0.9);
    let left_knee = Point::new(0.5 - knee_spacing / 2.0, 0.7);
    let right_knee = Point::new(0.5 + knee_spacing / 2.0, 0.7);
    let left_hip = point_at_angle(left_knee, left_ankle, knee_degrees, 0.2);
    let right_hip = point_at_angle(right_knee, right_ankle, knee_degrees, 0.2);

    PoseBuilder::new()
        .set(LEFT_ANKLE, left_ankle)
        .set(RIGHT_ANKLE, right_ankle)
        .set(LEFT_KNEE, left_knee)
        .set(RIGHT_KNEE, right_knee)
        .set(LEFT_HIP, left_hip)
        .set(RIGHT_HIP, right_hip)
        .build()
}

/// Side-view squat with knee angle `knee_degrees` and shoulder-hip-knee
/// angle `spine_degrees`
pub fn squat_side_frame(knee_degrees: f64, spine_degrees: f64) -> Frame {
    let ankle = Point::new(0.5, 0.9);
    let knee = Point::new(0.5, 0.7);
    let hip = point_at_angle(knee, ankle, knee_degrees, 0.2);
    let shoulder = point_at_angle(hip, knee, spine_degrees, 0.3);

    PoseBuilder::new()
        .set(LEFT_ANKLE, ankle)
        .set(RIGHT_ANKLE, ankle)
        .set(LEFT_KNEE, knee)
        .set(RIGHT_KNEE, knee)
        .set(LEFT_HIP, hip)
        .set(RIGHT_HIP, hip)
        .set(LEFT_SHOULDER, shoulder)
        .set(RIGHT_SHOULDER, shoulder)
        .build()
}

/// Deadlift with shoulder-hip-knee angle `hip_degrees` and nose offset
/// `tilt` from the mid-hip horizontally
pub fn deadlift_frame(hip_degrees: f64, tilt: f64) -> Frame {
    let knee = Point::new(0.5, 0.75);
    let hip = Point::new(0.5, 0.55);
    let shoulder = point_at_angle(hip, knee, hip_degrees, 0.3);

    PoseBuilder::new()
        .set(LEFT_KNEE, knee)
        .set(RIGHT_KNEE, knee)
        .set(LEFT_HIP, hip)
        .set(RIGHT_HIP, hip)
        .set(LEFT_SHOULDER, shoulder)
        .set(RIGHT_SHOULDER, shoulder)
        .set(NOSE, Point::new(0.5 + tilt, 0.2))
        .build()
}

/// Push-up with elbow angle `elbow_degrees` and body line deviation
/// `straightness`
pub fn pushup_frame(elbow_degrees: f64, straightness: f64) -> Frame {
    let wrist = Point::new(0.3, 0.8);
    let elbow = Point::new(0.3, 0.65);
    let shoulder = point_at_angle(elbow, wrist, elbow_degrees, 0.15);
    let hip = Point::new(0.55, shoulder.y + 0.05);
    let ankle = Point::new(0.8, hip.y + 0.05 + straightness);

    PoseBuilder::new()
        .set(LEFT_WRIST, wrist)
        .set(RIGHT_WRIST, wrist)
        .set(LEFT_ELBOW, elbow)
        .set(RIGHT_ELBOW, elbow)
        .set(LEFT_SHOULDER, shoulder)
        .set(RIGHT_SHOULDER, shoulder)
        .set(LEFT_HIP, hip)
        .set(RIGHT_HIP, hip)
        .set(LEFT_ANKLE, ankle)
        .set(RIGHT_ANKLE, ankle)
        .build()
}

/// Plank pose parameters
#[derive(Debug, Clone, Copy)]
pub struct PlankPose {
    /// Body line deviation over shoulders, hips and knees
    pub straightness: f64,
    /// Shoulder-elbow-hip angle (valid up to about 130 degrees)
    pub elbow_degrees: f64,
    /// Mid-hip height as a multiple of mid-shoulder height
    pub hip_factor: f64,
    /// Nose height as a multiple of mid-shoulder height
    pub nose_factor: f64,
}

impl Default for PlankPose {
    fn default() -> Self {
        Self {
            straightness: 0.01,
            elbow_degrees: 90.0,
            hip_factor: 1.0,
            nose_factor: 1.0,
        }
    }
}

pub const PLANK_SHOULDER_Y: f64 = 0.5;

/// Plank frame matching `pose`
pub fn plank_frame(pose: PlankPose) -> Frame {
    let elbow = Point::new(0.3, 0.8);
    let hip = Point::new(0.7, PLANK_SHOULDER_Y * pose.hip_factor);
    let shoulder = point_at_angle_on_row(elbow, hip, pose.elbow_degrees, PLANK_SHOULDER_Y);
    let knee_y = 2.0 * hip.y - shoulder.y + pose.straightness;
    let knee = Point::new(0.9, knee_y);
    let nose = Point::new(0.1, PLANK_SHOULDER_Y * pose.nose_factor);

    PoseBuilder::new()
        .set(LEFT_ELBOW, elbow)
        .set(RIGHT_ELBOW, elbow)
        .set(LEFT_SHOULDER, shoulder)
        .set(RIGHT_SHOULDER, shoulder)
        .set(LEFT_HIP, hip)
        .set(RIGHT_HIP, hip)
        .set(LEFT_KNEE, knee)
        .set(RIGHT_KNEE, knee)
        .set(NOSE, nose)
        .build()
}

/// Serialize a frame into one replay line
pub fn frame_line(t_ms: u64, frame: &Frame) -> String {
    let landmarks: Vec<Value> = frame
        .landmarks()
        .iter()
        .map(|slot| slot.map_or(Value::Null, |p| json!([p.x, p.y])))
        .collect();
    json!({ "t_ms": t_ms, "landmarks": landmarks }).to_string()
}

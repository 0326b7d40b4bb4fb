// ABOUTME: Benchmark fixtures generating synthetic landmark frames for each exercise
// ABOUTME: Produces deterministic rep cycles so every run measures the same workload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Deterministic frame generators.
//!
//! A rep cycle sweeps the joint angle from 170 down to 80 degrees and back,
//! which crosses both hysteresis thresholds once per cycle.

use pierre_core::constants::landmarks::{
    LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE, RIGHT_ANKLE,
    RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use pierre_core::models::{Frame, Point};

/// Frames per simulated rep
pub const FRAMES_PER_REP: usize = 30;

/// Predefined recording lengths
#[derive(Debug, Clone, Copy)]
pub enum RecordingLength {
    /// One rep cycle
    Single,
    /// Ten rep cycles (about ten seconds at 30 fps)
    Set,
}

impl RecordingLength {
    #[must_use]
    pub const fn reps(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Set => 10,
        }
    }
}

/// Joint angle at `step` of a rep, in degrees
#[allow(clippy::cast_precision_loss)]
fn cycle_angle(step: usize) -> f64 {
    let half = FRAMES_PER_REP / 2;
    let depth = if step < half { step } else { FRAMES_PER_REP - step };
    170.0 - 90.0 * depth as f64 / half as f64
}

/// End of a limb of `length` leaving `vertex` at `degrees` from the ray toward `anchor`
fn limb(vertex: Point, anchor: Point, degrees: f64, length: f64) -> Point {
    let (dx, dy) = (anchor.x - vertex.x, anchor.y - vertex.y);
    let norm = dx.hypot(dy);
    let (sin, cos) = (-degrees).to_radians().sin_cos();
    let rx = dx.mul_add(cos, -(dy * sin)) / norm;
    let ry = dx.mul_add(sin, dy * cos) / norm;
    Point::new(rx.mul_add(length, vertex.x), ry.mul_add(length, vertex.y))
}

fn both(frame: Frame, left: usize, right: usize, point: Point) -> Frame {
    frame
        .with_landmark(left, point.x, point.y)
        .with_landmark(right, point.x, point.y)
}

/// A full-body frame whose joints all bend to `degrees`
#[must_use]
pub fn posed_frame(degrees: f64) -> Frame {
    let ankle = Point::new(0.5, 0.9);
    let knee = Point::new(0.48, 0.7);
    let hip = limb(knee, ankle, degrees, 0.2);
    let shoulder = limb(hip, knee, degrees, 0.3);
    let wrist = Point::new(0.3, 0.85);
    let elbow = Point::new(0.3, 0.7);

    let frame = both(Frame::empty(), LEFT_ANKLE, RIGHT_ANKLE, ankle);
    let frame = both(frame, LEFT_KNEE, RIGHT_KNEE, knee);
    let frame = both(frame, LEFT_HIP, RIGHT_HIP, hip);
    let frame = both(frame, LEFT_SHOULDER, RIGHT_SHOULDER, shoulder);
    let frame = both(frame, LEFT_ELBOW, RIGHT_ELBOW, elbow);
    let frame = both(frame, LEFT_WRIST, RIGHT_WRIST, wrist);
    frame.with_landmark(NOSE, shoulder.x, shoulder.y - 0.1)
}

/// Frames for `length` rep cycles
///
/// The same full-body pose drives every extractor.
#[must_use]
pub fn generate_recording(length: RecordingLength) -> Vec<Frame> {
    (0..length.reps() * FRAMES_PER_REP)
        .map(|index| posed_frame(cycle_angle(index % FRAMES_PER_REP)))
        .collect()
}

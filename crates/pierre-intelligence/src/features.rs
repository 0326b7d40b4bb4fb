// ABOUTME: Per-exercise feature extraction from a single landmark frame
// ABOUTME: Derives the dominant joint angle and the secondary distances the posture rules need
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::landmarks::{
    LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE, RIGHT_ANKLE,
    RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use pierre_core::models::{Frame, Point};
use serde::{Deserialize, Serialize};

use crate::geometry::{angle, determined, distance, mean_determined, midpoint};

/// Geometric features of one frame
///
/// Every field is optional: a feature that needs an absent landmark is `None`
/// and any rule reading it is skipped for that frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameFeatures {
    /// Angle driving the repetition state machine (degrees)
    pub dominant_angle: Option<f64>,
    /// Knee-to-knee distance (front squat)
    pub knee_distance: Option<f64>,
    /// Ankle-to-ankle distance (front squat)
    pub ankle_distance: Option<f64>,
    /// Left shoulder-hip-knee angle (side squat)
    pub spine_angle: Option<f64>,
    /// Horizontal offset between nose and mid-hip (deadlift)
    pub spine_tilt: Option<f64>,
    /// Difference between upper and lower body segment heights (push-up, plank)
    pub body_straightness: Option<f64>,
    /// Mean shoulder-elbow-hip angle (plank)
    pub support_elbow_angle: Option<f64>,
    /// Nose height (plank)
    pub nose_y: Option<f64>,
    /// Mid-shoulder height (plank)
    pub mid_shoulder_y: Option<f64>,
    /// Mid-hip height (plank)
    pub mid_hip_y: Option<f64>,
}

/// Bilateral landmarks of one body, looked up once per frame
struct Skeleton {
    nose: Option<Point>,
    shoulders: (Option<Point>, Option<Point>),
    elbows: (Option<Point>, Option<Point>),
    wrists: (Option<Point>, Option<Point>),
    hips: (Option<Point>, Option<Point>),
    knees: (Option<Point>, Option<Point>),
    ankles: (Option<Point>, Option<Point>),
}

impl Skeleton {
    fn from_frame(frame: &Frame) -> Self {
        let pair = |left, right| (frame.landmark(left), frame.landmark(right));
        Self {
            nose: frame.landmark(NOSE),
            shoulders: pair(LEFT_SHOULDER, RIGHT_SHOULDER),
            elbows: pair(LEFT_ELBOW, RIGHT_ELBOW),
            wrists: pair(LEFT_WRIST, RIGHT_WRIST),
            hips: pair(LEFT_HIP, RIGHT_HIP),
            knees: pair(LEFT_KNEE, RIGHT_KNEE),
            ankles: pair(LEFT_ANKLE, RIGHT_ANKLE),
        }
    }

    fn mid(pair: (Option<Point>, Option<Point>)) -> Option<Point> {
        midpoint(pair.0, pair.1)
    }

    /// Mean of the left and right hip-knee-ankle angles
    fn knee_angle(&self) -> Option<f64> {
        mean_determined(&[
            angle(self.hips.0, self.knees.0, self.ankles.0),
            angle(self.hips.1, self.knees.1, self.ankles.1),
        ])
    }

    /// Mean of the left and right shoulder-hip-knee angles
    fn hip_angle(&self) -> Option<f64> {
        mean_determined(&[
            angle(self.shoulders.0, self.hips.0, self.knees.0),
            angle(self.shoulders.1, self.hips.1, self.knees.1),
        ])
    }

    /// Mean of the left and right shoulder-elbow-wrist angles
    fn elbow_angle(&self) -> Option<f64> {
        mean_determined(&[
            angle(self.shoulders.0, self.elbows.0, self.wrists.0),
            angle(self.shoulders.1, self.elbows.1, self.wrists.1),
        ])
    }

    /// `|(hip - shoulder) - (lower - hip)|` over mid-point heights
    fn straightness(&self, lower: (Option<Point>, Option<Point>)) -> Option<f64> {
        let shoulder = Self::mid(self.shoulders)?;
        let hip = Self::mid(self.hips)?;
        let lower = Self::mid(lower)?;
        Some(((hip.y - shoulder.y) - (lower.y - hip.y)).abs())
    }
}

fn pair_distance(pair: (Option<Point>, Option<Point>)) -> Option<f64> {
    Some(distance(pair.0?, pair.1?))
}

/// Front-view squat: knee angle plus knee and ankle spacing
#[must_use]
pub fn extract_squat_front(frame: &Frame) -> FrameFeatures {
    let skeleton = Skeleton::from_frame(frame);
    FrameFeatures {
        dominant_angle: skeleton.knee_angle(),
        knee_distance: pair_distance(skeleton.knees),
        ankle_distance: pair_distance(skeleton.ankles),
        ..FrameFeatures::default()
    }
}

/// Side-view squat: knee angle plus left-side spine angle
#[must_use]
pub fn extract_squat_side(frame: &Frame) -> FrameFeatures {
    let skeleton = Skeleton::from_frame(frame);
    FrameFeatures {
        dominant_angle: skeleton.knee_angle(),
        spine_angle: determined(angle(
            skeleton.shoulders.0,
            skeleton.hips.0,
            skeleton.knees.0,
        )),
        ..FrameFeatures::default()
    }
}

/// Deadlift: hip angle plus nose to mid-hip horizontal offset
#[must_use]
pub fn extract_deadlift(frame: &Frame) -> FrameFeatures {
    let skeleton = Skeleton::from_frame(frame);
    let spine_tilt = match (skeleton.nose, Skeleton::mid(skeleton.hips)) {
        (Some(nose), Some(hip)) => Some((nose.x - hip.x).abs()),
        _ => None,
    };
    FrameFeatures {
        dominant_angle: skeleton.hip_angle(),
        spine_tilt,
        ..FrameFeatures::default()
    }
}

/// Push-up: elbow angle plus shoulder-hip-ankle straightness
#[must_use]
pub fn extract_pushup(frame: &Frame) -> FrameFeatures {
    let skeleton = Skeleton::from_frame(frame);
    FrameFeatures {
        dominant_angle: skeleton.elbow_angle(),
        body_straightness: skeleton.straightness(skeleton.ankles),
        ..FrameFeatures::default()
    }
}

/// Plank: shoulder-hip-knee straightness, support elbow angle and head height
#[must_use]
pub fn extract_plank(frame: &Frame) -> FrameFeatures {
    let skeleton = Skeleton::from_frame(frame);
    FrameFeatures {
        dominant_angle: None,
        body_straightness: skeleton.straightness(skeleton.knees),
        support_elbow_angle: mean_determined(&[
            angle(skeleton.shoulders.0, skeleton.elbows.0, skeleton.hips.0),
            angle(skeleton.shoulders.1, skeleton.elbows.1, skeleton.hips.1),
        ]),
        nose_y: skeleton.nose.map(|nose| nose.y),
        mid_shoulder_y: Skeleton::mid(skeleton.shoulders).map(|point| point.y),
        mid_hip_y: Skeleton::mid(skeleton.hips).map(|point| point.y),
        ..FrameFeatures::default()
    }
}

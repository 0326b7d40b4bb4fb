// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Landmark indices, repetition thresholds, posture thresholds, and feedback timing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Thresholds here were tuned empirically against normalized-frame units
//! (`0..1` across the camera image), not physical units. They are exact
//! behavioural contracts: changing one changes when reps are counted and
//! when corrections fire.

/// Indices into the 33-point body landmark layout produced by the pose detector
pub mod landmarks {
    /// Number of landmarks in every frame
    pub const LANDMARK_COUNT: usize = 33;

    /// Nose tip
    pub const NOSE: usize = 0;
    /// Left shoulder
    pub const LEFT_SHOULDER: usize = 11;
    /// Right shoulder
    pub const RIGHT_SHOULDER: usize = 12;
    /// Left elbow
    pub const LEFT_ELBOW: usize = 13;
    /// Right elbow
    pub const RIGHT_ELBOW: usize = 14;
    /// Left wrist
    pub const LEFT_WRIST: usize = 15;
    /// Right wrist
    pub const RIGHT_WRIST: usize = 16;
    /// Left hip
    pub const LEFT_HIP: usize = 23;
    /// Right hip
    pub const RIGHT_HIP: usize = 24;
    /// Left knee
    pub const LEFT_KNEE: usize = 25;
    /// Right knee
    pub const RIGHT_KNEE: usize = 26;
    /// Left ankle
    pub const LEFT_ANKLE: usize = 27;
    /// Right ankle
    pub const RIGHT_ANKLE: usize = 28;
}

/// Repetition state machine thresholds (degrees)
///
/// The gap between the two values is a hysteresis band: angle jitter inside
/// it never triggers a transition.
pub mod repetition {
    /// Dominant angle above which the joint counts as extended
    pub const EXTENDED_ANGLE_DEGREES: f64 = 160.0;

    /// Dominant angle below which the joint counts as flexed
    pub const FLEXED_ANGLE_DEGREES: f64 = 90.0;
}

/// Posture correction thresholds per exercise
pub mod posture {
    /// Knees caving in when knee spacing drops below this multiple of ankle spacing
    pub const SQUAT_KNEE_TO_ANKLE_RATIO: f64 = 1.3;

    /// Minimum shoulder-hip-knee angle for a straight back in a side-view squat
    pub const SQUAT_SPINE_MIN_DEGREES: f64 = 110.0;

    /// Maximum horizontal nose to mid-hip offset for a neutral deadlift spine
    pub const DEADLIFT_SPINE_TILT_MAX: f64 = 0.05;

    /// Hip angle above which the deadlift lockout counts as locked knees
    pub const DEADLIFT_LOCKOUT_DEGREES: f64 = 170.0;

    /// Maximum push-up body straightness deviation
    pub const PUSHUP_STRAIGHTNESS_MAX: f64 = 0.1;

    /// Elbow angle below which push-up elbows are flaring
    pub const PUSHUP_ELBOW_FLARE_DEGREES: f64 = 70.0;

    /// Maximum plank body straightness deviation for good form
    pub const PLANK_STRAIGHTNESS_MAX: f64 = 0.05;

    /// Lower bound of the acceptable plank elbow angle
    pub const PLANK_ELBOW_MIN_DEGREES: f64 = 80.0;

    /// Upper bound of the acceptable plank elbow angle
    pub const PLANK_ELBOW_MAX_DEGREES: f64 = 100.0;

    /// Hips too high when mid-hip y is below this fraction of mid-shoulder y
    pub const PLANK_HIP_HIGH_FACTOR: f64 = 0.95;

    /// Hips sagging when mid-hip y is above this fraction of mid-shoulder y
    pub const PLANK_HIP_SAG_FACTOR: f64 = 1.05;

    /// Head raised when nose y is below this fraction of mid-shoulder y
    pub const PLANK_HEAD_RAISED_FACTOR: f64 = 0.9;

    /// Head dropped when nose y is above this fraction of mid-shoulder y
    pub const PLANK_HEAD_DROPPED_FACTOR: f64 = 1.1;
}

/// Voice feedback gate timing
pub mod feedback {
    /// Minimum spacing between two voiced messages (milliseconds, strict)
    pub const FEEDBACK_INTERVAL_MS: u64 = 1500;

    /// Grace period after session start during which only info is voiced
    pub const CORRECTION_GRACE_MS: u64 = 3000;
}

/// Isometric hold timer timing
pub mod hold {
    /// Nominal tick period of the hold timer
    pub const TICK_INTERVAL_MS: u64 = 1000;

    /// Elapsed seconds at which the celebratory milestone fires
    pub const MILESTONE_SECONDS: u64 = 30;

    /// Lifetime of the milestone acknowledgement before auto-dismiss
    pub const MILESTONE_ACK_MS: u64 = 3000;
}

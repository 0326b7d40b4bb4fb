// ABOUTME: Per-exercise posture correction rules over extracted frame features
// ABOUTME: Each rule is an independent threshold check yielding at most one typed cue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Posture rules
//!
//! Rules never influence the repetition state machine. A rule whose input
//! feature is absent is skipped for that frame.

use pierre_core::models::{RepState, Severity};
use serde::{Deserialize, Serialize};

use crate::config::FormAnalysisConfig;
use crate::features::FrameFeatures;

/// Posture verdicts the rules can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostureCue {
    /// Front squat: knees closer together than the ankles allow
    KneesCavingIn,
    /// Side squat: torso folding toward the thighs
    KeepBackStraight,
    /// Deadlift: head drifting away from the hips horizontally
    KeepSpineNeutral,
    /// Deadlift: hips hyperextended at lockout
    DontLockKnees,
    /// Push-up: hips sagging or piking
    KeepBodyStraight,
    /// Push-up: elbow angle too acute
    ElbowsFlaring,
    /// Plank: straight body with elbows under shoulders
    PlankGoodForm,
    /// Plank: hips above the shoulder line
    HipsTooHigh,
    /// Plank: hips below the shoulder line
    HipsSagging,
    /// Plank: support elbows outside the acceptable range
    ElbowsUnderShoulders,
    /// Plank: looking up
    HeadRaised,
    /// Plank: looking down
    HeadDropped,
}

impl PostureCue {
    /// Severity the cue is surfaced with
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::PlankGoodForm => Severity::Success,
            Self::KneesCavingIn
            | Self::KeepBackStraight
            | Self::KeepSpineNeutral
            | Self::DontLockKnees
            | Self::KeepBodyStraight
            | Self::ElbowsFlaring
            | Self::HipsTooHigh
            | Self::HipsSagging
            | Self::ElbowsUnderShoulders
            | Self::HeadRaised
            | Self::HeadDropped => Severity::Warning,
        }
    }
}

/// Inputs shared by every rule of one frame
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Features of the current frame
    pub features: &'a FrameFeatures,
    /// Machine state after this frame's step
    pub state: RepState,
    /// Active thresholds
    pub config: &'a FormAnalysisConfig,
}

/// A posture rule: a pure check returning at most one cue
pub type PostureRule = fn(&RuleContext<'_>) -> Option<PostureCue>;

/// Knee spacing below `ratio` times ankle spacing
#[must_use]
pub fn knees_caving_in(ctx: &RuleContext<'_>) -> Option<PostureCue> {
    let knees = ctx.features.knee_distance?;
    let ankles = ctx.features.ankle_distance?;
    (knees < ankles * ctx.config.squat.knee_to_ankle_ratio).then_some(PostureCue::KneesCavingIn)
}

/// Side-view spine angle below the minimum
#[must_use]
pub fn back_rounding(ctx: &RuleContext<'_>) -> Option<PostureCue> {
    let spine = ctx.features.spine_angle?;
    (spine < ctx.config.squat.spine_min_angle).then_some(PostureCue::KeepBackStraight)
}

/// Horizontal nose to hip offset above the maximum
#[must_use]
pub fn spine_tilt(ctx: &RuleContext<'_>) -> Option<PostureCue> {
    let tilt = ctx.features.spine_tilt?;
    (tilt > ctx.config.deadlift.spine_tilt_max).then_some(PostureCue::KeepSpineNeutral)
}

/// Hip angle past the lockout limit while standing up
#[must_use]
pub fn knee_lockout(ctx: &RuleContext<'_>) -> Option<PostureCue> {
    let hip_angle = ctx.features.dominant_angle?;
    (ctx.state == RepState::Up && hip_angle > ctx.config.deadlift.lockout_angle)
        .then_some(PostureCue::DontLockKnees)
}

/// Push-up body line deviation above the maximum
#[must_use]
pub fn body_line(ctx: &RuleContext<'_>) -> Option<PostureCue> {
    let straightness = ctx.features.body_straightness?;
    (straightness > ctx.config.pushup.straightness_max).then_some(PostureCue::KeepBodyStraight)
}

/// Push-up elbow angle below the flare limit
#[must_use]
pub fn elbow_flare(ctx: &RuleContext<'_>) -> Option<PostureCue> {
    let elbow = ctx.features.dominant_angle?;
    (elbow < ctx.config.pushup.elbow_flare_angle).then_some(PostureCue::ElbowsFlaring)
}

/// Plank body line: good form, else the first failing check
#[must_use]
pub fn plank_alignment(ctx: &RuleContext<'_>) -> Option<PostureCue> {
    let plank = &ctx.config.plank;
    let features = ctx.features;
    let elbow_in_range = features
        .support_elbow_angle
        .map(|elbow| (plank.elbow_min_angle..=plank.elbow_max_angle).contains(&elbow));

    if features
        .body_straightness
        .is_some_and(|straightness| straightness < plank.straightness_max)
        && elbow_in_range == Some(true)
    {
        return Some(PostureCue::PlankGoodForm);
    }

    if let (Some(hip), Some(shoulder)) = (features.mid_hip_y, features.mid_shoulder_y) {
        if hip < shoulder * plank.hip_high_factor {
            return Some(PostureCue::HipsTooHigh);
        }
        if hip > shoulder * plank.hip_sag_factor {
            return Some(PostureCue::HipsSagging);
        }
    }

    (elbow_in_range == Some(false)).then_some(PostureCue::ElbowsUnderShoulders)
}

/// Plank head height relative to the shoulders
#[must_use]
pub fn plank_head(ctx: &RuleContext<'_>) -> Option<PostureCue> {
    let plank = &ctx.config.plank;
    let nose = ctx.features.nose_y?;
    let shoulder = ctx.features.mid_shoulder_y?;
    if nose < shoulder * plank.head_raised_factor {
        Some(PostureCue::HeadRaised)
    } else if nose > shoulder * plank.head_dropped_factor {
        Some(PostureCue::HeadDropped)
    } else {
        None
    }
}

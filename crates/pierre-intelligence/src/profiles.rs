// ABOUTME: Closed strategy table binding each exercise kind to its analysis behaviour
// ABOUTME: A profile holds the feature extractor, tracking mode, and ordered posture rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{ExerciseKind, Frame, RepState, TrackingMode};

use crate::features::{
    extract_deadlift, extract_plank, extract_pushup, extract_squat_front, extract_squat_side,
    FrameFeatures,
};
use crate::posture_rules::{
    back_rounding, body_line, elbow_flare, knee_lockout, knees_caving_in, plank_alignment,
    plank_head, spine_tilt, PostureCue, PostureRule, RuleContext,
};

/// Analysis behaviour of one exercise
#[derive(Debug, Clone, Copy)]
pub struct ExerciseProfile {
    /// Exercise this profile analyzes
    pub kind: ExerciseKind,
    /// Repetition counting or hold timing
    pub mode: TrackingMode,
    /// Feature extractor
    pub extract: fn(&Frame) -> FrameFeatures,
    /// Rules in priority order
    pub rules: &'static [PostureRule],
}

static SQUAT_FRONT: ExerciseProfile = ExerciseProfile {
    kind: ExerciseKind::SquatFront,
    mode: TrackingMode::Repetition,
    extract: extract_squat_front,
    rules: &[knees_caving_in],
};

static SQUAT_SIDE: ExerciseProfile = ExerciseProfile {
    kind: ExerciseKind::SquatSide,
    mode: TrackingMode::Repetition,
    extract: extract_squat_side,
    rules: &[back_rounding],
};

static DEADLIFT: ExerciseProfile = ExerciseProfile {
    kind: ExerciseKind::Deadlift,
    mode: TrackingMode::Repetition,
    extract: extract_deadlift,
    rules: &[spine_tilt, knee_lockout],
};

static PUSHUP: ExerciseProfile = ExerciseProfile {
    kind: ExerciseKind::Pushup,
    mode: TrackingMode::Repetition,
    extract: extract_pushup,
    rules: &[body_line, elbow_flare],
};

static PLANK: ExerciseProfile = ExerciseProfile {
    kind: ExerciseKind::Plank,
    mode: TrackingMode::Hold,
    extract: extract_plank,
    rules: &[plank_alignment, plank_head],
};

/// Profile for `kind`
#[must_use]
pub fn profile(kind: ExerciseKind) -> &'static ExerciseProfile {
    match kind {
        ExerciseKind::SquatFront => &SQUAT_FRONT,
        ExerciseKind::SquatSide => &SQUAT_SIDE,
        ExerciseKind::Deadlift => &DEADLIFT,
        ExerciseKind::Pushup => &PUSHUP,
        ExerciseKind::Plank => &PLANK,
    }
}

impl ExerciseProfile {
    /// Whether corrections are surfaced in `state`
    ///
    /// Repetition exercises stay quiet while resting in `ready`; holds are
    /// always evaluated.
    #[must_use]
    pub fn surfaces_corrections(&self, state: RepState) -> bool {
        match self.mode {
            TrackingMode::Hold => true,
            TrackingMode::Repetition => state != RepState::Ready,
        }
    }

    /// Run every rule in order, collecting the cues that fire
    #[must_use]
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Vec<PostureCue> {
        if !self.surfaces_corrections(ctx.state) {
            return Vec::new();
        }
        self.rules.iter().filter_map(|rule| rule(ctx)).collect()
    }
}

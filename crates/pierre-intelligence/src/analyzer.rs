// ABOUTME: Per-frame form analyzer combining extraction, rep counting and posture rules
// ABOUTME: Owns the repetition state of one session and runs the fixed per-frame pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{ExerciseKind, Frame, RepState, TrackingMode};
use serde::Serialize;
use tracing::trace;

use crate::config::FormAnalysisConfig;
use crate::features::FrameFeatures;
use crate::posture_rules::{PostureCue, RuleContext};
use crate::profiles::{profile, ExerciseProfile};
use crate::rep_counter::{RepCounter, RepTransition};

/// Result of one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameAnalysis {
    /// Extracted features
    pub features: FrameFeatures,
    /// State machine transition, if any
    pub transition: Option<RepTransition>,
    /// Posture cues in rule priority order
    pub cues: Vec<PostureCue>,
    /// Machine state after the step
    pub state: RepState,
    /// Rep count after the step
    pub rep_count: u32,
}

/// Runs extraction, then the state machine, then posture rules for one exercise
#[derive(Debug, Clone)]
pub struct FormAnalyzer {
    profile: &'static ExerciseProfile,
    config: FormAnalysisConfig,
    counter: RepCounter,
}

impl FormAnalyzer {
    /// Create an analyzer for `kind` in `ready` with zero reps
    #[must_use]
    pub fn new(kind: ExerciseKind, config: FormAnalysisConfig) -> Self {
        Self {
            profile: profile(kind),
            counter: RepCounter::new(config.repetition),
            config,
        }
    }

    /// Exercise being analyzed
    #[must_use]
    pub const fn kind(&self) -> ExerciseKind {
        self.profile.kind
    }

    /// Tracking mode of the current exercise
    #[must_use]
    pub const fn mode(&self) -> TrackingMode {
        self.profile.mode
    }

    /// Current state machine position
    #[must_use]
    pub const fn state(&self) -> RepState {
        self.counter.state()
    }

    /// Reps counted since the last reset
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.counter.count()
    }

    /// Active thresholds
    #[must_use]
    pub const fn config(&self) -> &FormAnalysisConfig {
        &self.config
    }

    /// Switch exercise; always resets state and count
    pub fn set_kind(&mut self, kind: ExerciseKind) {
        self.profile = profile(kind);
        self.counter.reset();
    }

    /// Back to `ready` with zero reps
    pub fn reset(&mut self) {
        self.counter.reset();
    }

    /// Analyze one frame
    pub fn analyze(&mut self, frame: &Frame) -> FrameAnalysis {
        let features = (self.profile.extract)(frame);

        let transition = match (self.profile.mode, features.dominant_angle) {
            (TrackingMode::Repetition, Some(angle)) => self.counter.step(angle),
            _ => None,
        };

        let ctx = RuleContext {
            features: &features,
            state: self.counter.state(),
            config: &self.config,
        };
        let cues = self.profile.evaluate(&ctx);

        trace!(
            exercise = %self.profile.kind,
            dominant_angle = ?features.dominant_angle,
            cue_count = cues.len(),
            "frame analyzed"
        );

        FrameAnalysis {
            features,
            transition,
            cues,
            state: self.counter.state(),
            rep_count: self.counter.count(),
        }
    }
}

// ABOUTME: Exercise form analysis engine: geometry, features, rep counting and posture rules
// ABOUTME: Pure per-frame computation with no I/O, timers, or global state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Intelligence
//!
//! Turns one frame of 2-D body landmarks into:
//!
//! - a repetition state machine step driven by the exercise's dominant angle
//! - zero or more posture cues from the exercise's ordered rule list
//!
//! Per-exercise behaviour lives in the closed table in [`profiles`].

/// Per-frame pipeline owning the repetition state
pub mod analyzer;
/// Threshold configuration
pub mod config;
/// Per-exercise feature extraction
pub mod features;
/// Distance, angle and midpoint over landmarks
pub mod geometry;
/// Posture correction rules
pub mod posture_rules;
/// Exercise strategy table
pub mod profiles;
/// Repetition state machine
pub mod rep_counter;

pub use analyzer::{FormAnalyzer, FrameAnalysis};
pub use config::{ConfigError, FormAnalysisConfig};
pub use features::FrameFeatures;
pub use posture_rules::PostureCue;
pub use profiles::{profile, ExerciseProfile};
pub use rep_counter::{RepCounter, RepTransition};

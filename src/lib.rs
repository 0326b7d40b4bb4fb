// ABOUTME: Main library entry point for the Pierre exercise form coach
// ABOUTME: Session engine, voice gating, hold timer, async runtime, and frame replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Form Coach
//!
//! Classifies a live stream of body-landmark frames into exercise
//! repetitions and posture feedback for one user doing one of a fixed set of
//! strength exercises in front of a camera.
//!
//! ## Architecture
//!
//! - `pierre_core`: errors, thresholds, frame and exercise models
//! - `pierre_intelligence`: geometry, feature extraction, rep counting, posture rules
//! - this crate: the session engine turning verdicts into display and voice
//!   events, the hold timer, the async runtime, and replay tooling
//!
//! Data flow per frame: detector -> features -> {rep state machine, posture
//! rules} -> feedback gate -> output collaborator.

/// Coach configuration
pub mod config;

/// Application constants
pub mod constants;

/// Voice feedback gate
pub mod feedback;

/// Frame replay decoding
pub mod frames;

/// Isometric hold timer
pub mod hold_timer;

/// Structured logging setup
pub mod logging;

/// Localized coaching cues
pub mod messages;

/// Output collaborator interface and sinks
pub mod output;

/// Recorded frame replay
pub mod replay;

/// Async runtime with the shared engine and hold ticker
pub mod runtime;

/// Session engine
pub mod session;

pub use config::CoachConfig;
pub use output::CoachOutput;
pub use runtime::CoachRuntime;
pub use session::{CoachEngine, CoachEvent};

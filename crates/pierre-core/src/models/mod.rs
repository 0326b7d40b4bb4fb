// ABOUTME: Core data models for the Pierre form coach
// ABOUTME: Re-exports Frame, Point, ExerciseKind, RepState, Severity and FeedbackEvent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! ## Design Principles
//!
//! - **Detector Agnostic**: a frame is just 33 optional normalized points
//! - **Absence is data**: a missing landmark is `None`, never an error
//! - **Serializable**: models support JSON for frame replay and event output
//!
//! ## Core Models
//!
//! - `Point` / `Frame`: one detector result
//! - `ExerciseKind`: which analyzer applies
//! - `RepState`: repetition state machine position
//! - `FeedbackEvent`: one display verdict with severity

mod exercise;
mod feedback;
mod landmark;

pub use exercise::{ExerciseKind, RepState, TrackingMode};
pub use feedback::{FeedbackEvent, Severity};
pub use landmark::{Frame, Point};

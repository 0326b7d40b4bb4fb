// ABOUTME: Configuration management for the form coach session engine and runtime
// ABOUTME: Feedback gating, hold timer timing, narration locale, and form analysis thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Pierre form coach
//!
//! - **Coach**: voice gate timing, hold timer, locale and mute defaults
//! - **Analysis**: repetition and posture thresholds (`pierre_intelligence`)

/// Coach session configuration loaded from `COACH_*` environment variables
pub mod coach;

pub use coach::{CoachConfig, FeedbackConfig, HoldConfig};
pub use pierre_intelligence::config::{ConfigError, FormAnalysisConfig};

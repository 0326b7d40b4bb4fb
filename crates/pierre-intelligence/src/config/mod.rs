// ABOUTME: Configuration module for pierre-intelligence crate
// ABOUTME: Re-exports form analysis threshold configuration and its error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Configuration error types
pub mod error;
/// Form analysis thresholds (repetition, per-exercise posture)
pub mod form_analysis;

pub use error::ConfigError;
pub use form_analysis::{
    DeadliftThresholds, FormAnalysisConfig, PlankThresholds, PushupThresholds,
    RepetitionThresholds, SquatThresholds,
};

// ABOUTME: Application-level constants for the form coach binary and runtime
// ABOUTME: Service names, environment variable keys, and narration language tags
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Constants Module
//!
//! Thresholds for form analysis live in `pierre_core::constants`; this module
//! only holds what the application layer needs.

/// Service identifiers used in structured logs
pub mod service_names {
    /// The form coach service
    pub const PIERRE_FORM_COACH: &str = "pierre-form-coach";
}

/// Environment variable keys read by `CoachConfig::from_env`
pub mod env_keys {
    /// Minimum spacing between voiced messages (milliseconds)
    pub const FEEDBACK_INTERVAL_MS: &str = "COACH_FEEDBACK_INTERVAL_MS";
    /// Grace period before corrections are voiced (milliseconds)
    pub const CORRECTION_GRACE_MS: &str = "COACH_CORRECTION_GRACE_MS";
    /// Hold timer tick period (milliseconds)
    pub const HOLD_TICK_MS: &str = "COACH_HOLD_TICK_MS";
    /// Milestone acknowledgement lifetime (milliseconds)
    pub const MILESTONE_ACK_MS: &str = "COACH_MILESTONE_ACK_MS";
    /// Comma-separated hold milestones in seconds
    pub const HOLD_MILESTONES: &str = "COACH_HOLD_MILESTONES";
    /// Narration locale (`en` or `zh-CN`)
    pub const LOCALE: &str = "COACH_LOCALE";
    /// Start sessions with voice muted
    pub const START_MUTED: &str = "COACH_START_MUTED";
}

/// Collaborator names reported in failure logs
pub mod collaborators {
    /// Keypoint detector
    pub const DETECTOR: &str = "pose-detector";
    /// Frame source (camera or replay file)
    pub const FRAME_SOURCE: &str = "frame-source";
}

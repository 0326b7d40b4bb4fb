// ABOUTME: Feedback event model emitted by the rule engines and state machine
// ABOUTME: Carries display text, severity, and the wall-clock timestamp of the verdict
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a feedback message, used for display colour and voice gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Neutral status (always eligible for voice, even during the grace period)
    Info,
    /// Positive reinforcement (rep completed, good hold)
    Success,
    /// Posture correction
    Warning,
    /// Collaborator failure surfaced to the user
    Error,
}

impl Severity {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One display verdict. Transient: nothing keeps a history of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    /// Message shown to the user
    pub text: String,
    /// Message severity
    pub severity: Severity,
    /// When the verdict was produced
    pub timestamp: DateTime<Utc>,
}

impl FeedbackEvent {
    /// Create an event stamped with `timestamp`
    #[must_use]
    pub fn at(text: impl Into<String>, severity: Severity, timestamp: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            severity,
            timestamp,
        }
    }
}

// ABOUTME: Voice feedback gate throttling narration while display output stays unthrottled
// ABOUTME: Applies mute, the minimum voice interval, and the post-start correction grace period
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use pierre_core::models::Severity;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::config::FeedbackConfig;

/// Outcome of offering one message to the voice channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceDecision {
    /// Spoken; supersedes any in-flight narration
    Voiced,
    /// Voice is muted
    Muted,
    /// Too soon after the previous voiced message
    Throttled,
    /// Correction during the grace period after session start
    NotArmed,
}

impl VoiceDecision {
    /// Whether the message should be spoken
    #[must_use]
    pub const fn is_voiced(&self) -> bool {
        matches!(self, Self::Voiced)
    }
}

/// Decides which messages reach the speech collaborator
///
/// The gate only remembers the instant of the last voiced message and when
/// the current session started. Nothing else is retained.
#[derive(Debug, Clone)]
pub struct FeedbackGate {
    interval: Duration,
    grace: Duration,
    muted: bool,
    session_started: Option<Instant>,
    last_voiced: Option<Instant>,
}

impl FeedbackGate {
    /// Create a gate with no session and nothing voiced yet
    #[must_use]
    pub fn new(config: &FeedbackConfig, muted: bool) -> Self {
        Self {
            interval: config.interval(),
            grace: config.correction_grace(),
            muted,
            session_started: None,
            last_voiced: None,
        }
    }

    /// Start the grace period of a new session
    pub fn begin_session(&mut self, now: Instant) {
        self.session_started = Some(now);
        self.last_voiced = None;
    }

    /// Whether the voice channel is muted
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Mute or unmute the voice channel
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Whether warnings and successes may be voiced
    ///
    /// Once armed a session stays armed: the check only compares against the
    /// fixed session start instant.
    #[must_use]
    pub fn corrections_armed(&self, now: Instant) -> bool {
        self.session_started
            .is_some_and(|started| now.saturating_duration_since(started) >= self.grace)
    }

    /// Instant of the last message voiced through [`Self::offer`]
    #[must_use]
    pub const fn last_voiced(&self) -> Option<Instant> {
        self.last_voiced
    }

    /// Offer a message; records it as voiced when the gate opens
    pub fn offer(&mut self, severity: Severity, now: Instant) -> VoiceDecision {
        let decision = self.evaluate(severity, now);
        if decision.is_voiced() {
            self.last_voiced = Some(now);
        }
        decision
    }

    fn evaluate(&self, severity: Severity, now: Instant) -> VoiceDecision {
        if self.muted {
            return VoiceDecision::Muted;
        }
        if let Some(last) = self.last_voiced {
            if now.saturating_duration_since(last) <= self.interval {
                return VoiceDecision::Throttled;
            }
        }
        if severity != Severity::Info && !self.corrections_armed(now) {
            return VoiceDecision::NotArmed;
        }
        VoiceDecision::Voiced
    }

    /// Priority narration (welcome, milestones, failures)
    ///
    /// Skips the throttle and the grace period but honours mute. Does not
    /// count as the last voiced message.
    #[must_use]
    pub const fn priority(&self) -> VoiceDecision {
        if self.muted {
            VoiceDecision::Muted
        } else {
            VoiceDecision::Voiced
        }
    }
}

// ABOUTME: Isometric hold timer replacing rep counting for hold exercises
// ABOUTME: Tracks whole elapsed seconds, fires each milestone once, and expires its acknowledgement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;

use crate::config::HoldConfig;

/// Something the hold timer reports on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum HoldEvent {
    /// Elapsed time readout
    Elapsed {
        /// Whole seconds since start
        seconds: u64,
    },
    /// A milestone was crossed for the first time
    Milestone {
        /// The milestone, in seconds
        seconds: u64,
    },
    /// The milestone acknowledgement expired
    AckDismissed,
}

/// Elapsed-time tracker with one-shot milestones
#[derive(Debug, Clone)]
pub struct HoldTimer {
    milestones: Vec<u64>,
    ack_duration: Duration,
    started_at: Option<Instant>,
    elapsed_seconds: u64,
    fired: BTreeSet<u64>,
    dismiss_at: Option<Instant>,
}

impl HoldTimer {
    /// Create a stopped timer
    #[must_use]
    pub fn new(config: &HoldConfig) -> Self {
        let mut milestones = config.milestones.clone();
        milestones.sort_unstable();
        milestones.dedup();
        Self {
            milestones,
            ack_duration: config.milestone_ack(),
            started_at: None,
            elapsed_seconds: 0,
            fired: BTreeSet::new(),
            dismiss_at: None,
        }
    }

    /// Begin a fresh hold at `now`
    ///
    /// Callers reset first when an acknowledgement may be showing.
    pub fn start(&mut self, now: Instant) {
        self.reset();
        self.started_at = Some(now);
        debug!("hold timer started");
    }

    /// Cancel ticking and any pending acknowledgement dismissal
    ///
    /// Returns whether an acknowledgement was showing; the caller hides it.
    pub fn stop(&mut self) -> bool {
        if self.started_at.take().is_some() {
            debug!(elapsed_seconds = self.elapsed_seconds, "hold timer stopped");
        }
        self.dismiss_at.take().is_some()
    }

    /// Stop, zero the elapsed time and forget fired milestones
    ///
    /// Returns whether an acknowledgement was showing.
    pub fn reset(&mut self) -> bool {
        let ack_pending = self.stop();
        self.elapsed_seconds = 0;
        self.fired.clear();
        ack_pending
    }

    /// Whether the timer is counting
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Whole seconds held so far
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Milestones already fired in this hold
    #[must_use]
    pub const fn fired(&self) -> &BTreeSet<u64> {
        &self.fired
    }

    /// Whether a milestone acknowledgement is showing
    #[must_use]
    pub const fn acknowledgement_pending(&self) -> bool {
        self.dismiss_at.is_some()
    }

    /// Recompute elapsed time; a stopped timer reports nothing
    pub fn tick(&mut self, now: Instant) -> Vec<HoldEvent> {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };

        let measured = now.saturating_duration_since(started_at).as_secs();
        self.elapsed_seconds = self.elapsed_seconds.max(measured);

        let mut events = vec![HoldEvent::Elapsed {
            seconds: self.elapsed_seconds,
        }];

        if self.dismiss_at.is_some_and(|deadline| now >= deadline) {
            self.dismiss_at = None;
            events.push(HoldEvent::AckDismissed);
        }

        for &milestone in &self.milestones {
            if self.elapsed_seconds >= milestone && self.fired.insert(milestone) {
                self.dismiss_at = Some(now + self.ack_duration);
                events.push(HoldEvent::Milestone { seconds: milestone });
            }
        }

        events
    }
}

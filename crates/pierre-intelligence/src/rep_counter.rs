// ABOUTME: Repetition state machine driven by one dominant joint angle per frame
// ABOUTME: Counts one rep per extend-flex-extend cycle with a hysteresis dead zone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::RepState;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RepetitionThresholds;

/// A state change produced by one [`RepCounter::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "transition")]
pub enum RepTransition {
    /// `up -> ready`: re-armed for the next rep
    Rearmed,
    /// `ready -> down`: flexed position reached
    Descended,
    /// `down -> up`: a full rep was completed
    Completed {
        /// Count after this rep
        rep_count: u32,
    },
}

/// `ready -> down -> up -> ready` machine with a monotonic rep count
///
/// Angles between the flexed and extended thresholds never cause a
/// transition. The machine has no terminal state.
#[derive(Debug, Clone)]
pub struct RepCounter {
    thresholds: RepetitionThresholds,
    state: RepState,
    count: u32,
}

impl RepCounter {
    /// Create a counter in `ready` with zero reps
    #[must_use]
    pub const fn new(thresholds: RepetitionThresholds) -> Self {
        Self {
            thresholds,
            state: RepState::Ready,
            count: 0,
        }
    }

    /// Current machine state
    #[must_use]
    pub const fn state(&self) -> RepState {
        self.state
    }

    /// Reps completed since the last reset
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Back to `ready` with zero reps
    pub fn reset(&mut self) {
        self.state = RepState::Ready;
        self.count = 0;
    }

    /// Feed one dominant angle; at most one transition per call
    pub fn step(&mut self, angle: f64) -> Option<RepTransition> {
        let extended = angle > self.thresholds.extended_angle;
        let flexed = angle < self.thresholds.flexed_angle;

        let transition = match self.state {
            RepState::Up if extended => {
                self.state = RepState::Ready;
                RepTransition::Rearmed
            }
            RepState::Ready if flexed => {
                self.state = RepState::Down;
                RepTransition::Descended
            }
            RepState::Down if extended => {
                self.state = RepState::Up;
                self.count = self.count.saturating_add(1);
                RepTransition::Completed {
                    rep_count: self.count,
                }
            }
            RepState::Ready | RepState::Down | RepState::Up => return None,
        };

        debug!(state = %self.state, angle, rep_count = self.count, "repetition state changed");
        Some(transition)
    }
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new(RepetitionThresholds::default())
    }
}

// ABOUTME: Exercise kind and repetition state enumerations
// ABOUTME: Defines supported strength exercises with parsing, display names, and tracking modes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Strength exercises the coach can analyze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Squat filmed from the front (knee tracking)
    SquatFront,
    /// Squat filmed from the side (back angle)
    SquatSide,
    /// Conventional deadlift
    Deadlift,
    /// Push-up
    Pushup,
    /// Forearm plank, scored by hold duration
    Plank,
}

/// How a session of a given exercise is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    /// Repetitions counted by the state machine
    Repetition,
    /// Sustained posture timed by the hold timer
    Hold,
}

impl ExerciseKind {
    /// Every supported exercise, in menu order
    pub const ALL: [Self; 5] = [
        Self::SquatFront,
        Self::SquatSide,
        Self::Deadlift,
        Self::Pushup,
        Self::Plank,
    ];

    /// Stable machine name used in configuration and frame replays
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SquatFront => "squat_front",
            Self::SquatSide => "squat_side",
            Self::Deadlift => "deadlift",
            Self::Pushup => "pushup",
            Self::Plank => "plank",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::SquatFront => "squat (front view)",
            Self::SquatSide => "squat (side view)",
            Self::Deadlift => "deadlift",
            Self::Pushup => "push-up",
            Self::Plank => "plank",
        }
    }

    /// Whether this exercise counts reps or times a hold
    #[must_use]
    pub const fn tracking_mode(&self) -> TrackingMode {
        match self {
            Self::Plank => TrackingMode::Hold,
            Self::SquatFront | Self::SquatSide | Self::Deadlift | Self::Pushup => {
                TrackingMode::Repetition
            }
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "squat_front" => Ok(Self::SquatFront),
            "squat_side" => Ok(Self::SquatSide),
            "deadlift" => Ok(Self::Deadlift),
            "pushup" | "push_up" => Ok(Self::Pushup),
            "plank" => Ok(Self::Plank),
            other => Err(AppError::invalid_input(format!(
                "unknown exercise kind '{other}' (expected one of: squat_front, squat_side, deadlift, pushup, plank)"
            ))),
        }
    }
}

/// Position of the repetition state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepState {
    /// Extended rest position, armed for the next rep
    #[default]
    Ready,
    /// Flexed position reached
    Down,
    /// Returned to extension; rep counted
    Up,
}

impl RepState {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Down => "down",
            Self::Up => "up",
        }
    }
}

impl fmt::Display for RepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

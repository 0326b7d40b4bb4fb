// ABOUTME: Form analysis threshold configuration with environment overrides
// ABOUTME: Defaults reproduce the tuned repetition and posture contracts exactly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Form Analysis Configuration
//!
//! Every threshold the repetition state machine and posture rules consult.
//! Angles are degrees, distances and factors are normalized-frame units.

use std::env;
use std::str::FromStr;

use pierre_core::constants::{posture, repetition};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Root configuration for the form analysis engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormAnalysisConfig {
    /// Repetition state machine thresholds
    pub repetition: RepetitionThresholds,
    /// Squat posture thresholds (front and side view)
    pub squat: SquatThresholds,
    /// Deadlift posture thresholds
    pub deadlift: DeadliftThresholds,
    /// Push-up posture thresholds
    pub pushup: PushupThresholds,
    /// Plank posture thresholds
    pub plank: PlankThresholds,
}

/// Hysteresis band of the repetition state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepetitionThresholds {
    /// Angle above which the joint is extended
    pub extended_angle: f64,
    /// Angle below which the joint is flexed
    pub flexed_angle: f64,
}

impl Default for RepetitionThresholds {
    fn default() -> Self {
        Self {
            extended_angle: repetition::EXTENDED_ANGLE_DEGREES,
            flexed_angle: repetition::FLEXED_ANGLE_DEGREES,
        }
    }
}

/// Squat posture thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquatThresholds {
    /// Knees cave in below this multiple of ankle spacing
    pub knee_to_ankle_ratio: f64,
    /// Minimum shoulder-hip-knee angle for a straight back
    pub spine_min_angle: f64,
}

impl Default for SquatThresholds {
    fn default() -> Self {
        Self {
            knee_to_ankle_ratio: posture::SQUAT_KNEE_TO_ANKLE_RATIO,
            spine_min_angle: posture::SQUAT_SPINE_MIN_DEGREES,
        }
    }
}

/// Deadlift posture thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeadliftThresholds {
    /// Maximum nose to mid-hip horizontal offset
    pub spine_tilt_max: f64,
    /// Hip angle above which the lockout is too hard
    pub lockout_angle: f64,
}

impl Default for DeadliftThresholds {
    fn default() -> Self {
        Self {
            spine_tilt_max: posture::DEADLIFT_SPINE_TILT_MAX,
            lockout_angle: posture::DEADLIFT_LOCKOUT_DEGREES,
        }
    }
}

/// Push-up posture thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PushupThresholds {
    /// Maximum body straightness deviation
    pub straightness_max: f64,
    /// Elbow angle below which elbows are flaring
    pub elbow_flare_angle: f64,
}

impl Default for PushupThresholds {
    fn default() -> Self {
        Self {
            straightness_max: posture::PUSHUP_STRAIGHTNESS_MAX,
            elbow_flare_angle: posture::PUSHUP_ELBOW_FLARE_DEGREES,
        }
    }
}

/// Plank posture thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlankThresholds {
    /// Maximum body straightness deviation for good form
    pub straightness_max: f64,
    /// Lower bound of the acceptable support elbow angle
    pub elbow_min_angle: f64,
    /// Upper bound of the acceptable support elbow angle
    pub elbow_max_angle: f64,
    /// Hips too high below this fraction of mid-shoulder height
    pub hip_high_factor: f64,
    /// Hips sagging above this fraction of mid-shoulder height
    pub hip_sag_factor: f64,
    /// Head raised below this fraction of mid-shoulder height
    pub head_raised_factor: f64,
    /// Head dropped above this fraction of mid-shoulder height
    pub head_dropped_factor: f64,
}

impl Default for PlankThresholds {
    fn default() -> Self {
        Self {
            straightness_max: posture::PLANK_STRAIGHTNESS_MAX,
            elbow_min_angle: posture::PLANK_ELBOW_MIN_DEGREES,
            elbow_max_angle: posture::PLANK_ELBOW_MAX_DEGREES,
            hip_high_factor: posture::PLANK_HIP_HIGH_FACTOR,
            hip_sag_factor: posture::PLANK_HIP_SAG_FACTOR,
            head_raised_factor: posture::PLANK_HEAD_RAISED_FACTOR,
            head_dropped_factor: posture::PLANK_HEAD_DROPPED_FACTOR,
        }
    }
}

/// Overwrite `target` with the parsed value of `key` when it is set
fn override_from_env<T: FromStr>(key: &'static str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(val) = env::var(key) {
        *target = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("{key}={val}")))?;
    }
    Ok(())
}

impl FormAnalysisConfig {
    /// Load configuration from `FORM_*` environment variables on top of defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the result fails validation
    pub fn from_environment() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        override_from_env("FORM_EXTENDED_ANGLE", &mut config.repetition.extended_angle)?;
        override_from_env("FORM_FLEXED_ANGLE", &mut config.repetition.flexed_angle)?;

        override_from_env(
            "FORM_SQUAT_KNEE_ANKLE_RATIO",
            &mut config.squat.knee_to_ankle_ratio,
        )?;
        override_from_env("FORM_SQUAT_SPINE_MIN_ANGLE", &mut config.squat.spine_min_angle)?;

        override_from_env(
            "FORM_DEADLIFT_SPINE_TILT_MAX",
            &mut config.deadlift.spine_tilt_max,
        )?;
        override_from_env("FORM_DEADLIFT_LOCKOUT_ANGLE", &mut config.deadlift.lockout_angle)?;

        override_from_env(
            "FORM_PUSHUP_STRAIGHTNESS_MAX",
            &mut config.pushup.straightness_max,
        )?;
        override_from_env(
            "FORM_PUSHUP_ELBOW_FLARE_ANGLE",
            &mut config.pushup.elbow_flare_angle,
        )?;

        override_from_env(
            "FORM_PLANK_STRAIGHTNESS_MAX",
            &mut config.plank.straightness_max,
        )?;
        override_from_env("FORM_PLANK_ELBOW_MIN_ANGLE", &mut config.plank.elbow_min_angle)?;
        override_from_env("FORM_PLANK_ELBOW_MAX_ANGLE", &mut config.plank.elbow_max_angle)?;
        override_from_env("FORM_PLANK_HIP_HIGH_FACTOR", &mut config.plank.hip_high_factor)?;
        override_from_env("FORM_PLANK_HIP_SAG_FACTOR", &mut config.plank.hip_sag_factor)?;
        override_from_env(
            "FORM_PLANK_HEAD_RAISED_FACTOR",
            &mut config.plank.head_raised_factor,
        )?;
        override_from_env(
            "FORM_PLANK_HEAD_DROPPED_FACTOR",
            &mut config.plank.head_dropped_factor,
        )?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any threshold is non-finite, out of range, or misordered
    pub fn validate(&self) -> Result<(), ConfigError> {
        let angles = [
            self.repetition.extended_angle,
            self.repetition.flexed_angle,
            self.squat.spine_min_angle,
            self.deadlift.lockout_angle,
            self.pushup.elbow_flare_angle,
            self.plank.elbow_min_angle,
            self.plank.elbow_max_angle,
        ];
        if angles
            .iter()
            .any(|angle| !angle.is_finite() || !(0.0..=180.0).contains(angle))
        {
            return Err(ConfigError::ValueOutOfRange(
                "angle thresholds must be within 0..=180 degrees",
            ));
        }

        if self.repetition.flexed_angle >= self.repetition.extended_angle {
            return Err(ConfigError::InvalidRange(
                "flexed_angle must be below extended_angle",
            ));
        }

        let positive = [
            self.squat.knee_to_ankle_ratio,
            self.deadlift.spine_tilt_max,
            self.pushup.straightness_max,
            self.plank.straightness_max,
            self.plank.hip_high_factor,
            self.plank.hip_sag_factor,
            self.plank.head_raised_factor,
            self.plank.head_dropped_factor,
        ];
        if positive.iter().any(|value| !value.is_finite() || *value <= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "ratios, factors and straightness limits must be positive",
            ));
        }

        if self.plank.elbow_min_angle > self.plank.elbow_max_angle {
            return Err(ConfigError::InvalidRange(
                "plank elbow_min_angle must not exceed elbow_max_angle",
            ));
        }
        if self.plank.hip_high_factor > self.plank.hip_sag_factor {
            return Err(ConfigError::InvalidRange(
                "plank hip_high_factor must not exceed hip_sag_factor",
            ));
        }
        if self.plank.head_raised_factor > self.plank.head_dropped_factor {
            return Err(ConfigError::InvalidRange(
                "plank head_raised_factor must not exceed head_dropped_factor",
            ));
        }

        Ok(())
    }
}

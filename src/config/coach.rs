// ABOUTME: Coach session configuration with environment overrides and validation
// ABOUTME: Defaults reproduce the 1.5 s voice throttle, 3 s grace and 30 s hold milestone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::str::FromStr;
use std::time::Duration;

use pierre_core::constants::{feedback, hold};
use pierre_core::errors::{AppError, AppResult};
use pierre_intelligence::FormAnalysisConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::env_keys;
use crate::messages::Locale;

/// Voice gate timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Minimum spacing between voiced messages; a message exactly this far
    /// after the previous one is still suppressed
    pub interval_ms: u64,
    /// Time after session start before warnings and successes are voiced
    pub correction_grace_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            interval_ms: feedback::FEEDBACK_INTERVAL_MS,
            correction_grace_ms: feedback::CORRECTION_GRACE_MS,
        }
    }
}

impl FeedbackConfig {
    /// Voice throttle interval
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Correction grace period
    #[must_use]
    pub const fn correction_grace(&self) -> Duration {
        Duration::from_millis(self.correction_grace_ms)
    }
}

/// Isometric hold timer timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldConfig {
    /// Tick period
    pub tick_interval_ms: u64,
    /// How long a milestone acknowledgement stays up
    pub milestone_ack_ms: u64,
    /// Milestones in whole seconds, each fired at most once per hold
    pub milestones: Vec<u64>,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: hold::TICK_INTERVAL_MS,
            milestone_ack_ms: hold::MILESTONE_ACK_MS,
            milestones: vec![hold::MILESTONE_SECONDS],
        }
    }
}

impl HoldConfig {
    /// Tick period
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Milestone acknowledgement lifetime
    #[must_use]
    pub const fn milestone_ack(&self) -> Duration {
        Duration::from_millis(self.milestone_ack_ms)
    }
}

/// Complete configuration of one coach engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Voice gate timing
    pub feedback: FeedbackConfig,
    /// Hold timer timing
    pub hold: HoldConfig,
    /// Narration language
    pub locale: Locale,
    /// Whether sessions begin muted
    pub start_muted: bool,
    /// Repetition and posture thresholds
    pub analysis: FormAnalysisConfig,
}

fn parse_env<T: FromStr>(key: &'static str) -> AppResult<Option<T>> {
    env::var(key).map_or(Ok(None), |val| {
        val.trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::config(format!("Invalid {key} value: '{val}'")))
    })
}

fn parse_milestones(raw: &str) -> AppResult<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>().map_err(|_| {
                AppError::config(format!(
                    "Invalid {} entry: '{part}'",
                    env_keys::HOLD_MILESTONES
                ))
            })
        })
        .collect()
}

impl CoachConfig {
    /// Load configuration from environment variables on top of defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a variable cannot be parsed or validation fails
    pub fn from_env() -> AppResult<Self> {
        info!("Loading coach configuration from environment variables");

        let mut config = Self {
            analysis: FormAnalysisConfig::from_environment()?,
            ..Self::default()
        };

        if let Some(value) = parse_env(env_keys::FEEDBACK_INTERVAL_MS)? {
            config.feedback.interval_ms = value;
        }
        if let Some(value) = parse_env(env_keys::CORRECTION_GRACE_MS)? {
            config.feedback.correction_grace_ms = value;
        }
        if let Some(value) = parse_env(env_keys::HOLD_TICK_MS)? {
            config.hold.tick_interval_ms = value;
        }
        if let Some(value) = parse_env(env_keys::MILESTONE_ACK_MS)? {
            config.hold.milestone_ack_ms = value;
        }
        if let Ok(raw) = env::var(env_keys::HOLD_MILESTONES) {
            config.hold.milestones = parse_milestones(&raw)?;
        }
        if let Ok(raw) = env::var(env_keys::LOCALE) {
            config.locale = raw
                .parse::<Locale>()
                .map_err(|e| AppError::config(e.message.clone()).with_source(e))?;
        }
        if let Some(value) = parse_env(env_keys::START_MUTED)? {
            config.start_muted = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for a zero tick interval, a zero milestone, or
    /// invalid analysis thresholds
    pub fn validate(&self) -> AppResult<()> {
        if self.hold.tick_interval_ms == 0 {
            return Err(AppError::config("hold tick interval must be > 0"));
        }
        if self.hold.milestones.contains(&0) {
            return Err(AppError::config("hold milestones must be > 0 seconds"));
        }
        self.analysis.validate()?;
        Ok(())
    }
}

// ABOUTME: Lists the exercises the coach can analyze with their tracking mode
// ABOUTME: Output is a plain table on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::errors::AppResult;
use pierre_core::models::{ExerciseKind, TrackingMode};

#[allow(clippy::unnecessary_wraps)] // Uniform signature with the other commands
pub fn list() -> AppResult<()> {
    println!("{:<12} {:<20} MODE", "KIND", "NAME");
    for kind in ExerciseKind::ALL {
        let mode = match kind.tracking_mode() {
            TrackingMode::Repetition => "repetitions",
            TrackingMode::Hold => "hold timer",
        };
        println!("{:<12} {:<20} {mode}", kind.as_str(), kind.display_name());
    }
    Ok(())
}

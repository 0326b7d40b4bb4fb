// ABOUTME: Landmark point and frame models for pose detector output
// ABOUTME: A frame holds 33 optional normalized 2-D points addressed by stable indices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::landmarks::LANDMARK_COUNT;
use crate::errors::{AppError, AppResult};

/// A 2-D landmark position in normalized frame coordinates (`0..1`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position, 0 = left edge
    pub x: f64,
    /// Vertical position, 0 = top edge (grows downward)
    pub y: f64,
}

impl Point {
    /// Create a point from normalized coordinates
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite numbers
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One detector result: 33 landmarks, any of which may be absent
///
/// Frames are consumed by a single analysis pass and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    landmarks: Vec<Option<Point>>,
}

impl Frame {
    /// A frame in which the detector located nothing
    #[must_use]
    pub fn empty() -> Self {
        Self {
            landmarks: vec![None; LANDMARK_COUNT],
        }
    }

    /// Build a frame from exactly 33 optional landmarks
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the slice length is not 33
    pub fn from_landmarks(landmarks: Vec<Option<Point>>) -> AppResult<Self> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(AppError::invalid_input(format!(
                "frame must contain {LANDMARK_COUNT} landmarks, got {}",
                landmarks.len()
            )));
        }
        Ok(Self { landmarks })
    }

    /// Set one landmark, builder style. Out-of-layout indices are ignored.
    #[must_use]
    pub fn with_landmark(mut self, index: usize, x: f64, y: f64) -> Self {
        if let Some(slot) = self.landmarks.get_mut(index) {
            *slot = Some(Point::new(x, y));
        }
        self
    }

    /// Landmark at `index`, or `None` when absent or non-finite
    #[must_use]
    pub fn landmark(&self, index: usize) -> Option<Point> {
        self.landmarks
            .get(index)
            .copied()
            .flatten()
            .filter(Point::is_finite)
    }

    /// Number of landmarks the detector located in this frame
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.landmarks
            .iter()
            .filter(|slot| slot.is_some_and(|point| point.is_finite()))
            .count()
    }

    /// Raw landmark slots in layout order
    #[must_use]
    pub fn landmarks(&self) -> &[Option<Point>] {
        &self.landmarks
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::empty()
    }
}

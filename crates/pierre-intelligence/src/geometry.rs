// ABOUTME: Planar geometry kernel over normalized landmark coordinates
// ABOUTME: Euclidean distance, vertex angle with an undetermined sentinel, and midpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Geometry kernel
//!
//! All functions are pure and total. Absent or non-finite inputs never panic:
//! `angle` reports them with the `0.0` sentinel, `midpoint` with `None`, and
//! `distance` only accepts present points.

use pierre_core::models::Point;

/// Angle value meaning "could not be determined"
pub const UNDETERMINED_ANGLE: f64 = 0.0;

/// Euclidean distance between two present points
#[must_use]
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Angle in degrees at vertex `b` between rays `b->a` and `b->c`
///
/// Returns [`UNDETERMINED_ANGLE`] when any point is absent or non-finite, or
/// when either ray has zero length. The result is always within `[0, 180]`.
#[must_use]
pub fn angle(a: Option<Point>, b: Option<Point>, c: Option<Point>) -> f64 {
    let (Some(a), Some(b), Some(c)) = (a, b, c) else {
        return UNDETERMINED_ANGLE;
    };
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return UNDETERMINED_ANGLE;
    }

    let (v1x, v1y) = (a.x - b.x, a.y - b.y);
    let (v2x, v2y) = (c.x - b.x, c.y - b.y);
    let magnitudes = v1x.hypot(v1y) * v2x.hypot(v2y);
    if magnitudes <= 0.0 || !magnitudes.is_finite() {
        return UNDETERMINED_ANGLE;
    }

    let cosine = v1x.mul_add(v2x, v1y * v2y) / magnitudes;
    if !cosine.is_finite() {
        return UNDETERMINED_ANGLE;
    }
    cosine.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Midpoint of two landmarks, present only when both are
#[must_use]
pub fn midpoint(p1: Option<Point>, p2: Option<Point>) -> Option<Point> {
    let (p1, p2) = (p1?, p2?);
    let mid = Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0);
    mid.is_finite().then_some(mid)
}

/// Treat the [`UNDETERMINED_ANGLE`] sentinel as absent
#[must_use]
pub fn determined(angle: f64) -> Option<f64> {
    (angle > UNDETERMINED_ANGLE && angle.is_finite()).then_some(angle)
}

/// Mean of the determined angles among `angles`, `None` if none are
#[must_use]
pub fn mean_determined(angles: &[f64]) -> Option<f64> {
    let (sum, count) = angles
        .iter()
        .filter_map(|&value| determined(value))
        .fold((0.0, 0_u32), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

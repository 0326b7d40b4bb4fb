// ABOUTME: Frame decoding for recorded detector output in JSON lines form
// ABOUTME: Pull-based reader yielding timestamped frames with decode errors mapped to InvalidFormat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Frame replay format
//!
//! One JSON object per line:
//!
//! ```json
//! {"t_ms": 120, "landmarks": [[0.51, 0.22], null, {"x": 0.4, "y": 0.6}, ...]}
//! ```
//!
//! `landmarks` holds exactly 33 entries, each an `[x, y]` pair, an
//! `{"x", "y"}` object, or `null` for an undetected landmark. Blank lines
//! are skipped.

use std::io::BufRead;

use pierre_core::errors::{AppError, AppResult};
use pierre_core::models::{Frame, Point};
use serde::{Deserialize, Serialize};

/// One landmark as written in a replay file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LandmarkRecord {
    /// `[x, y]`
    Pair([f64; 2]),
    /// `{"x": .., "y": ..}`
    Point(Point),
}

impl From<LandmarkRecord> for Point {
    fn from(record: LandmarkRecord) -> Self {
        match record {
            LandmarkRecord::Pair([x, y]) => Self::new(x, y),
            LandmarkRecord::Point(point) => point,
        }
    }
}

/// One replay line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Capture time relative to the start of the recording
    pub t_ms: u64,
    /// 33 landmarks, `null` when undetected
    pub landmarks: Vec<Option<LandmarkRecord>>,
}

impl FrameRecord {
    /// Decode one JSON line
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the line is not a valid frame record
    pub fn decode(line: &str) -> AppResult<Self> {
        serde_json::from_str(line)
            .map_err(|e| AppError::invalid_format(format!("malformed frame record: {e}")).with_source(e))
    }

    /// Convert into an analysis frame
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the record does not hold exactly 33 landmarks
    pub fn into_frame(self) -> AppResult<Frame> {
        Frame::from_landmarks(
            self.landmarks
                .into_iter()
                .map(|slot| slot.map(Point::from))
                .collect(),
        )
    }
}

/// Pulls frame records from a line-oriented reader
pub struct FrameReader<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> FrameReader<R> {
    /// Read frames from `reader`
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Line number of the most recently read line (1-based)
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// Next timestamped frame, `None` at end of input
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` on read failure, `InvalidFormat` or
    /// `InvalidInput` for an undecodable line
    pub fn next_frame(&mut self) -> AppResult<Option<(u64, Frame)>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }
            let record = FrameRecord::decode(line).map_err(|e| self.at_line(e))?;
            let t_ms = record.t_ms;
            let frame = record.into_frame().map_err(|e| self.at_line(e))?;
            return Ok(Some((t_ms, frame)));
        }
    }

    fn at_line(&self, error: AppError) -> AppError {
        AppError::new(
            error.code,
            format!("line {}: {}", self.line_number, error.message),
        )
        .with_source(error)
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = AppResult<(u64, Frame)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

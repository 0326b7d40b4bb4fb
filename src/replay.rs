// ABOUTME: Frame replay driver feeding recorded detector output through the coach engine
// ABOUTME: Supports deterministic virtual-time replay and real-time paced replay via the runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::{self, BufRead};
use std::sync::Arc;
use std::time::Duration;

use pierre_core::errors::{AppError, AppResult, ErrorCode};
use pierre_core::models::ExerciseKind;
use serde::{Deserialize, Serialize};
use tokio::time::{self, Instant};
use tracing::{info, warn};

use crate::config::CoachConfig;
use crate::frames::FrameReader;
use crate::messages::CollaboratorFailure;
use crate::output::CoachOutput;
use crate::runtime::CoachRuntime;
use crate::session::{CoachEngine, CoachEvent};

/// Totals of one replay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Exercise replayed
    pub exercise: Option<ExerciseKind>,
    /// Frames analyzed
    pub frames: u64,
    /// Reps counted
    pub rep_count: u32,
    /// Whole seconds held (hold exercises)
    pub hold_seconds: u64,
    /// Events delivered to the output (virtual replay only)
    pub events: u64,
}

/// Replays a recording on a virtual clock derived from frame timestamps
///
/// Hold ticks are synthesized at every tick boundary of recording time, so
/// the result does not depend on how fast the host processes frames.
pub struct VirtualReplay {
    engine: CoachEngine,
    tick_interval: Duration,
    output: Arc<dyn CoachOutput>,
    events: u64,
}

impl VirtualReplay {
    /// Create a replay for `kind`
    #[must_use]
    pub fn new(config: &CoachConfig, kind: ExerciseKind, output: Arc<dyn CoachOutput>) -> Self {
        Self {
            engine: CoachEngine::new(config, kind),
            tick_interval: config.hold.tick_interval(),
            output,
            events: 0,
        }
    }

    async fn deliver(&mut self, events: Vec<CoachEvent>) -> AppResult<()> {
        for event in &events {
            self.output.emit(event).await?;
        }
        self.events += events.len() as u64;
        Ok(())
    }

    /// Run the whole recording, starting and stopping the session around it
    ///
    /// An undecodable line is reported once as a frame source failure and
    /// ends the replay.
    ///
    /// # Errors
    ///
    /// Returns the decode error after reporting it, or an output error
    pub async fn run<R: BufRead>(mut self, reader: FrameReader<R>) -> AppResult<ReplaySummary> {
        let kind = self.engine.kind();
        let base = Instant::now();
        let started = self.engine.start_session(kind, base);
        self.deliver(started).await?;

        let mut next_tick = self.tick_interval;
        let mut last_offset = Duration::ZERO;
        let mut failure = None;

        for item in reader {
            let (t_ms, frame) = match item {
                Ok(decoded) => decoded,
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            };
            let offset = Duration::from_millis(t_ms).max(last_offset);
            last_offset = offset;

            while next_tick <= offset {
                let ticked = self.engine.tick(base + next_tick);
                self.deliver(ticked).await?;
                next_tick += self.tick_interval;
            }

            let analyzed = self.engine.process_frame(&frame, base + offset);
            self.deliver(analyzed).await?;
        }

        if let Some(error) = failure {
            let reported = self.engine.report_collaborator_failure(
                CollaboratorFailure::FrameSourceUnreadable,
                &error.message,
                base + last_offset,
            );
            self.deliver(reported).await?;
            return Err(error);
        }

        let summary = ReplaySummary {
            exercise: Some(kind),
            frames: self.engine.frames_processed(),
            rep_count: self.engine.rep_count(),
            hold_seconds: self.engine.hold_elapsed_seconds(),
            events: 0,
        };
        let stopped = self.engine.stop_session(base + last_offset);
        self.deliver(stopped).await?;

        info!(
            exercise = %kind,
            frames = summary.frames,
            rep_count = summary.rep_count,
            hold_seconds = summary.hold_seconds,
            "Replay finished"
        );
        Ok(ReplaySummary {
            events: self.events,
            ..summary
        })
    }
}

/// Replay at recorded speed through the async runtime and its hold ticker
///
/// # Errors
///
/// Returns a decode error (after reporting it) or an output error
pub async fn replay_realtime<R: BufRead>(
    config: &CoachConfig,
    kind: ExerciseKind,
    output: Arc<dyn CoachOutput>,
    reader: FrameReader<R>,
) -> AppResult<ReplaySummary> {
    let runtime = CoachRuntime::new(config, kind, output);
    runtime.start_session(kind).await?;
    let base = Instant::now();

    for item in reader {
        match item {
            Ok((t_ms, frame)) => {
                time::sleep_until(base + Duration::from_millis(t_ms)).await;
                runtime.process_frame(&frame).await?;
            }
            Err(error) => {
                warn!(error = %error, "Replay aborted on unreadable frame");
                runtime
                    .report_collaborator_failure(
                        CollaboratorFailure::FrameSourceUnreadable,
                        &error.message,
                    )
                    .await?;
                runtime.stop_session().await?;
                return Err(error);
            }
        }
    }

    let engine = runtime.engine();
    let summary = {
        let engine = engine.lock().await;
        ReplaySummary {
            exercise: Some(kind),
            frames: engine.frames_processed(),
            rep_count: engine.rep_count(),
            hold_seconds: engine.hold_elapsed_seconds(),
            events: 0,
        }
    };
    runtime.stop_session().await?;
    Ok(summary)
}

/// Map a missing input file to a collaborator error
#[must_use]
pub fn frame_source_unavailable(path: &str, error: &io::Error) -> AppError {
    AppError::new(
        ErrorCode::ExternalServiceUnavailable,
        format!("cannot open frame source '{path}': {error}"),
    )
}

// ABOUTME: Async coach runtime sharing one engine between the frame path and the hold ticker
// ABOUTME: Spawns the periodic tick task and dispatches engine events to the output collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coach Runtime
//!
//! All session state lives in one [`CoachEngine`] behind a single async
//! mutex. Frame passes and ticks each take the lock, run to completion and
//! release it, so they never interleave. Events are dispatched after the
//! engine lock is released but under a dispatch lock taken while it was
//! still held, which keeps output in engine order.

use std::sync::Arc;
use std::time::Duration;

use pierre_core::errors::AppResult;
use pierre_core::models::{ExerciseKind, Frame};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::config::CoachConfig;
use crate::messages::CollaboratorFailure;
use crate::output::CoachOutput;
use crate::session::{CoachEngine, CoachEvent};

/// Handle to the running hold ticker
struct Ticker {
    shutdown_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Engine, output and tick task of one coaching session
pub struct CoachRuntime {
    engine: Arc<Mutex<CoachEngine>>,
    dispatch_order: Arc<Mutex<()>>,
    output: Arc<dyn CoachOutput>,
    tick_interval: Duration,
    ticker: Mutex<Option<Ticker>>,
}

impl CoachRuntime {
    /// Create a runtime with a stopped engine for `kind`
    #[must_use]
    pub fn new(config: &CoachConfig, kind: ExerciseKind, output: Arc<dyn CoachOutput>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(CoachEngine::new(config, kind))),
            dispatch_order: Arc::new(Mutex::new(())),
            output,
            tick_interval: config.hold.tick_interval(),
            ticker: Mutex::new(None),
        }
    }

    /// Shared engine, for inspection
    #[must_use]
    pub fn engine(&self) -> Arc<Mutex<CoachEngine>> {
        Arc::clone(&self.engine)
    }

    /// Start a session and its hold ticker
    ///
    /// # Errors
    ///
    /// Returns an error if the output collaborator rejects an event
    pub async fn start_session(&self, kind: ExerciseKind) -> AppResult<()> {
        self.spawn_ticker().await;
        self.apply(|engine, now| engine.start_session(kind, now)).await
    }

    /// Stop the session and its hold ticker
    ///
    /// # Errors
    ///
    /// Returns an error if the output collaborator rejects an event
    pub async fn stop_session(&self) -> AppResult<()> {
        let stopped = self.apply(CoachEngine::stop_session).await;
        self.shutdown_ticker().await;
        stopped
    }

    /// Switch exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the output collaborator rejects an event
    pub async fn change_kind(&self, kind: ExerciseKind) -> AppResult<()> {
        self.apply(|engine, now| engine.change_kind(kind, now)).await
    }

    /// Set the mute flag
    ///
    /// # Errors
    ///
    /// Returns an error if the output collaborator rejects an event
    pub async fn set_muted(&self, muted: bool) -> AppResult<()> {
        self.apply(|engine, now| engine.set_muted(muted, now)).await
    }

    /// Analyze one frame
    ///
    /// # Errors
    ///
    /// Returns an error if the output collaborator rejects an event
    pub async fn process_frame(&self, frame: &Frame) -> AppResult<()> {
        self.apply(|engine, now| engine.process_frame(frame, now)).await
    }

    /// Surface a collaborator failure to the user
    ///
    /// # Errors
    ///
    /// Returns an error if the output collaborator rejects an event
    pub async fn report_collaborator_failure(
        &self,
        failure: CollaboratorFailure,
        detail: &str,
    ) -> AppResult<()> {
        self.apply(|engine, now| engine.report_collaborator_failure(failure, detail, now))
            .await
    }

    async fn apply<F>(&self, op: F) -> AppResult<()>
    where
        F: FnOnce(&mut CoachEngine, Instant) -> Vec<CoachEvent>,
    {
        apply(&self.engine, &self.dispatch_order, self.output.as_ref(), op).await
    }

    async fn spawn_ticker(&self) {
        self.shutdown_ticker().await;

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let engine = Arc::clone(&self.engine);
        let dispatch_order = Arc::clone(&self.dispatch_order);
        let output = Arc::clone(&self.output);
        let tick_interval = self.tick_interval;
        let start = Instant::now() + tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(start, tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let ticked =
                            apply(&engine, &dispatch_order, output.as_ref(), CoachEngine::tick).await;
                        if let Err(e) = ticked {
                            warn!(error = %e, sink = output.name(), "hold tick dispatch failed");
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Hold ticker received shutdown signal");
                        break;
                    }
                }
            }
        });

        *self.ticker.lock().await = Some(Ticker {
            shutdown_tx,
            handle,
        });
    }

    async fn shutdown_ticker(&self) {
        let ticker = self.ticker.lock().await.take();
        if let Some(ticker) = ticker {
            if let Err(e) = ticker.shutdown_tx.send(()).await {
                debug!(error = ?e, "Hold ticker shutdown signal send failed (task already finished)");
            }
            if let Err(e) = ticker.handle.await {
                warn!(error = %e, "Hold ticker task ended abnormally");
            }
        }
    }

    /// Stop the ticker without emitting session events
    pub async fn shutdown(&self) {
        self.shutdown_ticker().await;
    }
}

impl Drop for CoachRuntime {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.ticker.try_lock() {
            if let Some(ticker) = slot.take() {
                ticker.handle.abort();
            }
        }
    }
}

/// Run `op` on the engine and deliver its events
///
/// The dispatch lock is taken before the engine lock is released, so output
/// sees events in the order the engine produced them.
async fn apply<F>(
    engine: &Mutex<CoachEngine>,
    dispatch_order: &Mutex<()>,
    output: &dyn CoachOutput,
    op: F,
) -> AppResult<()>
where
    F: FnOnce(&mut CoachEngine, Instant) -> Vec<CoachEvent>,
{
    let mut engine = engine.lock().await;
    let events = op(&mut *engine, Instant::now());
    let _ordered = dispatch_order.lock().await;
    drop(engine);
    dispatch(output, &events).await
}

async fn dispatch(output: &dyn CoachOutput, events: &[CoachEvent]) -> AppResult<()> {
    for event in events {
        output.emit(event).await?;
    }
    Ok(())
}

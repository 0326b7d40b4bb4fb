// ABOUTME: Output collaborator interface receiving display, voice, rep count and hold events
// ABOUTME: Ships JSON lines, human-readable text, and in-memory recording sinks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::Write;

use async_trait::async_trait;
use pierre_core::errors::AppResult;
use tokio::sync::Mutex;

use crate::messages::MessageCatalog;
use crate::session::CoachEvent;

/// Receives every event the engine produces, in order
///
/// Implementations stand in for the display, speech and counter widgets.
#[async_trait]
pub trait CoachOutput: Send + Sync {
    /// Sink name for logs
    fn name(&self) -> &str;

    /// Deliver one event
    ///
    /// # Errors
    /// Returns an error if the underlying collaborator rejects the event
    async fn emit(&self, event: &CoachEvent) -> AppResult<()>;
}

/// Writes each event as one JSON object per line
pub struct JsonLinesOutput<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesOutput<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

#[async_trait]
impl<W: Write + Send> CoachOutput for JsonLinesOutput<W> {
    fn name(&self) -> &'static str {
        "json-lines"
    }

    async fn emit(&self, event: &CoachEvent) -> AppResult<()> {
        let line = serde_json::to_string(event)?;
        let mut writer = self.writer.lock().await;
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

/// Writes events as short human-readable lines in the catalog's locale
pub struct TextOutput<W> {
    writer: Mutex<W>,
    catalog: MessageCatalog,
}

impl<W: Write + Send> TextOutput<W> {
    /// Wrap a writer
    pub fn new(writer: W, catalog: MessageCatalog) -> Self {
        Self {
            writer: Mutex::new(writer),
            catalog,
        }
    }

    fn render(&self, event: &CoachEvent) -> String {
        match event {
            CoachEvent::Display(feedback) => {
                format!("[{}] {}", feedback.severity, feedback.text)
            }
            CoachEvent::Voice { text, language } => format!("(voice {language}) {text}"),
            CoachEvent::VoiceCancelled => "(voice cancelled)".to_owned(),
            CoachEvent::RepCount { count } => self.catalog.rep_display(*count),
            CoachEvent::HoldTimer { display, .. } => display.clone(),
            CoachEvent::HoldMilestone { seconds } => self.catalog.milestone_display(*seconds),
            CoachEvent::MilestoneDismissed => "(milestone dismissed)".to_owned(),
        }
    }
}

#[async_trait]
impl<W: Write + Send> CoachOutput for TextOutput<W> {
    fn name(&self) -> &'static str {
        "text"
    }

    async fn emit(&self, event: &CoachEvent) -> AppResult<()> {
        let line = self.render(event);
        let mut writer = self.writer.lock().await;
        writeln!(writer, "{line}")?;
        Ok(())
    }
}

/// Keeps every event in memory
#[derive(Default)]
pub struct RecordingOutput {
    events: Mutex<Vec<CoachEvent>>,
}

impl RecordingOutput {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub async fn events(&self) -> Vec<CoachEvent> {
        self.events.lock().await.clone()
    }

    /// Drop recorded events
    pub async fn clear(&self) {
        self.events.lock().await.clear();
    }
}

#[async_trait]
impl CoachOutput for RecordingOutput {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn emit(&self, event: &CoachEvent) -> AppResult<()> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}

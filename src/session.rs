// ABOUTME: Coach session engine owning all per-session state behind one explicit object
// ABOUTME: Routes analysis verdicts, hold timer ticks and session control into display and voice events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Engine
//!
//! [`CoachEngine`] is synchronous and clock-agnostic: every operation takes
//! the current instant and returns the events it produced. The runtime wraps
//! it in a mutex shared by the frame path and the hold ticker.
//!
//! A stopped session ignores frames and ticks entirely.

use chrono::{DateTime, TimeDelta, Utc};
use pierre_core::models::{ExerciseKind, FeedbackEvent, Frame, RepState, TrackingMode};
use pierre_intelligence::{FormAnalyzer, RepTransition};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::config::CoachConfig;
use crate::constants::collaborators;
use crate::feedback::{FeedbackGate, VoiceDecision};
use crate::hold_timer::{HoldEvent, HoldTimer};
use crate::logging::SessionLogger;
use crate::messages::{CollaboratorFailure, Cue, MessageCatalog};

/// Output produced by the engine for the display and speech collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum CoachEvent {
    /// Replace the on-screen feedback line
    Display(FeedbackEvent),
    /// Speak `text`, cancelling any in-flight narration
    Voice {
        /// Narration text
        text: String,
        /// BCP 47 language tag
        language: String,
    },
    /// Stop any in-flight narration
    VoiceCancelled,
    /// Rep counter changed
    RepCount {
        /// New count
        count: u32,
    },
    /// Hold timer readout
    HoldTimer {
        /// Whole seconds held
        elapsed_seconds: u64,
        /// Formatted readout
        display: String,
    },
    /// Hold milestone reached; show the acknowledgement
    HoldMilestone {
        /// Milestone in seconds
        seconds: u64,
    },
    /// Hide the milestone acknowledgement
    MilestoneDismissed,
}

/// Maps engine instants onto wall-clock time for display timestamps
#[derive(Debug, Clone, Copy)]
struct WallClock {
    origin: Instant,
    origin_utc: DateTime<Utc>,
}

impl WallClock {
    fn anchored(origin: Instant) -> Self {
        Self {
            origin,
            origin_utc: Utc::now(),
        }
    }

    fn at(&self, now: Instant) -> DateTime<Utc> {
        let offset = now.saturating_duration_since(self.origin);
        TimeDelta::from_std(offset).map_or(self.origin_utc, |delta| self.origin_utc + delta)
    }
}

/// All state of one coaching session
#[derive(Debug, Clone)]
pub struct CoachEngine {
    clock: WallClock,
    catalog: MessageCatalog,
    analyzer: FormAnalyzer,
    gate: FeedbackGate,
    hold: HoldTimer,
    live: bool,
    frames_processed: u64,
}

impl CoachEngine {
    /// Create a stopped engine configured for `kind`
    #[must_use]
    pub fn new(config: &CoachConfig, kind: ExerciseKind) -> Self {
        Self {
            clock: WallClock::anchored(Instant::now()),
            catalog: MessageCatalog::new(config.locale),
            analyzer: FormAnalyzer::new(kind, config.analysis.clone()),
            gate: FeedbackGate::new(&config.feedback, config.start_muted),
            hold: HoldTimer::new(&config.hold),
            live: false,
            frames_processed: 0,
        }
    }

    /// Current exercise
    #[must_use]
    pub const fn kind(&self) -> ExerciseKind {
        self.analyzer.kind()
    }

    /// Whether a session is running
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.live
    }

    /// Whether voice output is muted
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.gate.is_muted()
    }

    /// Reps counted in this session
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.analyzer.rep_count()
    }

    /// Repetition state machine position
    #[must_use]
    pub const fn rep_state(&self) -> RepState {
        self.analyzer.state()
    }

    /// Whole seconds held in the current hold
    #[must_use]
    pub const fn hold_elapsed_seconds(&self) -> u64 {
        self.hold.elapsed_seconds()
    }

    /// Whether the hold timer is running
    #[must_use]
    pub const fn hold_running(&self) -> bool {
        self.hold.is_running()
    }

    /// Frames analyzed since the engine was created
    #[must_use]
    pub const fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Whether warnings and successes may be voiced yet
    #[must_use]
    pub fn corrections_armed(&self, now: Instant) -> bool {
        self.gate.corrections_armed(now)
    }

    /// Start a session: reset counters, start the grace period, narrate the welcome
    pub fn start_session(&mut self, kind: ExerciseKind, now: Instant) -> Vec<CoachEvent> {
        self.live = true;
        self.clock = WallClock::anchored(now);
        self.analyzer.set_kind(kind);
        self.gate.begin_session(now);
        let mut events = vec![CoachEvent::RepCount { count: 0 }];
        self.reset_hold(&mut events);
        if kind.tracking_mode() == TrackingMode::Hold {
            self.start_hold(now, &mut events);
        }
        SessionLogger::log_session_event("started", kind, self.live);

        self.emit_priority(Cue::Welcome, now, &mut events);
        events
    }

    /// Stop the session: cancel narration and the hold timer
    ///
    /// Stopping an already stopped session emits nothing.
    pub fn stop_session(&mut self, now: Instant) -> Vec<CoachEvent> {
        if !self.live {
            return Vec::new();
        }
        self.live = false;
        let ack_pending = self.hold.stop();
        SessionLogger::log_session_event("stopped", self.kind(), self.live);

        let mut events = vec![CoachEvent::VoiceCancelled];
        if ack_pending {
            events.push(CoachEvent::MilestoneDismissed);
        }
        self.emit(Cue::TrainingStopped, now, &mut events);
        events
    }

    /// Switch exercise; rep count, machine state and hold timer always reset
    pub fn change_kind(&mut self, kind: ExerciseKind, now: Instant) -> Vec<CoachEvent> {
        self.analyzer.set_kind(kind);
        let mut events = Vec::new();
        self.reset_hold(&mut events);
        if self.live {
            events.push(CoachEvent::RepCount { count: 0 });
            if kind.tracking_mode() == TrackingMode::Hold {
                self.start_hold(now, &mut events);
            }
        }
        SessionLogger::log_session_event("switched", kind, self.live);

        self.emit(Cue::SwitchedTo { exercise: kind }, now, &mut events);
        events
    }

    /// Set the mute flag, announcing the change
    pub fn set_muted(&mut self, muted: bool, now: Instant) -> Vec<CoachEvent> {
        if self.gate.is_muted() == muted {
            return Vec::new();
        }
        self.gate.set_muted(muted);
        let cue = if muted {
            Cue::VoiceMuted
        } else {
            Cue::VoiceUnmuted
        };
        let mut events = Vec::new();
        self.emit(cue, now, &mut events);
        events
    }

    /// Flip the mute flag
    pub fn toggle_mute(&mut self, now: Instant) -> Vec<CoachEvent> {
        let muted = !self.gate.is_muted();
        self.set_muted(muted, now)
    }

    /// One analysis pass: extraction, state machine step, posture rules, feedback
    pub fn process_frame(&mut self, frame: &Frame, now: Instant) -> Vec<CoachEvent> {
        if !self.live {
            return Vec::new();
        }
        self.frames_processed += 1;

        let analysis = self.analyzer.analyze(frame);
        let kind = self.kind();
        let mut events = Vec::new();

        if let Some(transition) = analysis.transition {
            let cue = match transition {
                RepTransition::Rearmed => Cue::Ready { exercise: kind },
                RepTransition::Descended => Cue::InPosition { exercise: kind },
                RepTransition::Completed { rep_count } => {
                    SessionLogger::log_rep_completed(kind, rep_count);
                    events.push(CoachEvent::RepCount { count: rep_count });
                    Cue::RepCompleted { exercise: kind }
                }
            };
            self.emit(cue, now, &mut events);
        }

        for posture in analysis.cues {
            self.emit(Cue::Posture { posture }, now, &mut events);
        }

        trace!(
            exercise = %kind,
            state = %analysis.state,
            rep_count = analysis.rep_count,
            event_count = events.len(),
            "frame processed"
        );
        events
    }

    /// One hold timer tick
    pub fn tick(&mut self, now: Instant) -> Vec<CoachEvent> {
        if !self.live {
            return Vec::new();
        }
        let mut events = Vec::new();
        for hold_event in self.hold.tick(now) {
            match hold_event {
                HoldEvent::Elapsed { seconds } => events.push(self.hold_readout(seconds)),
                HoldEvent::Milestone { seconds } => {
                    SessionLogger::log_hold_milestone(self.kind(), seconds);
                    events.push(CoachEvent::HoldMilestone { seconds });
                    self.emit_priority(Cue::HoldMilestone { seconds }, now, &mut events);
                }
                HoldEvent::AckDismissed => events.push(CoachEvent::MilestoneDismissed),
            }
        }
        events
    }

    /// Surface a collaborator failure once as an error message
    ///
    /// Works whether or not a session is live; the core itself is not retried.
    pub fn report_collaborator_failure(
        &mut self,
        failure: CollaboratorFailure,
        detail: &str,
        now: Instant,
    ) -> Vec<CoachEvent> {
        let collaborator = match failure {
            CollaboratorFailure::DetectorUnavailable => collaborators::DETECTOR,
            CollaboratorFailure::CameraUnavailable | CollaboratorFailure::FrameSourceUnreadable => {
                collaborators::FRAME_SOURCE
            }
        };
        SessionLogger::log_collaborator_failure(collaborator, detail);

        let mut events = Vec::new();
        self.emit_priority(Cue::Failure { failure }, now, &mut events);
        events
    }

    /// Start a fresh hold and show its zero readout
    fn start_hold(&mut self, now: Instant, events: &mut Vec<CoachEvent>) {
        self.hold.start(now);
        events.push(self.hold_readout(0));
    }

    /// Reset the hold, hiding a milestone acknowledgement still on screen
    fn reset_hold(&mut self, events: &mut Vec<CoachEvent>) {
        if self.hold.reset() {
            events.push(CoachEvent::MilestoneDismissed);
        }
    }

    fn hold_readout(&self, seconds: u64) -> CoachEvent {
        CoachEvent::HoldTimer {
            elapsed_seconds: seconds,
            display: self.catalog.hold_display(seconds),
        }
    }

    /// Display `cue` and voice it through the gate
    fn emit(&mut self, cue: Cue, now: Instant, events: &mut Vec<CoachEvent>) {
        let decision = self.gate.offer(cue.severity(), now);
        self.push(cue, decision, now, events);
    }

    /// Display `cue` and voice it unless muted, bypassing throttle and grace
    fn emit_priority(&self, cue: Cue, now: Instant, events: &mut Vec<CoachEvent>) {
        let decision = self.gate.priority();
        self.push(cue, decision, now, events);
    }

    fn push(
        &self,
        cue: Cue,
        decision: VoiceDecision,
        now: Instant,
        events: &mut Vec<CoachEvent>,
    ) {
        let text = self.catalog.render(cue);
        let severity = cue.severity();
        debug!(severity = %severity, decision = ?decision, text = %text, "feedback");
        let timestamp = self.clock.at(now);
        events.push(CoachEvent::Display(FeedbackEvent::at(
            text.clone(),
            severity,
            timestamp,
        )));
        if decision.is_voiced() {
            SessionLogger::log_voiced(severity, &text);
            events.push(CoachEvent::Voice {
                text,
                language: self.catalog.locale().language_tag().to_owned(),
            });
        }
    }
}

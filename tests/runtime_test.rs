// ABOUTME: Tests for the async coach runtime on a paused tokio clock
// ABOUTME: Verifies the spawned hold ticker, milestone narration, and ticker shutdown on stop
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{plank_frame, squat_front_frame, test_config, PlankPose};
use pierre_core::errors::AppResult;
use pierre_core::models::ExerciseKind;
use pierre_form_coach::messages::CollaboratorFailure;
use pierre_form_coach::output::RecordingOutput;
use pierre_form_coach::{CoachEvent, CoachOutput, CoachRuntime};
use tokio::sync::Mutex;
use tokio::time::{sleep, sleep_until, Instant};

/// Output that takes `delay` to accept each event
struct SlowOutput {
    delay: Duration,
    events: Mutex<Vec<CoachEvent>>,
}

impl SlowOutput {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            events: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CoachOutput for SlowOutput {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn emit(&self, event: &CoachEvent) -> AppResult<()> {
        sleep(self.delay).await;
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}

fn hold_seconds(events: &[CoachEvent]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|event| match event {
            CoachEvent::HoldTimer {
                elapsed_seconds, ..
            } => Some(*elapsed_seconds),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_plank_ticker_reaches_milestone() {
    let output = Arc::new(RecordingOutput::new());
    let runtime = CoachRuntime::new(&test_config(), ExerciseKind::Plank, output.clone());

    runtime.start_session(ExerciseKind::Plank).await.unwrap();
    sleep(Duration::from_millis(30_500)).await;

    let events = output.events().await;
    let seconds = hold_seconds(&events);
    assert_eq!(seconds, (0..=30).collect::<Vec<_>>());
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, CoachEvent::HoldMilestone { .. }))
            .count(),
        1
    );

    sleep(Duration::from_secs(3)).await;
    assert!(output
        .events()
        .await
        .contains(&CoachEvent::MilestoneDismissed));

    runtime.stop_session().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_stop_session_halts_ticker() {
    let output = Arc::new(RecordingOutput::new());
    let runtime = CoachRuntime::new(&test_config(), ExerciseKind::Plank, output.clone());

    runtime.start_session(ExerciseKind::Plank).await.unwrap();
    sleep(Duration::from_millis(2500)).await;
    runtime.stop_session().await.unwrap();

    let at_stop = hold_seconds(&output.events().await);
    assert_eq!(at_stop, vec![0, 1, 2]);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(hold_seconds(&output.events().await), at_stop);

    let engine = runtime.engine();
    let engine = engine.lock().await;
    assert!(!engine.is_live());
    assert!(!engine.hold_running());
}

#[tokio::test(start_paused = true)]
async fn test_frames_flow_through_runtime() {
    let output = Arc::new(RecordingOutput::new());
    let runtime = CoachRuntime::new(&test_config(), ExerciseKind::SquatFront, output.clone());

    runtime.start_session(ExerciseKind::SquatFront).await.unwrap();
    runtime
        .process_frame(&squat_front_frame(85.0, 1.5))
        .await
        .unwrap();
    sleep(Duration::from_secs(2)).await;
    runtime
        .process_frame(&squat_front_frame(170.0, 1.5))
        .await
        .unwrap();

    let events = output.events().await;
    assert!(events.contains(&CoachEvent::RepCount { count: 1 }));
    // Squat sessions never tick the hold timer
    assert!(hold_seconds(&events).is_empty());

    runtime.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_switching_to_plank_starts_hold() {
    let output = Arc::new(RecordingOutput::new());
    let runtime = CoachRuntime::new(&test_config(), ExerciseKind::Pushup, output.clone());

    runtime.start_session(ExerciseKind::Pushup).await.unwrap();
    runtime.change_kind(ExerciseKind::Plank).await.unwrap();
    sleep(Duration::from_millis(1500)).await;

    assert_eq!(hold_seconds(&output.events().await), vec![0, 1]);
    runtime.stop_session().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_failure_and_mute_reach_output() {
    let output = Arc::new(RecordingOutput::new());
    let runtime = CoachRuntime::new(&test_config(), ExerciseKind::Deadlift, output.clone());

    runtime.set_muted(true).await.unwrap();
    runtime
        .report_collaborator_failure(CollaboratorFailure::DetectorUnavailable, "model missing")
        .await
        .unwrap();

    let events = output.events().await;
    assert!(events
        .iter()
        .all(|event| !matches!(event, CoachEvent::Voice { .. })));
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, CoachEvent::Display(_)))
            .count(),
        2
    );
}

#[tokio::test(start_paused = true)]
async fn test_tick_events_wait_for_earlier_frame_events() {
    let output = Arc::new(SlowOutput::new(Duration::from_millis(100)));
    let runtime = Arc::new(CoachRuntime::new(
        &test_config(),
        ExerciseKind::Plank,
        output.clone(),
    ));

    let start = Instant::now();
    runtime.start_session(ExerciseKind::Plank).await.unwrap();

    // The frame's events are still being delivered when the 30 s tick fires
    sleep_until(start + Duration::from_millis(29_950)).await;
    let frame_task = tokio::spawn({
        let runtime = Arc::clone(&runtime);
        async move {
            runtime
                .process_frame(&plank_frame(PlankPose::default()))
                .await
                .unwrap();
        }
    });
    sleep(Duration::from_secs(2)).await;
    frame_task.await.unwrap();

    let events = output.events.lock().await.clone();
    let position = |wanted: &CoachEvent| events.iter().position(|event| event == wanted).unwrap();
    let frame_voice = position(&CoachEvent::Voice {
        text: "Great form! Hold it".to_owned(),
        language: "en-US".to_owned(),
    });
    let milestone_tick = position(&CoachEvent::HoldTimer {
        elapsed_seconds: 30,
        display: "Duration: 00:30".to_owned(),
    });
    assert!(frame_voice < milestone_tick);
    assert_eq!(
        events[milestone_tick + 1],
        CoachEvent::HoldMilestone { seconds: 30 }
    );

    runtime.stop_session().await.unwrap();
}

// ABOUTME: Replay command wiring configuration, the frame reader and the chosen output sink
// ABOUTME: Prints a summary line to stderr when the recording is exhausted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use pierre_core::errors::AppResult;
use pierre_core::models::ExerciseKind;
use pierre_form_coach::config::CoachConfig;
use pierre_form_coach::frames::FrameReader;
use pierre_form_coach::messages::{Locale, MessageCatalog};
use pierre_form_coach::output::{CoachOutput, JsonLinesOutput, TextOutput};
use pierre_form_coach::replay::{frame_source_unavailable, replay_realtime, VirtualReplay};
use tracing::info;

pub struct ReplayArgs {
    pub exercise: ExerciseKind,
    pub input: PathBuf,
    pub json: bool,
    pub locale: Option<Locale>,
    pub realtime: bool,
    pub muted: bool,
}

pub async fn run(args: ReplayArgs) -> AppResult<()> {
    let mut config = CoachConfig::from_env()?;
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    config.start_muted |= args.muted;

    let path = args.input.display().to_string();
    let file = File::open(&args.input).map_err(|e| frame_source_unavailable(&path, &e))?;
    let reader = FrameReader::new(BufReader::new(file));

    let output: Arc<dyn CoachOutput> = if args.json {
        Arc::new(JsonLinesOutput::new(io::stdout()))
    } else {
        Arc::new(TextOutput::new(io::stdout(), MessageCatalog::new(config.locale)))
    };

    info!(exercise = %args.exercise, input = %path, realtime = args.realtime, "Starting replay");

    let summary = if args.realtime {
        replay_realtime(&config, args.exercise, output, reader).await?
    } else {
        VirtualReplay::new(&config, args.exercise, output)
            .run(reader)
            .await?
    };

    eprintln!(
        "{}: {} frames, {} reps, {}s held",
        args.exercise, summary.frames, summary.rep_count, summary.hold_seconds
    );
    Ok(())
}

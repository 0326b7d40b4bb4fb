// ABOUTME: Pierre form coach CLI - replays recorded landmark frames through the coach
// ABOUTME: Prints display, voice, rep count and hold timer events as JSON lines or text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List supported exercises
//! pierre-form-coach exercises
//!
//! # Replay a recording as fast as possible on a virtual clock
//! pierre-form-coach replay --exercise squat_front --input squat.jsonl
//!
//! # Replay at recorded speed with human-readable output in Chinese
//! pierre-form-coach replay --exercise plank --input plank.jsonl --realtime --format text --locale zh-CN
//! ```

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use pierre_core::errors::AppResult;
use pierre_core::models::ExerciseKind;
use pierre_form_coach::logging::{LogFormat, LoggingConfig};
use pierre_form_coach::messages::Locale;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pierre-form-coach",
    about = "Pierre exercise form coach",
    long_about = "Counts repetitions and coaches posture from recorded body-landmark frames."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List supported exercises
    Exercises,

    /// Replay a JSON-lines landmark recording
    Replay {
        /// Exercise kind (`squat_front`, `squat_side`, deadlift, pushup, plank)
        #[arg(long, short = 'e')]
        exercise: ExerciseKind,

        /// Recording file, one frame per line
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Event output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Narration locale override (en, zh-CN)
        #[arg(long)]
        locale: Option<Locale>,

        /// Replay at recorded speed instead of on a virtual clock
        #[arg(long)]
        realtime: bool,

        /// Start muted
        #[arg(long)]
        muted: bool,
    },
}

/// How replay events are printed
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One JSON object per event
    Json,
    /// Short human-readable lines
    Text,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    if matches!(cli.command, Command::Exercises) {
        logging.format = LogFormat::Compact;
    }
    if let Err(e) = logging.init() {
        eprintln!("logging initialization failed: {e}");
    }

    info!("Pierre form coach CLI");

    match cli.command {
        Command::Exercises => commands::exercises::list(),
        Command::Replay {
            exercise,
            input,
            format,
            locale,
            realtime,
            muted,
        } => {
            commands::replay::run(commands::replay::ReplayArgs {
                exercise,
                input,
                json: matches!(format, OutputFormat::Json),
                locale,
                realtime,
                muted,
            })
            .await
        }
    }
}

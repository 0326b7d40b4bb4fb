// ABOUTME: Typed coaching cues and their localized narration text
// ABOUTME: Renders every user-facing message through an English or Simplified Chinese catalog
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Message catalog
//!
//! The engine decides *what* to say as a [`Cue`]; the [`MessageCatalog`]
//! decides *how* to say it in the configured [`Locale`].

use pierre_core::errors::AppError;
use pierre_core::models::{ExerciseKind, Severity};
use pierre_intelligence::PostureCue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Narration language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English
    #[default]
    #[serde(rename = "en")]
    En,
    /// Simplified Chinese
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    /// BCP 47 tag handed to the speech collaborator
    #[must_use]
    pub const fn language_tag(&self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::En => "en",
            Self::ZhCn => "zh-CN",
        })
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "zh" | "zh-cn" | "zh-hans" => Ok(Self::ZhCn),
            other => Err(AppError::invalid_input(format!(
                "unsupported locale '{other}' (expected en or zh-CN)"
            ))),
        }
    }
}

/// Collaborators whose failure is surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorFailure {
    /// Keypoint detector could not be initialized
    DetectorUnavailable,
    /// Camera could not be opened
    CameraUnavailable,
    /// Frame source stopped producing readable frames
    FrameSourceUnreadable,
}

/// Everything the coach can say
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "cue")]
pub enum Cue {
    /// Narrated once when a session starts
    Welcome,
    /// `up -> ready`
    Ready {
        /// Exercise being trained
        exercise: ExerciseKind,
    },
    /// `ready -> down`
    InPosition {
        /// Exercise being trained
        exercise: ExerciseKind,
    },
    /// `down -> up`
    RepCompleted {
        /// Exercise being trained
        exercise: ExerciseKind,
    },
    /// A posture rule fired
    Posture {
        /// The verdict
        posture: PostureCue,
    },
    /// Hold milestone reached
    HoldMilestone {
        /// Milestone in seconds
        seconds: u64,
    },
    /// Session stopped
    TrainingStopped,
    /// Voice muted
    VoiceMuted,
    /// Voice unmuted
    VoiceUnmuted,
    /// Exercise changed
    SwitchedTo {
        /// New exercise
        exercise: ExerciseKind,
    },
    /// External collaborator failed
    Failure {
        /// Which collaborator
        failure: CollaboratorFailure,
    },
}

impl Cue {
    /// Severity the cue is displayed and gated with
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Welcome
            | Self::Ready { .. }
            | Self::InPosition { .. }
            | Self::TrainingStopped
            | Self::VoiceMuted
            | Self::VoiceUnmuted
            | Self::SwitchedTo { .. } => Severity::Info,
            Self::RepCompleted { .. } | Self::HoldMilestone { .. } => Severity::Success,
            Self::Posture { posture } => posture.severity(),
            Self::Failure { .. } => Severity::Error,
        }
    }
}

/// Format whole seconds as `MM:SS` (minutes are not capped at 59)
#[must_use]
pub fn format_elapsed(elapsed_seconds: u64) -> String {
    format!("{:02}:{:02}", elapsed_seconds / 60, elapsed_seconds % 60)
}

/// Renders cues in one locale
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCatalog {
    locale: Locale,
}

impl MessageCatalog {
    /// Catalog for `locale`
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Active locale
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Narration text for `cue`
    #[must_use]
    pub fn render(&self, cue: Cue) -> String {
        match self.locale {
            Locale::En => english(cue),
            Locale::ZhCn => chinese(cue),
        }
    }

    /// Hold timer readout, e.g. `Duration: 01:05`
    #[must_use]
    pub fn hold_display(&self, elapsed_seconds: u64) -> String {
        let clock = format_elapsed(elapsed_seconds);
        match self.locale {
            Locale::En => format!("Duration: {clock}"),
            Locale::ZhCn => format!("时长: {clock}"),
        }
    }

    /// Rep counter readout, e.g. `Reps: 3`
    #[must_use]
    pub fn rep_display(&self, rep_count: u32) -> String {
        match self.locale {
            Locale::En => format!("Reps: {rep_count}"),
            Locale::ZhCn => format!("次数: {rep_count}"),
        }
    }

    /// Milestone acknowledgement label, e.g. `Milestone: 30s`
    #[must_use]
    pub fn milestone_display(&self, seconds: u64) -> String {
        match self.locale {
            Locale::En => format!("Milestone: {seconds}s"),
            Locale::ZhCn => format!("里程碑: {seconds}秒"),
        }
    }

    /// Localized exercise name
    #[must_use]
    pub fn exercise_name(&self, exercise: ExerciseKind) -> &'static str {
        match self.locale {
            Locale::En => exercise.display_name(),
            Locale::ZhCn => match exercise {
                ExerciseKind::SquatFront => "深蹲（正面）",
                ExerciseKind::SquatSide => "深蹲（侧面）",
                ExerciseKind::Deadlift => "硬拉",
                ExerciseKind::Pushup => "俯卧撑",
                ExerciseKind::Plank => "平板支撑",
            },
        }
    }
}

fn english(cue: Cue) -> String {
    let text = match cue {
        Cue::Welcome => "Form coach ready, start whenever you are",
        Cue::Ready { exercise } => match exercise {
            ExerciseKind::SquatFront => "Ready, start your squat (front view, watch your knees)",
            ExerciseKind::SquatSide => "Ready, start your squat (side view, keep your back straight)",
            ExerciseKind::Deadlift => "Ready, start your deadlift",
            ExerciseKind::Pushup => "Ready, start your push-up",
            ExerciseKind::Plank => "Ready, hold your plank",
        },
        Cue::InPosition { exercise } => match exercise {
            ExerciseKind::SquatFront | ExerciseKind::SquatSide => "Good depth, now stand up",
            ExerciseKind::Deadlift => "Ready to pull",
            ExerciseKind::Pushup => "Good depth, now push up",
            ExerciseKind::Plank => "In position",
        },
        Cue::RepCompleted { exercise } => match exercise {
            ExerciseKind::SquatFront | ExerciseKind::SquatSide => "Perfect! One squat completed",
            ExerciseKind::Deadlift => "Perfect! One deadlift completed",
            ExerciseKind::Pushup => "Perfect! One push-up completed",
            ExerciseKind::Plank => "Perfect!",
        },
        Cue::Posture { posture } => match posture {
            PostureCue::KneesCavingIn => "Don't let your knees cave in",
            PostureCue::KeepBackStraight => "Keep your back straight",
            PostureCue::KeepSpineNeutral => "Keep your spine neutral, don't lean too far",
            PostureCue::DontLockKnees => "Don't lock your knees at the top",
            PostureCue::KeepBodyStraight => "Keep your body in a straight line",
            PostureCue::ElbowsFlaring => "Don't flare your elbows out",
            PostureCue::PlankGoodForm => "Great form! Hold it",
            PostureCue::HipsTooHigh => "Lower your hips",
            PostureCue::HipsSagging => "Don't let your hips sag",
            PostureCue::ElbowsUnderShoulders => "Keep elbows at 90 degrees under your shoulders",
            PostureCue::HeadRaised => "Don't look up, keep your neck neutral",
            PostureCue::HeadDropped => "Don't drop your head, keep your neck neutral",
        },
        Cue::HoldMilestone { seconds } => {
            return format!("{seconds} seconds held, keep going!");
        }
        Cue::TrainingStopped => "Training stopped",
        Cue::VoiceMuted => "Voice feedback off",
        Cue::VoiceUnmuted => "Voice feedback on",
        Cue::SwitchedTo { exercise } => {
            return format!("Switched to {} training", exercise.display_name());
        }
        Cue::Failure { failure } => match failure {
            CollaboratorFailure::DetectorUnavailable => {
                "Initialization failed, please restart and try again"
            }
            CollaboratorFailure::CameraUnavailable => {
                "Cannot access the camera, please check permissions"
            }
            CollaboratorFailure::FrameSourceUnreadable => {
                "Video source error, please restart and try again"
            }
        },
    };
    text.to_owned()
}

fn chinese(cue: Cue) -> String {
    let text = match cue {
        Cue::Welcome => "StartFitter已就绪，随时可以开始训练",
        Cue::Ready { exercise } => match exercise {
            ExerciseKind::SquatFront => "准备就绪，请开始深蹲（正面视角 - 专注膝盖内扣）",
            ExerciseKind::SquatSide => "准备就绪，请开始深蹲（侧面视角 - 专注背部挺直）",
            ExerciseKind::Deadlift => "准备就绪，请开始硬拉",
            ExerciseKind::Pushup => "准备就绪，请开始俯卧撑",
            ExerciseKind::Plank => "准备就绪，请保持平板支撑",
        },
        Cue::InPosition { exercise } => match exercise {
            ExerciseKind::SquatFront | ExerciseKind::SquatSide => "深蹲到位，准备起身",
            ExerciseKind::Deadlift => "准备拉起",
            ExerciseKind::Pushup => "俯卧撑到位，准备撑起",
            ExerciseKind::Plank => "姿势到位",
        },
        Cue::RepCompleted { exercise } => match exercise {
            ExerciseKind::SquatFront | ExerciseKind::SquatSide => "完美！完成一次深蹲",
            ExerciseKind::Deadlift => "完美！完成一次硬拉",
            ExerciseKind::Pushup => "完美！完成一次俯卧撑",
            ExerciseKind::Plank => "完美！",
        },
        Cue::Posture { posture } => match posture {
            PostureCue::KneesCavingIn => "注意膝盖不要内扣",
            PostureCue::KeepBackStraight => "保持背部挺直",
            PostureCue::KeepSpineNeutral => "保持背部中立，不要过度前倾或后仰",
            PostureCue::DontLockKnees => "完成动作时膝盖不要完全锁定",
            PostureCue::KeepBodyStraight => "保持身体呈直线，不要塌腰或撅臀",
            PostureCue::ElbowsFlaring => "手肘不要向外展开过大",
            PostureCue::PlankGoodForm => "姿势很棒！保持住",
            PostureCue::HipsTooHigh => "臀部不要抬太高",
            PostureCue::HipsSagging => "注意不要塌腰",
            PostureCue::ElbowsUnderShoulders => "手肘保持90度，位于肩膀正下方",
            PostureCue::HeadRaised => "不要抬头，保持颈部中立",
            PostureCue::HeadDropped => "不要低头，保持颈部中立",
        },
        Cue::HoldMilestone { seconds } => {
            return format!("已经坚持{seconds}秒了，继续加油！");
        }
        Cue::TrainingStopped => "训练已停止",
        Cue::VoiceMuted => "语音反馈已关闭",
        Cue::VoiceUnmuted => "语音反馈已开启",
        Cue::SwitchedTo { exercise } => {
            let name = MessageCatalog::new(Locale::ZhCn).exercise_name(exercise);
            return format!("已切换到{name}训练");
        }
        Cue::Failure { failure } => match failure {
            CollaboratorFailure::DetectorUnavailable => "初始化失败，请刷新页面重试",
            CollaboratorFailure::CameraUnavailable => "无法访问摄像头，请检查权限设置",
            CollaboratorFailure::FrameSourceUnreadable => "视频源错误，请刷新页面重试",
        },
    };
    text.to_owned()
}

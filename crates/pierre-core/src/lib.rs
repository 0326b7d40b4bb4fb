// ABOUTME: Core types and constants for the Pierre form coach
// ABOUTME: Foundation crate with error handling, landmark models, exercise kinds, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the Pierre form
//! coach. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Landmark indices and the empirically tuned form thresholds
//! - **models**: Landmarks, frames, exercise kinds, repetition states, and feedback events

/// Unified error handling system with standard error codes
pub mod errors;

/// Landmark layout and form-analysis constants organized by domain
pub mod constants;

/// Core data models (`Frame`, `ExerciseKind`, `FeedbackEvent`, etc.)
pub mod models;

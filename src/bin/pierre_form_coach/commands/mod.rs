// ABOUTME: Command implementations for the pierre-form-coach CLI
// ABOUTME: Exercise listing and frame replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod exercises;
pub mod replay;

// ABOUTME: Common benchmark utilities and fixtures for the frame pipeline benchmarks
// ABOUTME: Re-exports deterministic landmark frame generators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Common benchmark utilities and fixtures.

pub mod fixtures;

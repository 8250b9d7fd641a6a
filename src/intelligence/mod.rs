// ABOUTME: Nutrition intelligence module for derived health metrics
// ABOUTME: Hosts the pure biometric target calculations used by the plan pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Nutrition intelligence
//!
//! Pure, deterministic calculations over a validated [`UserProfile`]. Nothing
//! in this module performs I/O.
//!
//! [`UserProfile`]: crate::models::UserProfile

pub mod biometrics;

pub use biometrics::{compute_targets, MacroSplit};

// ABOUTME: Configuration management module for environment-driven settings
// ABOUTME: Re-exports typed per-collaborator configuration structs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration management
//!
//! Environment-only configuration: no config files, every knob is an
//! environment variable with a sensible default, secrets excepted.

pub mod environment;

pub use environment::{
    EmbeddingConfig, LlmConfig, NutritionConfig, RecipeCatalogConfig, VectorIndexConfig,
};

// ABOUTME: Main library entry point for the nutrition-plan generation engine
// ABOUTME: Wires biometric targets, RAG retrieval, recipe ranking, and plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Nutriplan
//!
//! A personalized nutrition-plan generation engine. One validated request
//! produces one plan: deterministic health-metric computation, semantic
//! retrieval over a curated nutrition-knowledge corpus, multi-stage recipe
//! acquisition with graceful degradation, and prompt assembly feeding a
//! single text-generation call.
//!
//! ## Architecture
//!
//! - **Intelligence**: pure biometric target calculations (BMI, BMR, TDEE,
//!   macro splits)
//! - **Knowledge**: embedding + vector-index retrieval, best-effort by design
//! - **Recipes**: catalog search and nutrition enrichment with a static
//!   fallback dataset and protein-descending ranking
//! - **LLM**: pluggable text-generation providers behind one trait
//! - **Pipeline**: the orchestrator defining the single external contract
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutriplan::config::NutritionConfig;
//! use nutriplan::models::PlanRequest;
//! use nutriplan::pipeline::NutritionPlanner;
//!
//! #[tokio::main]
//! async fn main() -> nutriplan::errors::AppResult<()> {
//!     let config = NutritionConfig::from_env()?;
//!     let planner = NutritionPlanner::from_config(&config)?;
//!
//!     let request: PlanRequest = serde_json::from_str(
//!         r#"{"age": 30, "gender": "male", "weight": 180, "height": 70,
//!             "activityLevel": "moderate", "goal": "lose"}"#,
//!     )
//!     .map_err(|e| nutriplan::errors::AppError::invalid_input(e.to_string()))?;
//!
//!     let result = planner.generate_plan(&request).await?;
//!     println!("{}", result.plan);
//!     Ok(())
//! }
//! ```

/// Configuration management and environment parsing
pub mod config;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Pure biometric calculations for energy and macro targets
pub mod intelligence;

/// Semantic knowledge retrieval over the nutrition corpus
pub mod knowledge;

/// LLM provider abstraction for plan generation
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Common data models for nutrition planning
pub mod models;

/// Pipeline orchestration and prompt assembly
pub mod pipeline;

/// Recipe acquisition with staged fallback and ranking
pub mod recipes;

// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables and typed per-collaborator configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Environment-based configuration management
//!
//! Configuration is environment-only: each external collaborator gets a typed
//! config struct with defaulted base URLs, models, and timeouts, while secrets
//! are required and fail fast at startup with [`ErrorCode::ConfigMissing`].
//!
//! [`ErrorCode::ConfigMissing`]: crate::errors::ErrorCode::ConfigMissing

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

/// Read a required environment variable
fn require_env(var: &str) -> AppResult<String> {
    env::var(var).map_err(|_| AppError::config_missing(var))
}

/// Read an environment variable with a default
fn env_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_owned())
}

/// Read a numeric environment variable with a default; invalid values fail loudly
fn env_parse_or<T>(var: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
{
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("{var} has an invalid value: {raw}"))),
        Err(_) => Ok(default),
    }
}

/// Embedding service configuration (OpenAI embeddings API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// API key for the embedding service
    pub api_key: String,
    /// Base URL for the embeddings API
    pub base_url: String,
    /// Embedding model identifier
    pub model: String,
    /// Output vector dimensionality; must match the vector index
    pub dimensions: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl EmbeddingConfig {
    /// Load from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            api_key: require_env("OPENAI_API_KEY")?,
            base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            model: env_or("EMBEDDING_MODEL", "text-embedding-3-small"),
            dimensions: env_parse_or("EMBEDDING_DIMENSIONS", 1024)?,
            timeout_secs: env_parse_or("EMBEDDING_TIMEOUT_SECS", 30)?,
        })
    }
}

/// Vector index configuration (Pinecone data plane)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndexConfig {
    /// API key for the vector index
    pub api_key: String,
    /// Data-plane host URL of the index holding the knowledge corpus
    pub index_host: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl VectorIndexConfig {
    /// Load from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `PINECONE_API_KEY` or `PINECONE_INDEX_HOST` is not set.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            api_key: require_env("PINECONE_API_KEY")?,
            index_host: require_env("PINECONE_INDEX_HOST")?,
            timeout_secs: env_parse_or("PINECONE_TIMEOUT_SECS", 30)?,
        })
    }
}

/// Recipe catalog configuration (Spoonacular API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCatalogConfig {
    /// API key for the recipe catalog
    pub api_key: String,
    /// Base URL for the catalog API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RecipeCatalogConfig {
    /// Load from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `SPOONACULAR_API_KEY` is not set.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            api_key: require_env("SPOONACULAR_API_KEY")?,
            base_url: env_or("SPOONACULAR_BASE_URL", "https://api.spoonacular.com"),
            timeout_secs: env_parse_or("SPOONACULAR_TIMEOUT_SECS", 30)?,
        })
    }
}

/// Text-generation service configuration (Gemini)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key for the generation service
    pub api_key: String,
    /// Model identifier used for plan generation
    pub model: String,
    /// Request timeout in seconds; generation is the slowest external call
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Load from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            api_key: require_env("GEMINI_API_KEY")?,
            model: env_or("GEMINI_MODEL", "gemini-2.5-flash-lite"),
            timeout_secs: env_parse_or("GEMINI_TIMEOUT_SECS", 120)?,
        })
    }
}

/// Complete configuration for the nutrition-plan pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionConfig {
    pub embedding: EmbeddingConfig,
    pub vector_index: VectorIndexConfig,
    pub recipe_catalog: RecipeCatalogConfig,
    pub llm: LlmConfig,
}

impl NutritionConfig {
    /// Load the full pipeline configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any required secret is missing, so misconfiguration
    /// surfaces at startup rather than at call time.
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            embedding: EmbeddingConfig::from_env()?,
            vector_index: VectorIndexConfig::from_env()?,
            recipe_catalog: RecipeCatalogConfig::from_env()?,
            llm: LlmConfig::from_env()?,
        };

        info!(
            embedding_model = %config.embedding.model,
            llm_model = %config.llm.model,
            "Pipeline configuration loaded"
        );

        Ok(config)
    }
}

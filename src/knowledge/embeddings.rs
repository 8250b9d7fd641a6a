// ABOUTME: Embedding service client for converting text to similarity vectors
// ABOUTME: Implements the EmbeddingProvider trait against the OpenAI embeddings API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Embedding Provider
//!
//! Converts text into fixed-length numeric vectors for similarity search.
//! The knowledge corpus and every search query must be embedded with the same
//! model and dimensionality, otherwise cosine scores are meaningless.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EmbeddingConfig;
use crate::errors::{AppError, AppResult};

/// Connection timeout for the embeddings API
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Embedding service contract
///
/// `embed` returns one vector per call; dimensionality is fixed by the
/// implementation's configuration.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Convert text into an embedding vector
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

/// Request body for the OpenAI embeddings endpoint
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
    dimensions: u32,
}

/// Response from the OpenAI embeddings endpoint
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// OpenAI embeddings API client
pub struct OpenAiEmbeddingClient {
    config: EmbeddingConfig,
    client: Client,
}

impl OpenAiEmbeddingClient {
    /// Create a new embeddings client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: EmbeddingConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingClient {
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        if text.is_empty() {
            return Err(AppError::invalid_input("Embedding input cannot be empty"));
        }

        let url = format!("{}/embeddings", self.config.base_url);
        let request = EmbeddingRequest {
            model: &self.config.model,
            input: text,
            dimensions: self.config.dimensions,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::external_service("OpenAI embeddings", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "OpenAI embeddings",
                format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            AppError::external_service("OpenAI embeddings", format!("JSON parse error: {e}"))
        })?;

        let vector = embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                AppError::external_service("OpenAI embeddings", "Empty embedding response")
            })?;

        debug!(dimensions = vector.len(), "Embedded query text");

        Ok(vector)
    }
}

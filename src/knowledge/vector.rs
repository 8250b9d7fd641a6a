// ABOUTME: Vector index client for nearest-neighbor search over the knowledge corpus
// ABOUTME: Implements the VectorIndex trait against the Pinecone data-plane API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Vector Index
//!
//! Stores `(vector, metadata)` pairs and answers top-K nearest-neighbor
//! queries by cosine similarity. The query path is used on every pipeline run;
//! the upsert path only by the `seed-knowledge` binary.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::VectorIndexConfig;
use crate::errors::{AppError, AppResult};

/// Connection timeout for the vector index
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// A single nearest-neighbor match
#[derive(Debug, Clone, Deserialize)]
pub struct VectorMatch {
    /// Record ID within the index
    pub id: String,
    /// Cosine similarity score in `[-1, 1]`
    pub score: f32,
    /// Metadata stored alongside the vector
    pub metadata: Option<serde_json::Value>,
}

/// A record to be stored in the index
#[derive(Debug, Clone, Serialize)]
pub struct VectorRecord {
    /// Record ID within the index
    pub id: String,
    /// Embedding vector
    pub values: Vec<f32>,
    /// Metadata stored alongside the vector
    pub metadata: serde_json::Value,
}

/// Vector index contract
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return the `top_k` nearest neighbors of `vector` by cosine similarity
    async fn query(&self, vector: &[f32], top_k: usize) -> AppResult<Vec<VectorMatch>>;

    /// Insert or overwrite records in the index
    async fn upsert(&self, records: &[VectorRecord]) -> AppResult<()>;
}

/// Query request for the Pinecone data plane
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

/// Query response from the Pinecone data plane
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<VectorMatch>,
}

/// Upsert request for the Pinecone data plane
#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
}

/// Pinecone vector index client
pub struct PineconeIndex {
    config: VectorIndexConfig,
    client: Client,
}

impl PineconeIndex {
    /// Create a new index client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: VectorIndexConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Run a POST request against the index host and check the status
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> AppResult<reqwest::Response> {
        let url = format!("{}{path}", self.config.index_host);
        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::external_service("Pinecone", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "Pinecone",
                format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        Ok(response)
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, vector: &[f32], top_k: usize) -> AppResult<Vec<VectorMatch>> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let response = self.post_json("/query", &request).await?;
        let query_response: QueryResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service("Pinecone", format!("JSON parse error: {e}")))?;

        debug!(matches = query_response.matches.len(), "Vector query complete");

        Ok(query_response.matches)
    }

    async fn upsert(&self, records: &[VectorRecord]) -> AppResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let request = UpsertRequest { vectors: records };
        self.post_json("/vectors/upsert", &request).await?;

        debug!(records = records.len(), "Upserted vector records");

        Ok(())
    }
}

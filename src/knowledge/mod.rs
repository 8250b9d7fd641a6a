// ABOUTME: Knowledge retrieval stage performing semantic search over the nutrition corpus
// ABOUTME: Builds goal-aware queries, embeds them, and maps index matches to snippets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Knowledge Retriever
//!
//! The retrieval half of the RAG flow: build one natural-language search query
//! from the user's goal, diet, and allergies; embed it; query the vector index
//! for the top-K most similar corpus entries; and map each match to a
//! [`KnowledgeSnippet`].
//!
//! Research augmentation is best-effort by design: any embedding or index
//! failure degrades to an empty snippet list and never aborts the pipeline
//! run.

pub mod embeddings;
pub mod vector;

pub use embeddings::{EmbeddingProvider, OpenAiEmbeddingClient};
pub use vector::{PineconeIndex, VectorIndex, VectorMatch, VectorRecord};

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::{DietaryPreference, Goal, KnowledgeSnippet};

/// Default number of snippets retrieved per run
pub const DEFAULT_TOP_K: usize = 3;

/// Build the semantic search query for a user's goal and restrictions
///
/// The query folds in goal-specific key topics so the nearest neighbors lean
/// toward articles that matter for this plan, plus the diet and allergy terms
/// verbatim.
#[must_use]
pub fn build_search_query(goal: Goal, diet: DietaryPreference, allergies: &[String]) -> String {
    let goal_keywords = match goal {
        Goal::Lose => "weight loss, fat burning, calorie deficit",
        Goal::Gain => "muscle gain, weight gain, calorie surplus, protein",
        Goal::Maintain => "weight maintenance, balanced diet, healthy eating",
    };

    let diet_keywords = match diet {
        DietaryPreference::None => "",
        other => other.fallback_key(),
    };

    let allergy_keywords = allergies.join(", ");

    format!(
        "nutrition plan for {}. Key topics: {goal_keywords}. {diet_keywords} {allergy_keywords}",
        goal.as_str()
    )
}

/// Metadata stored with each corpus vector
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SnippetMetadata {
    title: String,
    content: String,
    category: String,
    source: String,
    url: Option<String>,
}

/// Map an index match to a snippet, tolerating missing metadata fields
fn snippet_from_match(entry: VectorMatch) -> KnowledgeSnippet {
    let metadata: SnippetMetadata = entry
        .metadata
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default();

    KnowledgeSnippet {
        title: metadata.title,
        content: metadata.content,
        category: metadata.category,
        source: metadata.source,
        url: metadata.url,
        relevance_score: entry.score,
    }
}

/// Semantic retriever over the nutrition-knowledge corpus
pub struct KnowledgeRetriever {
    embeddings: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    top_k: usize,
}

impl KnowledgeRetriever {
    /// Create a retriever with the default top-K
    #[must_use]
    pub fn new(embeddings: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            embeddings,
            index,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override the number of snippets retrieved per run
    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Retrieve up to `top_k` relevant snippets for this goal and restrictions
    ///
    /// Never fails: embedding or index errors are logged and degrade to an
    /// empty list, leaving the rest of the pipeline to proceed without
    /// research augmentation.
    pub async fn retrieve(
        &self,
        goal: Goal,
        diet: DietaryPreference,
        allergies: &[String],
    ) -> Vec<KnowledgeSnippet> {
        match self.try_retrieve(goal, diet, allergies).await {
            Ok(snippets) => snippets,
            Err(error) => {
                warn!(%error, "Knowledge retrieval failed; continuing without snippets");
                Vec::new()
            }
        }
    }

    async fn try_retrieve(
        &self,
        goal: Goal,
        diet: DietaryPreference,
        allergies: &[String],
    ) -> crate::errors::AppResult<Vec<KnowledgeSnippet>> {
        let query = build_search_query(goal, diet, allergies);
        debug!(%query, top_k = self.top_k, "Searching nutrition knowledge");

        let vector = self.embeddings.embed(&query).await?;
        let matches = self.index.query(&vector, self.top_k).await?;

        Ok(matches.into_iter().map(snippet_from_match).collect())
    }
}

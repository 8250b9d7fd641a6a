// ABOUTME: Shared fake collaborators for integration tests
// ABOUTME: Programmable embedding, vector index, recipe catalog, and LLM fakes with call counters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use nutriplan::errors::{AppError, AppResult};
use nutriplan::knowledge::{EmbeddingProvider, VectorIndex, VectorMatch, VectorRecord};
use nutriplan::llm::{ChatRequest, ChatResponse, LlmProvider};
use nutriplan::models::RecipeNutrition;
use nutriplan::recipes::{RecipeCandidate, RecipeCatalog, RecipeSearchFilters};

/// Fake embedding provider returning a fixed vector
#[derive(Default)]
pub struct FakeEmbedding {
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeEmbedding {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedding {
    async fn embed(&self, _text: &str) -> AppResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::external_service("embeddings", "unavailable"));
        }
        Ok(vec![0.1; 1024])
    }
}

/// Fake vector index returning preprogrammed matches
#[derive(Default)]
pub struct FakeIndex {
    pub matches: Vec<VectorMatch>,
    pub fail: bool,
    pub last_top_k: AtomicUsize,
}

impl FakeIndex {
    pub fn with_matches(matches: Vec<VectorMatch>) -> Self {
        Self {
            matches,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn query(&self, _vector: &[f32], top_k: usize) -> AppResult<Vec<VectorMatch>> {
        self.last_top_k.store(top_k, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::external_service("vector index", "unavailable"));
        }
        Ok(self
            .matches
            .iter()
            .take(top_k)
            .map(|m| VectorMatch {
                id: m.id.clone(),
                score: m.score,
                metadata: m.metadata.clone(),
            })
            .collect())
    }

    async fn upsert(&self, _records: &[VectorRecord]) -> AppResult<()> {
        Ok(())
    }
}

/// Build an index match with typical snippet metadata
pub fn knowledge_match(id: &str, score: f32) -> VectorMatch {
    VectorMatch {
        id: id.to_owned(),
        score,
        metadata: Some(serde_json::json!({
            "title": format!("{id} basics"),
            "content": format!("Everything about {id}."),
            "category": "nutrition-science",
            "source": "Wikipedia",
        })),
    }
}

/// Fake recipe catalog with programmable failure modes
#[derive(Default)]
pub struct FakeCatalog {
    pub candidates: Vec<RecipeCandidate>,
    pub nutrition: HashMap<u64, RecipeNutrition>,
    /// When set, `search_recipes` fails with an external-service error
    pub search_fails: bool,
    /// After this many successful nutrition calls, further calls are rate-limited
    pub rate_limit_after: Option<usize>,
    /// Nutrition fetches for these IDs fail with a non-rate-limit error
    pub broken_ids: Vec<u64>,
    pub search_calls: AtomicUsize,
    pub nutrition_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn with_candidates(candidates: Vec<(u64, &str, RecipeNutrition)>) -> Self {
        Self {
            candidates: candidates
                .iter()
                .map(|(id, title, _)| RecipeCandidate {
                    id: *id,
                    title: (*title).to_owned(),
                })
                .collect(),
            nutrition: candidates
                .into_iter()
                .map(|(id, _, nutrition)| (id, nutrition))
                .collect(),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing_search() -> Self {
        Self {
            search_fails: true,
            ..Self::default()
        }
    }

    pub fn search_call_count(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeCatalog for FakeCatalog {
    async fn search_recipes(
        &self,
        _filters: &RecipeSearchFilters,
    ) -> AppResult<Vec<RecipeCandidate>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.search_fails {
            return Err(AppError::external_service("catalog", "unavailable"));
        }
        Ok(self.candidates.clone())
    }

    async fn fetch_nutrition(&self, recipe_id: u64) -> AppResult<RecipeNutrition> {
        let call = self.nutrition_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.rate_limit_after {
            if call >= limit {
                return Err(AppError::rate_limited("catalog"));
            }
        }
        if self.broken_ids.contains(&recipe_id) {
            return Err(AppError::external_service("catalog", "boom"));
        }
        self.nutrition
            .get(&recipe_id)
            .copied()
            .ok_or_else(|| AppError::external_service("catalog", "unknown recipe"))
    }
}

/// Fake LLM provider recording the last prompt it saw
pub struct FakeLlm {
    pub response: String,
    pub fail: bool,
    pub calls: AtomicUsize,
    pub last_prompt: Mutex<Option<String>>,
    pub last_request: Mutex<Option<ChatRequest>>,
}

impl Default for FakeLlm {
    fn default() -> Self {
        Self {
            response: "# Your Personalized Nutrition Plan".to_owned(),
            fail: false,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_request: Mutex::new(None),
        }
    }
}

impl FakeLlm {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompt(&self) -> String {
        self.last_prompt.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn default_model(&self) -> &str {
        "fake-model"
    }

    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = request.messages.first().map(|m| m.content.clone());
        *self.last_request.lock().unwrap() = Some(request.clone());
        if self.fail {
            return Err(AppError::external_service("llm", "request timed out"));
        }
        Ok(ChatResponse {
            content: self.response.clone(),
            model: "fake-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.fail)
    }
}

/// Complete nutrition with the given protein amount
pub fn nutrition(protein: f64) -> RecipeNutrition {
    RecipeNutrition {
        calories: 450.0,
        protein,
        carbohydrates: 40.0,
        fat: 15.0,
    }
}

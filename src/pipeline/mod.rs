// ABOUTME: Pipeline orchestrator sequencing validation, targets, retrieval, and generation
// ABOUTME: Defines the single external contract: one PlanRequest in, one PlanResult out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Nutrition Plan Pipeline
//!
//! Sequences one plan-generation run: validate input, compute targets,
//! retrieve knowledge and recipes concurrently, assemble the prompt, and make
//! the single generation call.
//!
//! The two retrieval sub-tasks are independent and joined before assembly;
//! each applies its own internal fallback and can never fail the run. Only
//! input validation and generation failures cross this boundary as errors,
//! and a success always carries the complete targets block.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutriplan::config::NutritionConfig;
//! use nutriplan::models::PlanRequest;
//! use nutriplan::pipeline::NutritionPlanner;
//!
//! # async fn example(request: PlanRequest) -> nutriplan::errors::AppResult<()> {
//! let config = NutritionConfig::from_env()?;
//! let planner = NutritionPlanner::from_config(&config)?;
//! let result = planner.generate_plan(&request).await?;
//! println!("{}", result.plan);
//! # Ok(())
//! # }
//! ```

pub mod prompt;

pub use prompt::{build_plan_prompt, MAX_PROMPT_RECIPES, MAX_PROMPT_SNIPPETS};

use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::NutritionConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::knowledge::{
    EmbeddingProvider, KnowledgeRetriever, OpenAiEmbeddingClient, PineconeIndex, VectorIndex,
};
use crate::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
use crate::models::{PlanRequest, PlanResult};
use crate::recipes::{RecipeCatalog, RecipeProvider, RecipeQuery, SpoonacularClient};
use crate::intelligence::compute_targets;

/// Maximum tokens requested from the generation service per plan
pub const PLAN_MAX_OUTPUT_TOKENS: u32 = 8000;

/// Sampling temperature for plan generation
pub const PLAN_TEMPERATURE: f32 = 0.7;

/// Nucleus sampling parameter for plan generation
pub const PLAN_TOP_P: f32 = 0.9;

/// Orchestrates one nutrition-plan run end to end
///
/// All collaborators are constructor-injected trait objects, so the pipeline
/// runs against fakes in tests and real API clients in production. Each run
/// is self-contained: no state is shared across concurrent runs.
pub struct NutritionPlanner {
    retriever: KnowledgeRetriever,
    recipes: RecipeProvider,
    llm: Arc<dyn LlmProvider>,
}

impl NutritionPlanner {
    /// Create a planner from injected collaborators
    #[must_use]
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        catalog: Arc<dyn RecipeCatalog>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            retriever: KnowledgeRetriever::new(embeddings, index),
            recipes: RecipeProvider::new(catalog),
            llm,
        }
    }

    /// Create a planner wired to the production API clients
    ///
    /// # Errors
    ///
    /// Returns an error if any HTTP client cannot be constructed.
    pub fn from_config(config: &NutritionConfig) -> AppResult<Self> {
        Ok(Self::new(
            Arc::new(OpenAiEmbeddingClient::new(config.embedding.clone())?),
            Arc::new(PineconeIndex::new(config.vector_index.clone())?),
            Arc::new(SpoonacularClient::new(config.recipe_catalog.clone())?),
            Arc::new(GeminiProvider::new(&config.llm)?),
        ))
    }

    /// Generate a personalized daily nutrition plan for one request
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField`/`ValueOutOfRange` when validation fails
    /// (before any external call) and `GenerationFailed` when the generation
    /// service errors or times out. Retrieval failures never surface here.
    #[instrument(skip_all, fields(run_id = tracing::field::Empty))]
    pub async fn generate_plan(&self, request: &PlanRequest) -> AppResult<PlanResult> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));

        let profile = request.validate().map_err(|e| e.with_run_id(run_id))?;
        let targets = compute_targets(&profile);

        info!(
            goal = profile.goal.as_str(),
            target_calories = targets.target_calories,
            bmi = targets.bmi,
            "Computed nutrition targets"
        );

        let recipe_query = RecipeQuery::new(
            profile.dietary_preferences,
            profile.allergies.clone(),
            targets.target_calories,
        );

        // Independent retrievals; join before assembly. Both degrade
        // internally and cannot fail the run.
        let (snippets, recipes) = tokio::join!(
            self.retriever.retrieve(
                profile.goal,
                profile.dietary_preferences,
                &profile.allergies
            ),
            self.recipes.fetch_ranked(&recipe_query),
        );

        info!(
            snippets = snippets.len(),
            recipes = recipes.len(),
            "Retrieval complete"
        );

        let prompt = build_plan_prompt(&profile, &targets, &snippets, &recipes);

        let chat_request = ChatRequest::new(vec![ChatMessage::user(prompt)])
            .with_temperature(PLAN_TEMPERATURE)
            .with_max_tokens(PLAN_MAX_OUTPUT_TOKENS)
            .with_top_p(PLAN_TOP_P);

        let response = self.llm.complete(&chat_request).await.map_err(|error| {
            // Whatever the provider reports, the caller sees a generation
            // failure with the original error chained for diagnostics.
            if error.code == ErrorCode::GenerationFailed {
                error.with_run_id(run_id)
            } else {
                AppError::generation(format!("Text generation failed: {}", error.message))
                    .with_run_id(run_id)
                    .with_source(error)
            }
        })?;

        info!(plan_chars = response.content.len(), "Plan generated");

        Ok(PlanResult {
            plan: response.content,
            metadata: targets,
        })
    }
}

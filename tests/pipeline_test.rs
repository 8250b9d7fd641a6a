// ABOUTME: End-to-end pipeline tests with fake collaborators
// ABOUTME: Covers the success contract, validation short-circuit, and fatal generation failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{knowledge_match, nutrition, FakeCatalog, FakeEmbedding, FakeIndex, FakeLlm};
use nutriplan::errors::ErrorCode;
use nutriplan::intelligence::compute_targets;
use nutriplan::models::{ActivityLevel, DietaryPreference, Gender, Goal, PlanRequest};
use nutriplan::pipeline::{NutritionPlanner, PLAN_MAX_OUTPUT_TOKENS};

fn valid_request() -> PlanRequest {
    PlanRequest {
        age: Some(30),
        gender: Some(Gender::Male),
        weight: Some(180.0),
        height: Some(70.0),
        activity_level: Some(ActivityLevel::Moderate),
        goal: Some(Goal::Lose),
        dietary_preferences: DietaryPreference::None,
        ..PlanRequest::default()
    }
}

struct Fakes {
    embedding: Arc<FakeEmbedding>,
    index: Arc<FakeIndex>,
    catalog: Arc<FakeCatalog>,
    llm: Arc<FakeLlm>,
}

impl Fakes {
    fn healthy() -> Self {
        Self {
            embedding: Arc::new(FakeEmbedding::default()),
            index: Arc::new(FakeIndex::with_matches(vec![
                knowledge_match("protein", 0.9),
                knowledge_match("fiber", 0.8),
            ])),
            catalog: Arc::new(FakeCatalog::with_candidates(vec![
                (1, "Grilled Chicken Bowl", nutrition(42.0)),
                (2, "Lentil Soup", nutrition(18.0)),
            ])),
            llm: Arc::new(FakeLlm::default()),
        }
    }

    fn planner(&self) -> NutritionPlanner {
        NutritionPlanner::new(
            self.embedding.clone(),
            self.index.clone(),
            self.catalog.clone(),
            self.llm.clone(),
        )
    }
}

#[tokio::test]
async fn test_success_returns_plan_and_complete_metadata() {
    let fakes = Fakes::healthy();
    let planner = fakes.planner();

    let result = planner.generate_plan(&valid_request()).await.unwrap();

    assert_eq!(result.plan, "# Your Personalized Nutrition Plan");

    let expected = compute_targets(&valid_request().validate().unwrap());
    assert_eq!(result.metadata, expected);
    assert_eq!(fakes.llm.call_count(), 1);
}

#[tokio::test]
async fn test_prompt_carries_retrieved_context_and_sampling_config() {
    let fakes = Fakes::healthy();
    let planner = fakes.planner();

    planner.generate_plan(&valid_request()).await.unwrap();

    let prompt = fakes.llm.prompt();
    assert!(prompt.contains("protein basics"));
    assert!(prompt.contains("Grilled Chicken Bowl"));
    assert!(prompt.contains("Target Daily Calories: ~2263 kcal"));

    let request = fakes.llm.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.max_tokens, Some(PLAN_MAX_OUTPUT_TOKENS));
    assert!((request.temperature.unwrap() - 0.7).abs() < f32::EPSILON);
    assert!((request.top_p.unwrap() - 0.9).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_validation_failure_short_circuits() {
    let fakes = Fakes::healthy();
    let planner = fakes.planner();

    let mut request = valid_request();
    request.goal = None;
    request.height = None;

    let error = planner.generate_plan(&request).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert!(error.message.contains("goal"));
    assert!(error.message.contains("height"));

    // No external call may happen before validation passes
    assert_eq!(fakes.embedding.call_count(), 0);
    assert_eq!(fakes.catalog.search_call_count(), 0);
    assert_eq!(fakes.llm.call_count(), 0);
}

#[tokio::test]
async fn test_generation_failure_is_fatal_with_no_metadata() {
    let fakes = Fakes {
        llm: Arc::new(FakeLlm::failing()),
        ..Fakes::healthy()
    };
    let planner = fakes.planner();

    let result = planner.generate_plan(&valid_request()).await;

    let error = result.unwrap_err();
    assert_eq!(error.code, ErrorCode::GenerationFailed);
    assert!(error.source.is_some());
}

#[tokio::test]
async fn test_degraded_retrieval_still_produces_a_plan() {
    // Embedding service down, recipe catalog down: both stages degrade
    let fakes = Fakes {
        embedding: Arc::new(FakeEmbedding::failing()),
        catalog: Arc::new(FakeCatalog::failing_search()),
        ..Fakes::healthy()
    };
    let planner = fakes.planner();

    let result = planner.generate_plan(&valid_request()).await.unwrap();

    assert!(!result.plan.is_empty());

    // The prompt falls back to the static recipe dataset
    let prompt = fakes.llm.prompt();
    assert!(prompt.contains("Grilled Chicken with Quinoa and Veggies"));
}

#[tokio::test]
async fn test_concurrent_runs_are_independent() {
    let fakes = Fakes::healthy();
    let planner = fakes.planner();

    let mut gain_request = valid_request();
    gain_request.goal = Some(Goal::Gain);

    let lose_request = valid_request();
    let (lose, gain) = tokio::join!(
        planner.generate_plan(&lose_request),
        planner.generate_plan(&gain_request),
    );

    let lose = lose.unwrap();
    let gain = gain.unwrap();
    assert_eq!(lose.metadata.target_calories, lose.metadata.tdee - 500);
    assert_eq!(gain.metadata.target_calories, gain.metadata.tdee + 500);
    assert_eq!(fakes.llm.call_count(), 2);
}

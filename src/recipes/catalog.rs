// ABOUTME: Recipe catalog API client for candidate search and nutrition enrichment
// ABOUTME: Implements the RecipeCatalog trait against the Spoonacular API with rate-limit mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Recipe Catalog Client
//!
//! Client for the Spoonacular recipe API: `complexSearch` for diet/calorie
//! filtered candidates and `nutritionWidget.json` for per-recipe macro
//! enrichment. The widget endpoint returns amounts as strings like `"15g"`,
//! so numeric parsing is defensive: anything unparseable becomes `0` and the
//! provider's completeness filter discards the recipe.
//!
//! Quota exhaustion (HTTP 402) and throttling (HTTP 429) map to
//! [`ErrorCode::ExternalRateLimited`] so the enrichment loop can stop early
//! instead of burning the remaining quota.
//!
//! [`ErrorCode::ExternalRateLimited`]: crate::errors::ErrorCode::ExternalRateLimited

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::RecipeCatalogConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::RecipeNutrition;

/// Connection timeout for the catalog API
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// A candidate recipe returned by catalog search, before enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCandidate {
    /// Catalog-assigned recipe ID
    pub id: u64,
    pub title: String,
}

/// Search filters for candidate retrieval
#[derive(Debug, Clone, Default)]
pub struct RecipeSearchFilters {
    /// Catalog diet token (e.g. "vegetarian", "ketogenic"); unfiltered when `None`
    pub diet: Option<String>,
    /// Intolerance tokens forwarded to the catalog
    pub intolerances: Vec<String>,
    /// Upper bound on per-recipe calories
    pub max_calories: u32,
    /// Maximum number of candidates to return
    pub number: u32,
}

/// Recipe catalog contract
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Search for candidate recipes matching the filters
    async fn search_recipes(&self, filters: &RecipeSearchFilters) -> AppResult<Vec<RecipeCandidate>>;

    /// Fetch the full macro breakdown for one candidate
    async fn fetch_nutrition(&self, recipe_id: u64) -> AppResult<RecipeNutrition>;
}

/// Catalog search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateDto {
    id: u64,
    title: String,
}

/// Nutrition widget response; amounts arrive as bare numbers or strings with units
#[derive(Debug, Deserialize)]
struct NutritionWidgetResponse {
    calories: Option<serde_json::Value>,
    protein: Option<serde_json::Value>,
    carbs: Option<serde_json::Value>,
    fat: Option<serde_json::Value>,
}

/// Map a transport-level failure; timeouts and connection refusals indicate
/// the catalog is down rather than rejecting the request
fn transport_error(error: &reqwest::Error) -> AppError {
    if error.is_timeout() || error.is_connect() {
        AppError::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("Spoonacular: {error}"),
        )
    } else {
        AppError::external_service("Spoonacular", error.to_string())
    }
}

/// Parse a nutrient amount defensively; missing or unparseable values become 0
fn parse_amount(value: Option<&serde_json::Value>) -> f64 {
    match value {
        Some(serde_json::Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(raw)) => {
            let numeric: String = raw
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            numeric.parse().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Spoonacular recipe catalog client
pub struct SpoonacularClient {
    config: RecipeCatalogConfig,
    client: Client,
}

impl SpoonacularClient {
    /// Create a new catalog client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: RecipeCatalogConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Map a non-success catalog status to the right error code
    async fn map_error_status(status: StatusCode, response: reqwest::Response) -> AppError {
        if status == StatusCode::PAYMENT_REQUIRED || status == StatusCode::TOO_MANY_REQUESTS {
            return AppError::rate_limited("Spoonacular");
        }
        AppError::external_service(
            "Spoonacular",
            format!("HTTP {status}: {}", response.text().await.unwrap_or_default()),
        )
    }
}

#[async_trait]
impl RecipeCatalog for SpoonacularClient {
    async fn search_recipes(
        &self,
        filters: &RecipeSearchFilters,
    ) -> AppResult<Vec<RecipeCandidate>> {
        let url = format!("{}/recipes/complexSearch", self.config.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("apiKey", self.config.api_key.clone()),
            ("maxCalories", filters.max_calories.to_string()),
            ("number", filters.number.to_string()),
            ("addRecipeInformation", "true".to_owned()),
        ];
        if let Some(diet) = &filters.diet {
            params.push(("diet", diet.clone()));
        }
        if !filters.intolerances.is_empty() {
            params.push(("intolerances", filters.intolerances.join(",")));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_error_status(status, response).await);
        }

        let search_response: SearchResponse = response.json().await.map_err(|e| {
            AppError::external_service("Spoonacular", format!("JSON parse error: {e}"))
        })?;

        debug!(
            candidates = search_response.results.len(),
            "Recipe search complete"
        );

        Ok(search_response
            .results
            .into_iter()
            .map(|dto| RecipeCandidate {
                id: dto.id,
                title: dto.title,
            })
            .collect())
    }

    async fn fetch_nutrition(&self, recipe_id: u64) -> AppResult<RecipeNutrition> {
        let url = format!(
            "{}/recipes/{recipe_id}/nutritionWidget.json",
            self.config.base_url
        );

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_error_status(status, response).await);
        }

        let widget: NutritionWidgetResponse = response.json().await.map_err(|e| {
            AppError::external_service("Spoonacular", format!("JSON parse error: {e}"))
        })?;

        Ok(RecipeNutrition {
            calories: parse_amount(widget.calories.as_ref()),
            protein: parse_amount(widget.protein.as_ref()),
            carbohydrates: parse_amount(widget.carbs.as_ref()),
            fat: parse_amount(widget.fat.as_ref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_amount_strips_units() {
        assert!((parse_amount(Some(&json!("15g"))) - 15.0).abs() < f64::EPSILON);
        assert!((parse_amount(Some(&json!("1.5g"))) - 1.5).abs() < f64::EPSILON);
        assert!((parse_amount(Some(&json!("520"))) - 520.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_amount_handles_numbers() {
        assert!((parse_amount(Some(&json!(42.5))) - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_amount_defaults_to_zero() {
        assert!(parse_amount(None).abs() < f64::EPSILON);
        assert!(parse_amount(Some(&json!("n/a"))).abs() < f64::EPSILON);
        assert!(parse_amount(Some(&json!(null))).abs() < f64::EPSILON);
    }

    #[test]
    fn test_widget_parse_to_nutrition() {
        let widget: NutritionWidgetResponse = serde_json::from_value(json!({
            "calories": "520",
            "protein": "42g",
            "carbs": "48g",
            "fat": "16g"
        }))
        .unwrap();

        let nutrition = RecipeNutrition {
            calories: parse_amount(widget.calories.as_ref()),
            protein: parse_amount(widget.protein.as_ref()),
            carbohydrates: parse_amount(widget.carbs.as_ref()),
            fat: parse_amount(widget.fat.as_ref()),
        };

        assert!(nutrition.is_complete());
        assert!((nutrition.protein - 42.0).abs() < f64::EPSILON);
    }
}

// ABOUTME: Recipe acquisition stage with staged fallback and protein ranking
// ABOUTME: Searches the catalog, enriches candidates, and degrades to the static dataset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Recipe Provider
//!
//! Multi-stage recipe acquisition with graceful degradation:
//!
//! 1. **Search**: fetch up to [`CANDIDATE_POOL_SIZE`] candidates matching the
//!    diet/intolerance/calorie filters. An empty result set short-circuits to
//!    the static fallback bucket for the diet.
//! 2. **Enrich**: fetch full nutrition per candidate, keeping only recipes
//!    with all four macros known and positive. A rate-limit signal from the
//!    catalog stops the loop immediately; whatever was enriched so far is
//!    kept.
//! 3. **Fallback**: zero survivors means the static bucket is served instead.
//! 4. **Rank**: stable sort by protein descending, truncated to the
//!    requested count.
//!
//! The provider never surfaces an error to its caller: every failure path
//! lands on a non-empty fallback bucket.

pub mod catalog;
pub mod fallback;

pub use catalog::{RecipeCandidate, RecipeCatalog, RecipeSearchFilters, SpoonacularClient};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{AppResult, ErrorCode};
use crate::models::{DietaryPreference, Recipe};

/// Number of candidates requested from catalog search, sized to survive the
/// completeness filter
pub const CANDIDATE_POOL_SIZE: u32 = 30;

/// Default number of ranked recipes returned per run
pub const DEFAULT_RECIPE_COUNT: usize = 20;

/// Fallback bucket substituted when an unknown diet key misses on empty search
const SEARCH_FALLBACK_BUCKET: &str = "none";

/// Fallback bucket substituted when enrichment or the catalog itself fails
const ENRICHMENT_FALLBACK_BUCKET: &str = "vegetarian";

/// Parameters for one recipe acquisition run
#[derive(Debug, Clone)]
pub struct RecipeQuery {
    pub diet: DietaryPreference,
    /// Free-text intolerance tokens forwarded to the catalog
    pub intolerances: Vec<String>,
    /// Per-recipe calorie ceiling, normally the run's target calories
    pub max_calories: u32,
    /// Number of ranked recipes to return
    pub count: usize,
}

impl RecipeQuery {
    /// Create a query with the default result count
    #[must_use]
    pub const fn new(diet: DietaryPreference, intolerances: Vec<String>, max_calories: u32) -> Self {
        Self {
            diet,
            intolerances,
            max_calories,
            count: DEFAULT_RECIPE_COUNT,
        }
    }

    /// Override the number of recipes returned
    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Staged recipe acquisition over an injected catalog
pub struct RecipeProvider {
    catalog: Arc<dyn RecipeCatalog>,
}

impl RecipeProvider {
    #[must_use]
    pub fn new(catalog: Arc<dyn RecipeCatalog>) -> Self {
        Self { catalog }
    }

    /// Fetch, enrich, and rank recipes for one run
    ///
    /// Never fails and never returns an empty list: every error path serves
    /// the static fallback bucket appropriate for the requested diet.
    pub async fn fetch_ranked(&self, query: &RecipeQuery) -> Vec<Recipe> {
        match self.fetch_from_catalog(query).await {
            Ok(recipes) => recipes,
            Err(error) => {
                warn!(%error, "Recipe catalog unavailable; serving fallback recipes");
                fallback::bucket_or(query.diet.fallback_key(), ENRICHMENT_FALLBACK_BUCKET).to_vec()
            }
        }
    }

    async fn fetch_from_catalog(&self, query: &RecipeQuery) -> AppResult<Vec<Recipe>> {
        let filters = RecipeSearchFilters {
            diet: query.diet.catalog_diet_token().map(str::to_owned),
            intolerances: query.intolerances.clone(),
            max_calories: query.max_calories,
            number: CANDIDATE_POOL_SIZE,
        };

        let candidates = self.catalog.search_recipes(&filters).await?;

        if candidates.is_empty() {
            info!(
                diet = query.diet.fallback_key(),
                "Catalog search returned no candidates; serving fallback recipes"
            );
            return Ok(
                fallback::bucket_or(query.diet.fallback_key(), SEARCH_FALLBACK_BUCKET).to_vec(),
            );
        }

        let mut enriched = Vec::new();
        for candidate in candidates {
            match self.catalog.fetch_nutrition(candidate.id).await {
                Ok(nutrition) if nutrition.is_complete() => {
                    enriched.push(Recipe {
                        title: candidate.title,
                        nutrition,
                    });
                }
                Ok(_) => {
                    debug!(title = %candidate.title, "Discarding recipe with incomplete nutrition");
                }
                Err(error) if error.code == ErrorCode::ExternalRateLimited => {
                    // Partial success is the ordinary path here: keep what we
                    // have and stop issuing enrichment calls.
                    warn!(
                        enriched = enriched.len(),
                        "Catalog rate limit reached; stopping enrichment early"
                    );
                    break;
                }
                Err(error) => {
                    warn!(title = %candidate.title, %error, "Nutrition fetch failed; skipping recipe");
                }
            }
        }

        if enriched.is_empty() {
            info!(
                diet = query.diet.fallback_key(),
                "No recipes survived enrichment; serving fallback recipes"
            );
            return Ok(fallback::bucket_or(
                query.diet.fallback_key(),
                ENRICHMENT_FALLBACK_BUCKET,
            )
            .to_vec());
        }

        // Stable sort keeps catalog order for equal-protein ties
        enriched.sort_by(|a, b| b.nutrition.protein.total_cmp(&a.nutrition.protein));
        enriched.truncate(query.count);

        Ok(enriched)
    }
}

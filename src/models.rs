// ABOUTME: Core data models for the nutrition-plan generation pipeline
// ABOUTME: Defines PlanRequest, UserProfile, NutritionTargets, Recipe, and related enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Common data models for nutrition planning
//!
//! [`PlanRequest`] is the wire shape accepted from the surrounding service
//! layer; required biometric fields are optional there and checked by
//! [`PlanRequest::validate`], which produces an immutable [`UserProfile`] for
//! the rest of the run.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Default number of meals per day when the request leaves it unset
pub const DEFAULT_MEALS_PER_DAY: u32 = 3;

/// Minimum supported age in years
pub const MIN_AGE_YEARS: u32 = 13;

/// User gender as reported in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// String representation for prompt rendering
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR
    ///
    /// The level is a closed enum, so every value has a defined multiplier;
    /// unrecognized strings are rejected during request deserialization.
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.15,
            Self::Light => 1.35,
            Self::Moderate => 1.55,
            Self::Active => 1.75,
            Self::VeryActive => 1.95,
        }
    }

    /// String representation for prompt rendering
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "veryActive",
        }
    }
}

/// Weight goal driving calorie adjustment and macro split selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Gain,
    Maintain,
}

impl Goal {
    /// User-friendly phrase used in the generation prompt
    #[must_use]
    pub const fn phrase(&self) -> &'static str {
        match self {
            Self::Lose => "lose weight",
            Self::Gain => "gain weight",
            Self::Maintain => "maintain your weight",
        }
    }

    /// String representation for search-query construction
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lose => "lose",
            Self::Gain => "gain",
            Self::Maintain => "maintain",
        }
    }
}

/// Dietary preference selected by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DietaryPreference {
    #[default]
    None,
    Vegetarian,
    Vegan,
    Keto,
    Paleo,
    GlutenFree,
}

impl DietaryPreference {
    /// Diet parameter understood by the recipe catalog, if any
    #[must_use]
    pub const fn catalog_diet_token(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Vegetarian => Some("vegetarian"),
            Self::Vegan => Some("vegan"),
            Self::Keto => Some("ketogenic"),
            Self::Paleo => Some("paleolithic"),
            Self::GlutenFree => Some("gluten free"),
        }
    }

    /// Key into the static fallback recipe table
    ///
    /// Only a subset of diets have dedicated buckets; lookups for the others
    /// miss and the provider substitutes a default bucket.
    #[must_use]
    pub const fn fallback_key(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::Keto => "keto",
            Self::Paleo => "paleo",
            Self::GlutenFree => "glutenFree",
        }
    }

    /// Whether protein targets should use the plant-based split
    #[must_use]
    pub const fn is_plant_based(&self) -> bool {
        matches!(self, Self::Vegetarian | Self::Vegan)
    }

    /// Human-readable label for prompt rendering
    #[must_use]
    pub const fn display(&self) -> &'static str {
        match self {
            Self::None => "No restrictions",
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::Keto => "keto",
            Self::Paleo => "paleo",
            Self::GlutenFree => "gluten free",
        }
    }
}

/// Plan generation request as received from the service layer
///
/// Required fields arrive optional at the wire and are checked by
/// [`PlanRequest::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanRequest {
    /// Age in years
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    /// Body weight in pounds
    pub weight: Option<f64>,
    /// Height in inches
    pub height: Option<f64>,
    /// Optional target body weight in pounds
    pub goal_weight: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    pub dietary_preferences: DietaryPreference,
    /// Free-text allergy/intolerance tokens
    pub allergies: Vec<String>,
    pub meals_per_day: Option<u32>,
}

impl PlanRequest {
    /// Validate the request and produce an immutable profile for one run
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` naming every absent required field, or
    /// `ValueOutOfRange` when a present field fails its range check. No
    /// external call is made before validation passes.
    pub fn validate(&self) -> AppResult<UserProfile> {
        let mut missing = Vec::new();
        if self.age.is_none() {
            missing.push("age");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.weight.is_none() {
            missing.push("weight");
        }
        if self.height.is_none() {
            missing.push("height");
        }
        if self.activity_level.is_none() {
            missing.push("activityLevel");
        }
        if self.goal.is_none() {
            missing.push("goal");
        }
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }

        let age = self.age.unwrap_or_default();
        let weight = self.weight.unwrap_or_default();
        let height = self.height.unwrap_or_default();
        let meals_per_day = self.meals_per_day.unwrap_or(DEFAULT_MEALS_PER_DAY);

        if age < MIN_AGE_YEARS {
            return Err(AppError::out_of_range(
                "age",
                format!("must be at least {MIN_AGE_YEARS} years"),
            ));
        }
        if weight <= 0.0 {
            return Err(AppError::out_of_range("weight", "must be positive"));
        }
        if height <= 0.0 {
            return Err(AppError::out_of_range("height", "must be positive"));
        }
        if meals_per_day == 0 {
            return Err(AppError::out_of_range("mealsPerDay", "must be at least 1"));
        }

        Ok(UserProfile {
            age,
            gender: self.gender.unwrap_or(Gender::Other),
            weight_lbs: weight,
            height_inches: height,
            goal_weight_lbs: self.goal_weight,
            activity_level: self.activity_level.unwrap_or(ActivityLevel::Sedentary),
            goal: self.goal.unwrap_or(Goal::Maintain),
            dietary_preferences: self.dietary_preferences,
            allergies: self.allergies.clone(),
            meals_per_day,
        })
    }
}

/// Validated user profile, immutable for the duration of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub weight_lbs: f64,
    pub height_inches: f64,
    pub goal_weight_lbs: Option<f64>,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub dietary_preferences: DietaryPreference,
    pub allergies: Vec<String>,
    pub meals_per_day: u32,
}

/// Energy and macronutrient targets derived once per run
///
/// Invariant: `protein_grams * 4 + carbs_grams * 4 + fats_grams * 9` equals
/// `target_calories` within rounding tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    /// Body mass index, rounded to one decimal
    pub bmi: f64,
    /// Basal metabolic rate (Mifflin-St Jeor), kcal/day
    pub bmr: f64,
    /// Total daily energy expenditure, kcal/day
    pub tdee: u32,
    /// Goal-adjusted daily calorie target
    pub target_calories: u32,
    pub protein_grams: u32,
    pub carbs_grams: u32,
    pub fats_grams: u32,
}

/// A knowledge-base snippet retrieved by semantic similarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeSnippet {
    pub title: String,
    pub content: String,
    pub category: String,
    pub source: String,
    /// The seeded corpus does not always carry a source URL
    pub url: Option<String>,
    /// Cosine similarity in `[-1, 1]`; higher is more relevant
    pub relevance_score: f32,
}

/// Per-recipe macro breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeNutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

impl RecipeNutrition {
    /// A recipe is usable only when all four nutrient amounts are known and positive
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.calories > 0.0 && self.protein > 0.0 && self.carbohydrates > 0.0 && self.fat > 0.0
    }
}

/// A nutritionally-verified recipe offered to the generation prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub nutrition: RecipeNutrition,
}

/// Final pipeline output: the generated plan plus its numeric metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    /// Generated plan text, returned verbatim from the generation service
    pub plan: String,
    pub metadata: NutritionTargets,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn complete_request() -> PlanRequest {
        PlanRequest {
            age: Some(30),
            gender: Some(Gender::Male),
            weight: Some(180.0),
            height: Some(70.0),
            activity_level: Some(ActivityLevel::Moderate),
            goal: Some(Goal::Lose),
            ..PlanRequest::default()
        }
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let json = r#"{
            "age": 25,
            "gender": "female",
            "weight": 140,
            "height": 64,
            "goalWeight": 130,
            "activityLevel": "veryActive",
            "goal": "lose",
            "dietaryPreferences": "glutenFree",
            "allergies": ["peanuts"],
            "mealsPerDay": 4
        }"#;

        let request: PlanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.activity_level, Some(ActivityLevel::VeryActive));
        assert_eq!(request.dietary_preferences, DietaryPreference::GlutenFree);
        assert_eq!(request.goal_weight, Some(130.0));
        assert_eq!(request.meals_per_day, Some(4));
    }

    #[test]
    fn test_unrecognized_activity_level_is_rejected() {
        let json = r#"{"age": 25, "activityLevel": "couchPotato"}"#;
        assert!(serde_json::from_str::<PlanRequest>(json).is_err());
    }

    #[test]
    fn test_validate_names_missing_fields() {
        let request = PlanRequest {
            age: Some(30),
            weight: Some(180.0),
            ..PlanRequest::default()
        };

        let error = request.validate().unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
        for field in ["gender", "height", "activityLevel", "goal"] {
            assert!(error.message.contains(field), "expected {field} in message");
        }
        assert!(!error.message.contains("age"));
    }

    #[test]
    fn test_validate_applies_defaults() {
        let profile = complete_request().validate().unwrap();
        assert_eq!(profile.meals_per_day, DEFAULT_MEALS_PER_DAY);
        assert_eq!(profile.dietary_preferences, DietaryPreference::None);
        assert!(profile.allergies.is_empty());
    }

    #[test]
    fn test_validate_rejects_underage() {
        let mut request = complete_request();
        request.age = Some(12);

        let error = request.validate().unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_catalog_diet_tokens() {
        assert_eq!(DietaryPreference::None.catalog_diet_token(), None);
        assert_eq!(
            DietaryPreference::Keto.catalog_diet_token(),
            Some("ketogenic")
        );
        assert_eq!(
            DietaryPreference::GlutenFree.catalog_diet_token(),
            Some("gluten free")
        );
    }

    #[test]
    fn test_activity_multipliers() {
        assert!((ActivityLevel::Sedentary.multiplier() - 1.15).abs() < f64::EPSILON);
        assert!((ActivityLevel::VeryActive.multiplier() - 1.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_incomplete_nutrition_detected() {
        let nutrition = RecipeNutrition {
            calories: 500.0,
            protein: 30.0,
            carbohydrates: 0.0,
            fat: 12.0,
        };
        assert!(!nutrition.is_complete());
    }
}

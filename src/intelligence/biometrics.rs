// ABOUTME: Biometric target calculations for daily energy and macro planning
// ABOUTME: Implements BMI, Mifflin-St Jeor BMR, TDEE, and goal-based macro splits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Biometric Calculator
//!
//! Derives a user's daily energy and macronutrient targets from validated
//! biometrics. All functions here are pure; calling [`compute_targets`] twice
//! with the same profile yields identical output.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). "A new predictive equation for resting
//!   energy expenditure in healthy individuals." *The American Journal of
//!   Clinical Nutrition*, 51(2), 241-247.

use crate::models::{Gender, Goal, NutritionTargets, UserProfile};

/// Pounds to kilograms
const LBS_TO_KG: f64 = 0.453_592;

/// Inches to centimeters
const IN_TO_CM: f64 = 2.54;

/// Daily calorie deficit/surplus applied for weight loss/gain goals
const GOAL_CALORIE_ADJUSTMENT: u32 = 500;

/// Energy density of protein and carbohydrates (kcal per gram)
const KCAL_PER_GRAM_PROTEIN_CARBS: f64 = 4.0;

/// Energy density of fat (kcal per gram)
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Macronutrient calorie split as fractions summing to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroSplit {
    /// Select the split for a goal and dietary preference
    ///
    /// Muscle gain on a plant-based diet uses a lower, more realistic protein
    /// fraction; omnivore gain pushes protein harder. Weight loss prioritizes
    /// protein for satiety; maintenance is a balanced split.
    #[must_use]
    pub fn for_goal(goal: Goal, plant_based: bool) -> Self {
        match goal {
            Goal::Gain if plant_based => Self {
                protein: 0.25,
                carbs: 0.45,
                fats: 0.30,
            },
            Goal::Gain => Self {
                protein: 0.35,
                carbs: 0.35,
                fats: 0.30,
            },
            Goal::Lose => Self {
                protein: 0.35,
                carbs: 0.40,
                fats: 0.25,
            },
            Goal::Maintain => Self {
                protein: 0.30,
                carbs: 0.40,
                fats: 0.30,
            },
        }
    }
}

/// Body mass index from imperial units, rounded to one decimal
fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    (raw * 10.0).round() / 10.0
}

/// Basal metabolic rate via the Mifflin-St Jeor equation (kcal/day)
///
/// Male: `10W + 6.25H - 5A + 5`; otherwise `10W + 6.25H - 5A - 161`
/// (W in kg, H in cm, A in years).
///
/// NOTE: the non-male branch covers both `female` and `other`, matching the
/// shipped product behavior. Pending product guidance on whether `other`
/// should get its own formula.
fn bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// Compute the full set of energy and macro targets for one profile
///
/// Target calories are TDEE minus 500 for weight loss, plus 500 for gain,
/// and TDEE unchanged for maintenance. Protein and carb grams use 4 kcal/g,
/// fat grams 9 kcal/g, each rounded to the nearest gram, so the macro
/// calories reconstruct the target within rounding tolerance.
#[must_use]
pub fn compute_targets(profile: &UserProfile) -> NutritionTargets {
    let weight_kg = profile.weight_lbs * LBS_TO_KG;
    let height_cm = profile.height_inches * IN_TO_CM;

    let bmi = bmi(weight_kg, height_cm);
    let bmr = bmr(weight_kg, height_cm, profile.age, profile.gender);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let tdee = (bmr * profile.activity_level.multiplier()).round() as u32;

    let target_calories = match profile.goal {
        Goal::Lose => tdee.saturating_sub(GOAL_CALORIE_ADJUSTMENT),
        Goal::Gain => tdee + GOAL_CALORIE_ADJUSTMENT,
        Goal::Maintain => tdee,
    };

    let split = MacroSplit::for_goal(profile.goal, profile.dietary_preferences.is_plant_based());

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let grams = |fraction: f64, kcal_per_gram: f64| {
        (f64::from(target_calories) * fraction / kcal_per_gram).round() as u32
    };

    NutritionTargets {
        bmi,
        bmr,
        tdee,
        target_calories,
        protein_grams: grams(split.protein, KCAL_PER_GRAM_PROTEIN_CARBS),
        carbs_grams: grams(split.carbs, KCAL_PER_GRAM_PROTEIN_CARBS),
        fats_grams: grams(split.fats, KCAL_PER_GRAM_FAT),
    }
}

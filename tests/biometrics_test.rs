// ABOUTME: Integration tests for biometric target computation through the public API
// ABOUTME: Covers formula scenarios, purity, macro-calorie identity, and gender branches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutriplan::intelligence::compute_targets;
use nutriplan::models::{
    ActivityLevel, DietaryPreference, Gender, Goal, PlanRequest, UserProfile,
};

fn profile(gender: Gender, goal: Goal, diet: DietaryPreference) -> UserProfile {
    UserProfile {
        age: 30,
        gender,
        weight_lbs: 180.0,
        height_inches: 70.0,
        goal_weight_lbs: None,
        activity_level: ActivityLevel::Moderate,
        goal,
        dietary_preferences: diet,
        allergies: Vec::new(),
        meals_per_day: 3,
    }
}

#[test]
fn test_moderate_activity_weight_loss_targets() {
    // 30y male, 180 lbs, 70 in, moderately active, losing weight
    let targets = compute_targets(&profile(Gender::Male, Goal::Lose, DietaryPreference::None));

    // BMR = 10*81.64656 + 6.25*177.8 - 5*30 + 5
    assert!((targets.bmr - 1782.7156).abs() < 1e-3);
    // TDEE = round(BMR * 1.55)
    assert_eq!(targets.tdee, 2763);
    // Weight loss applies a 500 kcal deficit
    assert_eq!(targets.target_calories, 2263);
    assert!((targets.bmi - 25.8).abs() < 1e-9);

    // Loss ratios {0.35, 0.40, 0.25}
    assert_eq!(targets.protein_grams, 198);
    assert_eq!(targets.carbs_grams, 226);
    assert_eq!(targets.fats_grams, 63);
}

#[test]
fn test_computation_is_deterministic() {
    let profile = profile(Gender::Female, Goal::Gain, DietaryPreference::Vegan);
    let first = compute_targets(&profile);
    let second = compute_targets(&profile);
    assert_eq!(first, second);
}

#[test]
fn test_female_and_other_share_bmr_formula() {
    let female = compute_targets(&profile(
        Gender::Female,
        Goal::Maintain,
        DietaryPreference::None,
    ));
    let other = compute_targets(&profile(
        Gender::Other,
        Goal::Maintain,
        DietaryPreference::None,
    ));

    assert!((female.bmr - other.bmr).abs() < f64::EPSILON);
    assert_eq!(female, other);
}

#[test]
fn test_goal_adjusts_target_calories() {
    let lose = compute_targets(&profile(Gender::Male, Goal::Lose, DietaryPreference::None));
    let gain = compute_targets(&profile(Gender::Male, Goal::Gain, DietaryPreference::None));
    let maintain = compute_targets(&profile(
        Gender::Male,
        Goal::Maintain,
        DietaryPreference::None,
    ));

    assert_eq!(lose.tdee, gain.tdee);
    assert_eq!(maintain.target_calories, maintain.tdee);
    assert_eq!(lose.target_calories, maintain.target_calories - 500);
    assert_eq!(gain.target_calories, maintain.target_calories + 500);
}

#[test]
fn test_macro_calories_reconstruct_target_for_all_profiles() {
    for gender in [Gender::Male, Gender::Female, Gender::Other] {
        for goal in [Goal::Lose, Goal::Gain, Goal::Maintain] {
            for diet in [
                DietaryPreference::None,
                DietaryPreference::Vegetarian,
                DietaryPreference::Vegan,
                DietaryPreference::Keto,
                DietaryPreference::Paleo,
                DietaryPreference::GlutenFree,
            ] {
                let targets = compute_targets(&profile(gender, goal, diet));
                let reconstructed = targets.protein_grams * 4
                    + targets.carbs_grams * 4
                    + targets.fats_grams * 9;
                let diff = i64::from(reconstructed) - i64::from(targets.target_calories);
                assert!(
                    diff.abs() <= 9,
                    "{gender:?}/{goal:?}/{diet:?}: macros rebuild {reconstructed}, target {}",
                    targets.target_calories
                );
            }
        }
    }
}

#[test]
fn test_plant_based_gain_lowers_protein_fraction() {
    let omnivore = compute_targets(&profile(Gender::Male, Goal::Gain, DietaryPreference::None));
    let vegan = compute_targets(&profile(Gender::Male, Goal::Gain, DietaryPreference::Vegan));
    let vegetarian = compute_targets(&profile(
        Gender::Male,
        Goal::Gain,
        DietaryPreference::Vegetarian,
    ));

    // Same calories, different splits: 0.25 vs 0.35 protein
    assert_eq!(omnivore.target_calories, vegan.target_calories);
    assert!(vegan.protein_grams < omnivore.protein_grams);
    assert_eq!(vegan.protein_grams, vegetarian.protein_grams);
}

#[test]
fn test_non_plant_diets_use_goal_default_splits() {
    // Keto and paleo have no dedicated split; gain uses the omnivore ratios
    let keto = compute_targets(&profile(Gender::Male, Goal::Gain, DietaryPreference::Keto));
    let omnivore = compute_targets(&profile(Gender::Male, Goal::Gain, DietaryPreference::None));
    assert_eq!(keto.protein_grams, omnivore.protein_grams);

    // Maintenance ratios apply regardless of diet
    let keto_maintain =
        compute_targets(&profile(Gender::Male, Goal::Maintain, DietaryPreference::Keto));
    let expected_protein =
        (f64::from(keto_maintain.target_calories) * 0.30 / 4.0).round() as u32;
    assert_eq!(keto_maintain.protein_grams, expected_protein);
}

#[test]
fn test_validated_request_round_trips_into_targets() {
    let request: PlanRequest = serde_json::from_str(
        r#"{
            "age": 30,
            "gender": "male",
            "weight": 180,
            "height": 70,
            "activityLevel": "moderate",
            "goal": "lose"
        }"#,
    )
    .unwrap();

    let profile = request.validate().unwrap();
    let targets = compute_targets(&profile);
    assert_eq!(targets.target_calories, 2263);
}

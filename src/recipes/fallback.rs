// ABOUTME: Static curated fallback recipe dataset keyed by diet
// ABOUTME: Served whenever live catalog retrieval is unavailable or comes back empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Fallback Recipe Dataset
//!
//! Curated, nutritionally-verified recipes served when the live catalog is
//! unavailable, rate-limited, or returns nothing usable. The table is pure
//! data: built once on first access, immutable afterwards, keyed by diet.
//! Every bucket is non-empty, which is what lets the recipe provider promise
//! a non-empty result to its callers.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::{Recipe, RecipeNutrition};

/// title, calories, protein, carbohydrates, fat
type RecipeRow = (&'static str, f64, f64, f64, f64);

const VEGETARIAN_RECIPES: &[RecipeRow] = &[
    ("High-Protein Chickpea Buddha Bowl", 520.0, 24.0, 68.0, 16.0),
    ("Quinoa Black Bean Burrito Bowl", 485.0, 22.0, 72.0, 12.0),
    ("Tofu Scramble with Roasted Vegetables", 380.0, 28.0, 24.0, 18.0),
    ("Lentil Dal with Brown Rice", 450.0, 20.0, 78.0, 8.0),
    ("Mediterranean Chickpea Salad", 420.0, 18.0, 52.0, 16.0),
    ("Tempeh Stir-Fry with Vegetables", 410.0, 26.0, 38.0, 18.0),
    ("Mediterranean Farro Bowl with Roasted Veggies", 465.0, 16.0, 68.0, 14.0),
    ("Black Bean Sweet Potato Tacos", 395.0, 15.0, 62.0, 10.0),
    ("Protein-Packed Overnight Oats", 425.0, 22.0, 58.0, 12.0),
    ("Edamame Quinoa Power Bowl", 490.0, 25.0, 64.0, 14.0),
    ("Spinach and Feta Frittata", 340.0, 24.0, 18.0, 20.0),
    ("Vegetarian Chili with Beans", 385.0, 19.0, 58.0, 9.0),
    ("Greek Yogurt Parfait with Granola", 380.0, 20.0, 54.0, 10.0),
    ("Veggie-Loaded Whole Wheat Pasta", 475.0, 18.0, 76.0, 12.0),
    ("Mushroom and Spinach Quesadilla", 420.0, 21.0, 48.0, 16.0),
];

const VEGAN_RECIPES: &[RecipeRow] = &[
    ("Vegan Protein Smoothie Bowl", 450.0, 20.0, 62.0, 14.0),
    ("Tofu and Vegetable Stir-Fry", 395.0, 24.0, 42.0, 15.0),
    ("Chickpea Curry with Coconut Milk", 480.0, 18.0, 58.0, 20.0),
    ("Vegan Buddha Bowl with Tahini Dressing", 510.0, 19.0, 68.0, 18.0),
    ("Black Bean and Quinoa Tacos", 420.0, 17.0, 64.0, 12.0),
    ("Lentil Bolognese with Whole Wheat Pasta", 465.0, 21.0, 72.0, 10.0),
    ("Tempeh Power Bowl", 495.0, 28.0, 52.0, 18.0),
    ("Vegan Protein Pancakes", 380.0, 18.0, 58.0, 10.0),
    ("Sweet Potato and Black Bean Bowl", 445.0, 16.0, 72.0, 11.0),
    ("Vegan Chili with Cornbread", 425.0, 19.0, 68.0, 9.0),
];

const UNRESTRICTED_RECIPES: &[RecipeRow] = &[
    ("Grilled Chicken with Quinoa and Veggies", 520.0, 42.0, 48.0, 16.0),
    ("Salmon Bowl with Brown Rice", 580.0, 38.0, 52.0, 22.0),
    ("Turkey and Sweet Potato Hash", 465.0, 35.0, 48.0, 14.0),
    ("Greek Chicken Salad", 420.0, 38.0, 28.0, 18.0),
    ("Beef and Broccoli Stir-Fry", 485.0, 36.0, 42.0, 18.0),
    ("Grilled Fish Tacos", 395.0, 32.0, 38.0, 12.0),
    ("Chicken Fajita Bowl", 510.0, 40.0, 52.0, 16.0),
    ("Turkey Meatballs with Marinara", 445.0, 38.0, 36.0, 16.0),
    ("Shrimp and Veggie Stir-Fry", 380.0, 34.0, 38.0, 10.0),
    ("Chicken Burrito Bowl", 525.0, 42.0, 56.0, 14.0),
    ("Baked Cod with Roasted Vegetables", 395.0, 36.0, 32.0, 12.0),
    ("Steak and Sweet Potato", 580.0, 44.0, 42.0, 24.0),
    ("Chicken Pesto Pasta", 545.0, 38.0, 58.0, 18.0),
    ("Tuna Poke Bowl", 465.0, 36.0, 52.0, 12.0),
    ("Eggs and Turkey Sausage Breakfast", 420.0, 32.0, 24.0, 22.0),
];

static FALLBACK_RECIPES: OnceLock<HashMap<&'static str, Vec<Recipe>>> = OnceLock::new();

fn build_bucket(rows: &[RecipeRow]) -> Vec<Recipe> {
    rows.iter()
        .map(|&(title, calories, protein, carbohydrates, fat)| Recipe {
            title: title.to_owned(),
            nutrition: RecipeNutrition {
                calories,
                protein,
                carbohydrates,
                fat,
            },
        })
        .collect()
}

/// The full fallback table, built once per process
pub fn fallback_table() -> &'static HashMap<&'static str, Vec<Recipe>> {
    FALLBACK_RECIPES.get_or_init(|| {
        HashMap::from([
            ("vegetarian", build_bucket(VEGETARIAN_RECIPES)),
            ("vegan", build_bucket(VEGAN_RECIPES)),
            ("none", build_bucket(UNRESTRICTED_RECIPES)),
        ])
    })
}

/// Look up the bucket for a diet key
#[must_use]
pub fn bucket(key: &str) -> Option<&'static [Recipe]> {
    fallback_table().get(key).map(Vec::as_slice)
}

/// Look up the bucket for a diet key, substituting a default bucket on a miss
///
/// Returns an empty slice only if both keys are unknown, which cannot happen
/// for the defaults used by the provider ("none" and "vegetarian").
#[must_use]
pub fn bucket_or(key: &str, default_key: &str) -> &'static [Recipe] {
    bucket(key)
        .or_else(|| bucket(default_key))
        .unwrap_or(&[])
}

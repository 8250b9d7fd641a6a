// ABOUTME: Plan prompt assembly from targets, retrieved knowledge, and ranked recipes
// ABOUTME: Pure formatting of the generation prompt; no network or storage access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Plan Prompt Assembler
//!
//! Renders the nutrition targets, up to [`MAX_PROMPT_SNIPPETS`] knowledge
//! snippets, and up to [`MAX_PROMPT_RECIPES`] ranked recipes into the fixed
//! instructional template handed to the generation service. The prompt is
//! built fresh per run and never cached across users.
//!
//! Assembly is total: empty snippet lists and short or empty recipe lists
//! render as empty sections rather than failing the run.

use std::fmt::Write as _;

use crate::models::{KnowledgeSnippet, NutritionTargets, Recipe, UserProfile};

/// Maximum knowledge snippets included in the prompt
pub const MAX_PROMPT_SNIPPETS: usize = 3;

/// Maximum ranked recipes included in the prompt
pub const MAX_PROMPT_RECIPES: usize = 15;

/// Render the research section from retrieved snippets
fn research_section(snippets: &[KnowledgeSnippet]) -> String {
    let mut section = String::from("**RESEARCH-BACKED NUTRITION KNOWLEDGE:**\n");
    for (index, snippet) in snippets.iter().take(MAX_PROMPT_SNIPPETS).enumerate() {
        let _ = write!(section, "\n{}. {}\n{}\n", index + 1, snippet.title, snippet.content);
    }
    section
}

/// Render the recipes section with per-recipe macro summaries
fn recipes_section(recipes: &[Recipe]) -> String {
    let mut section = String::from("**REAL RECIPES AVAILABLE:**\n");
    for (index, recipe) in recipes.iter().take(MAX_PROMPT_RECIPES).enumerate() {
        let nutrition = &recipe.nutrition;
        let _ = write!(section, "\n{}. {}\n", index + 1, recipe.title);
        let _ = write!(
            section,
            "   - Calories: ~{} kcal | Protein: ~{}g | Carbs: ~{}g | Fats: ~{}g\n",
            nutrition.calories.round(),
            nutrition.protein.round(),
            nutrition.carbohydrates.round(),
            nutrition.fat.round()
        );
    }
    section
}

/// Assemble the complete generation prompt for one run
#[must_use]
pub fn build_plan_prompt(
    profile: &UserProfile,
    targets: &NutritionTargets,
    snippets: &[KnowledgeSnippet],
    recipes: &[Recipe],
) -> String {
    let research = research_section(snippets);
    let recipes_block = recipes_section(recipes);

    let goal_phrase = profile.goal.phrase();
    let dietary_display = profile.dietary_preferences.display();

    let goal_weight_line = profile
        .goal_weight_lbs
        .map(|pounds| format!("Goal: Aim to reach {pounds} lbs"))
        .unwrap_or_default();

    let allergies_line = if profile.allergies.is_empty() {
        String::new()
    } else {
        format!("Allergies/Intolerances: {}", profile.allergies.join(", "))
    };

    let snack_placeholder = if profile.meals_per_day > 3 {
        "\n- Snack: [Your choice of healthy snack]"
    } else {
        ""
    };

    format!(
        "You are a certified nutritionist and dietitian. Generate the response using \
**proper Markdown formatting** for headings, bold text, and lists.

Using the information provided, create a personalized daily nutrition plan.
{research}
{recipes_block}

User Details:
- Age: {age}
- Gender: {gender}
- Weight: {weight} lbs
- Height: {height} inches
- {goal_weight_line}
- Activity Level: {activity}
- Goal: {goal_phrase}
- Dietary Preferences: {dietary_display}
- {allergies_line}
- Target Daily Calories: ~{target_calories} kcal
- Meals Per Day: {meals_per_day}

Macronutrient Breakdown:
- Protein: ~{protein}g
- Carbohydrates: ~{carbs}g
- Fats: ~{fats}g

**Instructions:**
1. Create a daily meal plan with breakfast, lunch, dinner, and{snack_placeholder}.
2. Each meal should include a recipe from the provided recipes list.
3. Ensure the total daily calories align with the target of ~{target_calories} kcal.
4. Distribute macronutrients according to the calculated grams.
5. Provide portion sizes for each meal.
6. Use a friendly and encouraging tone suitable for someone looking to {goal_phrase}.
7. Format the meal plan clearly for easy reading.
8. Cite the sources of recipes used from the provided list.

Generate the personalized nutrition plan now.

**Format**
# Your Personalized Nutrition Plan

## Summary
[Brief overview based on research]

## Daily Targets
- Calories: {target_calories} kcal
- Macros: {protein}g | Carbs: {carbs}g | Fats: {fats}g

## 7-Day Meal Plan

### Day 1
**Breakfast:** [Meal name]
- [Description]
- Calories: ~XXX | Protein: XXg | Carbs: XXg | Fats: XXg

**Lunch:** [Meal name]
- [Description]
- Calories: ~XXX | Protein: XXg | Carbs: XXg | Fats: XXg

**Dinner:** [Meal name]
- [Description]
- Calories: ~XXX | Protein: XXg | Carbs: XXg | Fats: XXg

{snack_placeholder}**Daily Total:** ~{target_calories} kcal

[Repeat for Days 2-7]

## Tips for Success
[5 practical tips based on research]

Keep it concise, practical, and encouraging!
",
        age = profile.age,
        gender = profile.gender.as_str(),
        weight = profile.weight_lbs,
        height = profile.height_inches,
        activity = profile.activity_level.as_str(),
        target_calories = targets.target_calories,
        meals_per_day = profile.meals_per_day,
        protein = targets.protein_grams,
        carbs = targets.carbs_grams,
        fats = targets.fats_grams,
    )
}

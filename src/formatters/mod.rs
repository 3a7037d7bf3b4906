// ABOUTME: Renders Mealie payloads as plain text for LLM consumption
// ABOUTME: Recipe search results and single recipes become labeled, line-oriented text blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Output formatting for tool results
//!
//! Agents read tool output as text, so recipes are flattened into labeled
//! lines instead of being returned as raw JSON. Meal plans, which the agent
//! passes back into other calls, stay JSON and go through [`format_json`].

use crate::mealie::models::{Recipe, RecipeSummary, Taxonomy};
use serde::Serialize;

/// Text returned when a search matches nothing
pub const NO_RECIPES_FOUND: &str = "No recipes found";

fn text(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(String::new, |n| {
        if n.fract() == 0.0 {
            format!("{n:.0}")
        } else {
            n.to_string()
        }
    })
}

fn names(items: &[Taxonomy]) -> String {
    items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn bullets<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines
        .map(|line| format!("* {line}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One search hit as a `---` separated block
#[must_use]
pub fn format_recipe_summary(recipe: &RecipeSummary) -> String {
    format!(
        "---\n\
         Name: {}\n\
         Slug: {}\n\
         ID: {}\n\
         Original URL: {}\n\
         Prep Time: {}\n\
         Perform Time: {}\n\
         Total Time: {}\n\
         Categories: {}\n\
         Tags: {}\n\
         Servings: {}\n\
         Yield: {}\n\
         \n\
         Description:\n\
         \n\
         {}\n",
        recipe.name,
        recipe.slug,
        text(recipe.id.as_deref()),
        text(recipe.org_url.as_deref()),
        text(recipe.prep_time.as_deref()),
        text(recipe.perform_time.as_deref()),
        text(recipe.total_time.as_deref()),
        names(&recipe.recipe_category),
        names(&recipe.tags),
        number(recipe.recipe_servings),
        number(recipe.recipe_yield_quantity),
        text(recipe.description.as_deref()),
    )
}

/// All search hits, or [`NO_RECIPES_FOUND`]
#[must_use]
pub fn format_recipe_list(recipes: &[RecipeSummary]) -> String {
    if recipes.is_empty() {
        return NO_RECIPES_FOUND.to_owned();
    }
    recipes.iter().map(format_recipe_summary).collect()
}

/// A full recipe with ingredients and instructions
#[must_use]
pub fn format_recipe(recipe: &Recipe) -> String {
    let summary = &recipe.summary;
    let ingredients = bullets(recipe.recipe_ingredient.iter().map(|i| i.display.as_str()));
    let instructions = bullets(recipe.recipe_instructions.iter().map(|i| i.text.as_str()));

    format!(
        "Name: {}\n\
         Original URL: {}\n\
         Prep Time: {}\n\
         Perform Time: {}\n\
         Servings: {}\n\
         Yield: {}\n\
         \n\
         ## Ingredients:\n\
         \n\
         {ingredients}\n\
         \n\
         ## Instructions:\n\
         \n\
         {instructions}\n",
        summary.name,
        text(summary.org_url.as_deref()),
        text(summary.prep_time.as_deref()),
        text(summary.perform_time.as_deref()),
        number(summary.recipe_servings),
        number(summary.recipe_yield_quantity),
    )
}

/// Pretty JSON, falling back to compact output
#[must_use]
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .or_else(|_| serde_json::to_string(value))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary() -> RecipeSummary {
        serde_json::from_value(json!({
            "id": "r-1",
            "name": "Tomato Soup",
            "slug": "tomato-soup",
            "description": "Warm and red.",
            "totalTime": "40 minutes",
            "prepTime": "10 minutes",
            "performTime": "30 minutes",
            "recipeServings": 4.0,
            "recipeYieldQuantity": 1.5,
            "recipeCategory": [{"name": "Soup"}, {"name": "Dinner"}],
            "tags": [{"name": "Vegetarian"}],
            "orgURL": "https://example.com/soup"
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_search_result() {
        assert_eq!(format_recipe_list(&[]), "No recipes found");
    }

    #[test]
    fn test_summary_block() {
        let text = format_recipe_summary(&summary());
        assert!(text.starts_with("---\nName: Tomato Soup\nSlug: tomato-soup\n"));
        assert!(text.contains("Categories: Soup,Dinner\n"));
        assert!(text.contains("Servings: 4\n"));
        assert!(text.contains("Yield: 1.5\n"));
        assert!(text.ends_with("Description:\n\nWarm and red.\n"));
    }

    #[test]
    fn test_full_recipe_lists_ingredients_and_steps() {
        let recipe: Recipe = serde_json::from_value(json!({
            "name": "Tomato Soup",
            "slug": "tomato-soup",
            "recipeIngredient": [{"display": "2 tomatoes"}, {"display": "1 onion"}],
            "recipeInstructions": [{"text": "Chop."}, {"text": "Simmer."}]
        }))
        .unwrap();

        let text = format_recipe(&recipe);
        assert!(text.contains("## Ingredients:\n\n* 2 tomatoes\n\n* 1 onion\n"));
        assert!(text.contains("## Instructions:\n\n* Chop.\n\n* Simmer.\n"));
        assert!(text.contains("Original URL: \n"));
    }
}

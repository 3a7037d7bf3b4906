// ABOUTME: Mealie REST payload models for recipes, notes, and meal plans
// ABOUTME: Only the fields the tools read or write are modeled; the rest pass through untouched
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Named taxonomy entry (category or tag)
#[derive(Debug, Clone, Deserialize)]
pub struct Taxonomy {
    /// Display name
    pub name: String,
}

/// Recipe as returned by the search endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    /// Recipe id
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Total time as entered
    #[serde(default)]
    pub total_time: Option<String>,
    /// Prep time as entered
    #[serde(default)]
    pub prep_time: Option<String>,
    /// Cook time as entered
    #[serde(default)]
    pub perform_time: Option<String>,
    /// Servings
    #[serde(default)]
    pub recipe_servings: Option<f64>,
    /// Yield quantity
    #[serde(default)]
    pub recipe_yield_quantity: Option<f64>,
    /// Categories
    #[serde(default)]
    pub recipe_category: Vec<Taxonomy>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<Taxonomy>,
    /// Source URL the recipe was scraped from
    #[serde(default, rename = "orgURL")]
    pub org_url: Option<String>,
}

/// One ingredient line
#[derive(Debug, Clone, Deserialize)]
pub struct Ingredient {
    /// Rendered ingredient text
    #[serde(default)]
    pub display: String,
}

/// One instruction step
#[derive(Debug, Clone, Deserialize)]
pub struct Instruction {
    /// Step text
    #[serde(default)]
    pub text: String,
}

/// User note attached to a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeNote {
    /// Note title
    pub title: String,
    /// Note body
    pub text: String,
}

/// Full recipe as returned by the single-recipe endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Summary fields
    #[serde(flatten)]
    pub summary: RecipeSummary,
    /// Ingredients in order
    #[serde(default)]
    pub recipe_ingredient: Vec<Ingredient>,
    /// Instructions in order
    #[serde(default)]
    pub recipe_instructions: Vec<Instruction>,
    /// Notes in order
    #[serde(default)]
    pub notes: Vec<RecipeNote>,
}

/// Paged recipe search response
#[derive(Debug, Clone, Deserialize)]
pub struct RecipePage {
    /// Matching recipes on this page
    #[serde(default)]
    pub items: Vec<RecipeSummary>,
}

/// Query for the recipe search endpoint
#[derive(Debug, Clone, Default)]
pub struct RecipeSearch {
    /// Free-text search term
    pub search_term: String,
    /// Category names or slugs
    pub categories: Vec<String>,
    /// Tag names or slugs
    pub tags: Vec<String>,
}

impl RecipeSearch {
    /// Build a search from a term and optional comma separated filters
    #[must_use]
    pub fn from_csv(search_term: &str, categories_csv: Option<&str>, tags_csv: Option<&str>) -> Self {
        Self {
            search_term: search_term.trim().to_owned(),
            categories: split_csv(categories_csv),
            tags: split_csv(tags_csv),
        }
    }
}

fn split_csv(csv: Option<&str>) -> Vec<String> {
    csv.map(|csv| {
        csv.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

/// Date range and paging for meal plan listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealplanQuery {
    /// First day, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// Page number
    pub page: Option<u32>,
    /// Page size
    pub per_page: Option<u32>,
}

/// New meal plan entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMealplanEntry {
    /// Day, `YYYY-MM-DD`
    pub date: String,
    /// Meal slot such as breakfast or dinner
    pub entry_type: String,
    /// Recipe to plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    /// Free-form title when no recipe is linked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

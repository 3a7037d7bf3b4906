// ABOUTME: Recipe tools backed by Mealie for the chef agent.
// ABOUTME: Implements find_recipes_in_mealie, get_recipe_in_mealie, add_recipe_to_mealie_from_url, add_recipe_note.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Tools
//!
//! - `FindRecipesTool` - search recipes by term, categories and tags
//! - `GetRecipeTool` - full recipe text by slug
//! - `AddRecipeFromUrlTool` - import a recipe from a cooking website
//! - `AddRecipeNoteTool` - append a note to a recipe
//!
//! Results are plain text so the agent can quote them directly.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::AppResult;
use crate::formatters::{format_recipe, format_recipe_list};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::mealie::models::{RecipeNote, RecipeSearch};
use crate::tools::context::ToolContext;
use crate::tools::params::{optional_bool, optional_str, required_str};
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

// ============================================================================
// FindRecipesTool
// ============================================================================

/// Search for recipes in Mealie.
pub struct FindRecipesTool;

#[async_trait]
impl McpTool for FindRecipesTool {
    fn name(&self) -> &'static str {
        "find_recipes_in_mealie"
    }

    fn description(&self) -> &'static str {
        "Search for recipes in Mealie by search term, optionally filtered by comma separated \
         category and tag names or slugs. Returns the matching recipes, or \"No recipes found\"."
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "search_term",
                    PropertySchema::new("string", "The string to search for, i.e. \"chicken\""),
                ),
                (
                    "categories_csv",
                    PropertySchema::new(
                        "string",
                        "Comma separated list of category names or slugs to filter by",
                    ),
                ),
                (
                    "tags_csv",
                    PropertySchema::new(
                        "string",
                        "Comma separated list of tag names or slugs to filter by",
                    ),
                ),
            ],
            &["search_term"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::RECIPES
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> AppResult<ToolResult> {
        let search_term = optional_str(&args, self.name(), "search_term")?.unwrap_or_default();
        let categories = optional_str(&args, self.name(), "categories_csv")?;
        let tags = optional_str(&args, self.name(), "tags_csv")?;

        let search = RecipeSearch::from_csv(&search_term, categories.as_deref(), tags.as_deref());
        let page = ctx.mealie.search_recipes(&search).await?;
        tracing::debug!(search = %search.search_term, hits = page.items.len(), "Recipe search finished");
        Ok(ToolResult::text(format_recipe_list(&page.items)))
    }
}

// ============================================================================
// GetRecipeTool
// ============================================================================

/// Fetch one recipe with ingredients and instructions.
pub struct GetRecipeTool;

#[async_trait]
impl McpTool for GetRecipeTool {
    fn name(&self) -> &'static str {
        "get_recipe_in_mealie"
    }

    fn description(&self) -> &'static str {
        "Get a recipe from Mealie using its slug. This returns ingredients and instructions on the recipe."
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![(
                "slug",
                PropertySchema::new("string", "The slug of the recipe to retrieve"),
            )],
            &["slug"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::RECIPES
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> AppResult<ToolResult> {
        let slug = required_str(&args, self.name(), "slug")?;
        let recipe = ctx.mealie.get_recipe(&slug).await?;
        Ok(ToolResult::text(format_recipe(&recipe)))
    }
}

// ============================================================================
// AddRecipeFromUrlTool
// ============================================================================

/// Import a recipe from a web page.
pub struct AddRecipeFromUrlTool;

#[async_trait]
impl McpTool for AddRecipeFromUrlTool {
    fn name(&self) -> &'static str {
        "add_recipe_to_mealie_from_url"
    }

    fn description(&self) -> &'static str {
        "Adds a recipe to Mealie from the URL of a cooking website containing the recipe. \
         Use this when you have found a recipe URL or the user has shared one. \
         Returns the recipe slug, which can be used to update the recipe later."
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "recipe_url",
                    PropertySchema::new("string", "The URL of the recipe to add to Mealie"),
                ),
                (
                    "include_tags",
                    PropertySchema::new(
                        "boolean",
                        "Whether to include tags in the recipe. Defaults to false.",
                    ),
                ),
            ],
            &["recipe_url"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::WRITES_DATA | ToolCapabilities::RECIPES
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> AppResult<ToolResult> {
        let recipe_url = required_str(&args, self.name(), "recipe_url")?;
        let include_tags = optional_bool(&args, self.name(), "include_tags")?.unwrap_or(false);

        let slug = ctx
            .mealie
            .import_recipe_from_url(&recipe_url, include_tags)
            .await?;
        Ok(ToolResult::text(slug))
    }
}

// ============================================================================
// AddRecipeNoteTool
// ============================================================================

/// Append a note to a recipe.
pub struct AddRecipeNoteTool;

#[async_trait]
impl McpTool for AddRecipeNoteTool {
    fn name(&self) -> &'static str {
        "add_recipe_note"
    }

    fn description(&self) -> &'static str {
        "Appends a new note to the given recipe in Mealie. Use notes for chef recommendations \
         and summaries relevant to the discussion."
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "recipe_slug",
                    PropertySchema::new("string", "The slug of the recipe to update"),
                ),
                (
                    "note_title",
                    PropertySchema::new("string", "The title of the note"),
                ),
                (
                    "note_text",
                    PropertySchema::new("string", "The text of the note"),
                ),
            ],
            &["recipe_slug", "note_title", "note_text"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::WRITES_DATA | ToolCapabilities::RECIPES
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> AppResult<ToolResult> {
        let slug = required_str(&args, self.name(), "recipe_slug")?;
        let note = RecipeNote {
            title: required_str(&args, self.name(), "note_title")?,
            text: required_str(&args, self.name(), "note_text")?,
        };

        let notes = ctx.mealie.add_recipe_note(&slug, note).await?;
        Ok(ToolResult::ok(json!({ "notes": notes })))
    }
}

/// All recipe tools
#[must_use]
pub fn create_recipe_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(FindRecipesTool),
        Box::new(GetRecipeTool),
        Box::new(AddRecipeFromUrlTool),
        Box::new(AddRecipeNoteTool),
    ]
}

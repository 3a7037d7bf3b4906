// ABOUTME: Meal plan tools backed by Mealie's household meal plan endpoints.
// ABOUTME: Implements get_all_mealplans, get_todays_mealplan, create_mealplan.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{AppResult, ToolError};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::mealie::models::{MealplanQuery, NewMealplanEntry};
use crate::tools::context::ToolContext;
use crate::tools::params::{optional_date, optional_str, optional_u32, required_date};
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

/// Meal slot used when none is given
pub const DEFAULT_ENTRY_TYPE: &str = "breakfast";

/// List meal plans with optional date range and paging.
pub struct GetAllMealplansTool;

#[async_trait]
impl McpTool for GetAllMealplansTool {
    fn name(&self) -> &'static str {
        "get_all_mealplans"
    }

    fn description(&self) -> &'static str {
        "Get all meal plans for the current household with pagination"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "start_date",
                    PropertySchema::new("string", "Start date for filtering (YYYY-MM-DD)"),
                ),
                (
                    "end_date",
                    PropertySchema::new("string", "End date for filtering (YYYY-MM-DD)"),
                ),
                ("page", PropertySchema::new("integer", "Page number to retrieve")),
                ("per_page", PropertySchema::new("integer", "Number of items per page")),
            ],
            &[],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::MEAL_PLANS
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> AppResult<ToolResult> {
        let query = MealplanQuery {
            start_date: optional_date(&args, self.name(), "start_date")?,
            end_date: optional_date(&args, self.name(), "end_date")?,
            page: optional_u32(&args, self.name(), "page")?,
            per_page: optional_u32(&args, self.name(), "per_page")?,
        };
        Ok(ToolResult::ok(ctx.mealie.get_mealplans(&query).await?))
    }
}

/// Today's meal plan entries.
pub struct GetTodaysMealplanTool;

#[async_trait]
impl McpTool for GetTodaysMealplanTool {
    fn name(&self) -> &'static str {
        "get_todays_mealplan"
    }

    fn description(&self) -> &'static str {
        "Get the meal plan entries for today"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::empty()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::MEAL_PLANS
    }

    async fn execute(&self, _args: Value, ctx: &ToolContext) -> AppResult<ToolResult> {
        Ok(ToolResult::ok(ctx.mealie.get_todays_mealplan().await?))
    }
}

/// Add a meal plan entry for a recipe or a free-form title.
pub struct CreateMealplanTool;

impl CreateMealplanTool {
    fn entry_from_args(&self, args: &Value) -> Result<NewMealplanEntry, ToolError> {
        let recipe_id = optional_str(args, self.name(), "recipe_id")?;
        let title = optional_str(args, self.name(), "title")?;
        if recipe_id.is_none() && title.is_none() {
            return Err(ToolError::invalid_parameter(
                self.name(),
                "recipe_id",
                "either recipe_id or title must be provided",
            ));
        }
        Ok(NewMealplanEntry {
            date: required_date(args, self.name(), "date")?,
            entry_type: optional_str(args, self.name(), "entry_type")?
                .unwrap_or_else(|| DEFAULT_ENTRY_TYPE.to_owned()),
            recipe_id,
            title,
        })
    }
}

#[async_trait]
impl McpTool for CreateMealplanTool {
    fn name(&self) -> &'static str {
        "create_mealplan"
    }

    fn description(&self) -> &'static str {
        "Create a new meal plan entry for a recipe (by recipe_id) or a free-form title"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                ("date", PropertySchema::new("string", "Date of the entry (YYYY-MM-DD)")),
                (
                    "recipe_id",
                    PropertySchema::new("string", "ID of the recipe to plan (optional)"),
                ),
                (
                    "title",
                    PropertySchema::new("string", "Title when not using a recipe (optional)"),
                ),
                (
                    "entry_type",
                    PropertySchema::new(
                        "string",
                        "Meal slot: breakfast, lunch, dinner, side. Defaults to breakfast.",
                    ),
                ),
            ],
            &["date"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::WRITES_DATA | ToolCapabilities::MEAL_PLANS
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> AppResult<ToolResult> {
        let entry = self.entry_from_args(&args)?;
        Ok(ToolResult::ok(ctx.mealie.create_mealplan(&entry).await?))
    }
}

/// All meal plan tools
#[must_use]
pub fn create_mealplan_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(GetAllMealplansTool),
        Box::new(GetTodaysMealplanTool),
        Box::new(CreateMealplanTool),
    ]
}

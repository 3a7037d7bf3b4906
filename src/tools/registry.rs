// ABOUTME: Central registry for the gateway's local MCP tools with category bookkeeping and execution.
// ABOUTME: Provides tool discovery, schema listing for tools/list, and dispatch for tools/call.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Registry
//!
//! Built once at startup and then used immutably. All tools are
//! `Arc`-wrapped for sharing across request tasks.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::{AppResult, ToolError};
use crate::mcp::schema::ToolSchema;

use super::context::ToolContext;
use super::implementations::{
    agent::create_agent_tools, mealplans::create_mealplan_tools,
    notifications::create_notification_tools, recipes::create_recipe_tools,
};
use super::result::ToolResult;
use super::traits::McpTool;

/// Central registry for local MCP tools.
pub struct ToolRegistry {
    /// Registered tools by name
    tools: HashMap<String, Arc<dyn McpTool>>,
    /// Tool categories for organization
    categories: BTreeMap<String, Vec<String>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            categories: BTreeMap::new(),
        }
    }

    /// Register a tool in the registry
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> Result<(), ToolError> {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!("Tool '{}' is already registered, skipping", name);
            return Err(ToolError::already_registered(name));
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Register a tool and categorize it; duplicates are skipped
    pub fn register_with_category(&mut self, tool: Arc<dyn McpTool>, category: &str) {
        let name = tool.name().to_owned();
        if self.register(tool).is_ok() {
            self.categories
                .entry(category.to_owned())
                .or_default()
                .push(name);
        }
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All tool names, sorted
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Schemas for `tools/list`, sorted by name
    #[must_use]
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema().to_value(),
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the tool is not found or its execution fails
    pub async fn execute(&self, name: &str, args: Value, context: &ToolContext) -> AppResult<ToolResult> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;
        tool.execute(args, context).await
    }

    /// Register all built-in tools.
    ///
    /// The notification tool is only registered when a notification backend
    /// is configured.
    pub fn register_builtin_tools(&mut self, notifications_enabled: bool) {
        info!("Registering built-in tools...");

        for tool in create_recipe_tools() {
            self.register_with_category(Arc::from(tool), "recipes");
        }
        for tool in create_mealplan_tools() {
            self.register_with_category(Arc::from(tool), "mealplans");
        }
        for tool in create_agent_tools() {
            self.register_with_category(Arc::from(tool), "agents");
        }
        if notifications_enabled {
            for tool in create_notification_tools() {
                self.register_with_category(Arc::from(tool), "notifications");
            }
        } else {
            debug!("Notifications not configured, skipping notification tools");
        }

        info!(
            categories = ?self.categories.keys().collect::<Vec<_>>(),
            "Registered {} built-in tools",
            self.tools.len()
        );
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.len())
            .field("tools", &self.tool_names())
            .field("categories", &self.categories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::traits::ToolCapabilities;

    #[test]
    fn test_builtin_tools_without_notifications() {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools(false);

        for name in [
            "find_recipes_in_mealie",
            "get_recipe_in_mealie",
            "add_recipe_to_mealie_from_url",
            "add_recipe_note",
            "get_all_mealplans",
            "get_todays_mealplan",
            "create_mealplan",
            "create_chef_agent",
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert!(!registry.contains("send_notification"));
    }

    #[test]
    fn test_notification_tool_when_enabled() {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools(true);
        assert!(registry.contains("send_notification"));
        assert_eq!(registry.categories["notifications"], vec!["send_notification"]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools(false);
        let count = registry.len();
        registry.register_builtin_tools(false);
        assert_eq!(registry.len(), count);
    }

    #[test]
    fn test_schemas_sorted_and_writers_flagged() {
        let mut registry = ToolRegistry::new();
        registry.register_builtin_tools(false);
        let names: Vec<String> = registry.schemas().into_iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        let note = registry.get("add_recipe_note").unwrap();
        assert!(note.capabilities().contains(ToolCapabilities::WRITES_DATA));
    }
}

// ABOUTME: Defines the McpTool trait and ToolCapabilities for the gateway's local tools.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Tool Trait and Capabilities
//!
//! Every tool served directly by the gateway implements [`McpTool`]:
//! - metadata (name, description, input schema)
//! - capability flags used for logging and filtering
//! - async execution against the shared [`ToolContext`]
//!
//! Proxied sub-server tools do not implement this trait; the gateway routes
//! them by prefix instead.

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for filtering and discovery.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool reads data from an upstream service
        const READS_DATA = 0b0000_0001;
        /// Tool writes/modifies data in an upstream service
        const WRITES_DATA = 0b0000_0010;
        /// Tool works with recipes
        const RECIPES = 0b0000_0100;
        /// Tool works with meal plans
        const MEAL_PLANS = 0b0000_1000;
        /// Tool sends notifications
        const NOTIFICATIONS = 0b0001_0000;
        /// Tool manages agents on the agent platform
        const AGENTS = 0b0010_0000;
    }
}

impl ToolCapabilities {
    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = [
            (Self::READS_DATA, "reads_data"),
            (Self::WRITES_DATA, "writes_data"),
            (Self::RECIPES, "recipes"),
            (Self::MEAL_PLANS, "meal_plans"),
            (Self::NOTIFICATIONS, "notifications"),
            (Self::AGENTS, "agents"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The trait all gateway tools implement.
///
/// Tools are `Send + Sync` and shared across requests through `Arc`.
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use recipellm_mcp_server::tools::{McpTool, ToolCapabilities, ToolContext, ToolResult};
/// use recipellm_mcp_server::mcp::schema::JsonSchema;
/// use recipellm_mcp_server::errors::AppResult;
/// use serde_json::Value;
///
/// struct PingTool;
///
/// #[async_trait]
/// impl McpTool for PingTool {
///     fn name(&self) -> &'static str {
///         "ping"
///     }
///
///     fn description(&self) -> &'static str {
///         "Reply with pong"
///     }
///
///     fn input_schema(&self) -> JsonSchema {
///         JsonSchema::empty()
///     }
///
///     fn capabilities(&self) -> ToolCapabilities {
///         ToolCapabilities::empty()
///     }
///
///     async fn execute(&self, _args: Value, _context: &ToolContext) -> AppResult<ToolResult> {
///         Ok(ToolResult::text("pong"))
///     }
/// }
/// ```
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique tool name used in `tools/call`
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for invalid arguments or upstream failures
    async fn execute(&self, args: Value, context: &ToolContext) -> AppResult<ToolResult>;
}

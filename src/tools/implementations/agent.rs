// ABOUTME: Agent management tool exposing chef agent provisioning through the gateway.
// ABOUTME: Implements create_chef_agent, which looks up or creates the chef agent.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::agents::ProvisionOutcome;
use crate::errors::{AppError, AppResult};
use crate::mcp::schema::JsonSchema;
use crate::tools::context::ToolContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

/// Ensure the chef agent exists.
pub struct CreateChefAgentTool;

#[async_trait]
impl McpTool for CreateChefAgentTool {
    fn name(&self) -> &'static str {
        "create_chef_agent"
    }

    fn description(&self) -> &'static str {
        "Create the chef agent on the agent platform if it does not exist yet, returning its id"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::empty()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::AGENTS | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, _args: Value, ctx: &ToolContext) -> AppResult<ToolResult> {
        let outcome = ctx
            .provisioner
            .ensure_agent()
            .await
            .map_err(AppError::from)?;
        let created = matches!(outcome, ProvisionOutcome::Created(_));
        info!(agent_id = %outcome.agent_id(), created, "Chef agent id");

        Ok(ToolResult::ok(json!({
            "agent_id": outcome.agent_id(),
            "agent_name": outcome.descriptor().name,
            "created": created,
        })))
    }
}

/// All agent tools
#[must_use]
pub fn create_agent_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(CreateChefAgentTool)]
}

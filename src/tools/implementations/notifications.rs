// ABOUTME: Notification tool letting the agent push a message to the household.
// ABOUTME: Implements send_notification over the configured ntfy-style topic.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolContext;
use crate::tools::params::{optional_str, required_str};
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

/// Publish a notification.
pub struct SendNotificationTool;

#[async_trait]
impl McpTool for SendNotificationTool {
    fn name(&self) -> &'static str {
        "send_notification"
    }

    fn description(&self) -> &'static str {
        "Send a push notification to the user, for example when a timer is done or a meal plan changed"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                ("message", PropertySchema::new("string", "Notification body")),
                ("title", PropertySchema::new("string", "Notification title (optional)")),
            ],
            &["message"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::NOTIFICATIONS
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> AppResult<ToolResult> {
        let message = required_str(&args, self.name(), "message")?;
        let title = optional_str(&args, self.name(), "title")?;

        ctx.notifications()?.send(&message, title.as_deref()).await?;
        Ok(ToolResult::text("Notification sent"))
    }
}

/// All notification tools
#[must_use]
pub fn create_notification_tools() -> Vec<Box<dyn McpTool>> {
    vec![Box::new(SendNotificationTool)]
}

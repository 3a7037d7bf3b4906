// ABOUTME: Defines ToolResult for tool execution responses.
// ABOUTME: Converts text or JSON tool output into the MCP tools/call response shape.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::Value;

use crate::formatters::format_json;
use crate::mcp::schema::{Content, ToolResponse};

/// Result returned by tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The result value; strings are returned as text, anything else as JSON
    pub content: Value,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result with JSON content
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create an error result carrying a message
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: Value::String(message.into()),
            is_error: true,
        }
    }

    /// Create a text result
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self::ok(Value::String(message.into()))
    }

    /// Convert into the MCP `tools/call` result
    #[must_use]
    pub fn into_response(self) -> ToolResponse {
        match self.content {
            Value::String(text) => ToolResponse::text(text, self.is_error),
            other => ToolResponse {
                content: vec![Content::Text {
                    text: format_json(&other),
                }],
                is_error: self.is_error,
                structured_content: Some(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_result_keeps_structured_content() {
        let response = ToolResult::ok(json!({"items": []})).into_response();
        assert_eq!(response.structured_content, Some(json!({"items": []})));
        assert!(!response.is_error);
    }

    #[test]
    fn test_error_result_is_flagged() {
        let response = ToolResult::error("boom").into_response();
        assert!(response.is_error);
        assert!(response.structured_content.is_none());
    }
}

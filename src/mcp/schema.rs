// ABOUTME: MCP protocol schema definitions and message structures
// ABOUTME: Typed initialize, tools/list, and tools/call payloads exchanged with MCP clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! MCP Protocol Schema Definitions
//!
//! Type-safe definitions for the subset of MCP messages the gateway serves.
//! Tool input schemas of local tools are built with [`JsonSchema`]; schemas of
//! proxied tools are passed through as raw JSON.

use crate::constants::gateway::{MCP_PROTOCOL_VERSION, SERVER_INSTRUCTIONS, SERVER_NAME};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Server Information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// MCP Tool Schema Definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Description for the LLM
    #[serde(default)]
    pub description: String,
    /// JSON Schema of the arguments
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// JSON Schema Definition for local tool arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always `object`
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Argument properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, PropertySchema>>,
    /// Required argument names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchema {
    /// Object schema with no properties
    #[must_use]
    pub fn empty() -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: None,
            required: None,
        }
    }

    /// Object schema with the given properties and required names
    #[must_use]
    pub fn object(properties: Vec<(&str, PropertySchema)>, required: &[&str]) -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, schema)| (name.to_owned(), schema))
                    .collect(),
            ),
            required: (!required.is_empty())
                .then(|| required.iter().map(|name| (*name).to_owned()).collect()),
        }
    }

    /// Raw JSON form for `tools/list`
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// JSON Schema Property Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type name
    #[serde(rename = "type")]
    pub property_type: String,
    /// Description for the LLM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertySchema {
    /// A property of `property_type` with a description
    #[must_use]
    pub fn new(property_type: &str, description: &str) -> Self {
        Self {
            property_type: property_type.to_owned(),
            description: Some(description.to_owned()),
        }
    }
}

/// `tools/call` parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name, possibly prefixed for proxied tools
    pub name: String,
    /// Arguments object
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// `tools/call` result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Result content
    pub content: Vec<Content>,
    /// Whether the tool reported a failure
    #[serde(rename = "isError", default)]
    pub is_error: bool,
    /// Machine readable result, when the tool returned JSON
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

impl ToolResponse {
    /// A single text block
    #[must_use]
    pub fn text(text: impl Into<String>, is_error: bool) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error,
            structured_content: None,
        }
    }
}

/// Content types for MCP messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text
    #[serde(rename = "text")]
    Text {
        /// The text
        text: String,
    },
}

/// `tools/list` result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsListResult {
    /// Available tools
    pub tools: Vec<ToolSchema>,
}

/// Tool capability advertisement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// Whether `notifications/tools/list_changed` is sent
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// MCP Server Capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tool support
    pub tools: ToolsCapability,
}

/// `initialize` result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// Negotiated protocol version
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities
    pub capabilities: ServerCapabilities,
    /// Server identity
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Usage hints for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResponse {
    /// This gateway's initialize response
    #[must_use]
    pub fn gateway() -> Self {
        Self {
            protocol_version: MCP_PROTOCOL_VERSION.to_owned(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_owned()),
        }
    }
}

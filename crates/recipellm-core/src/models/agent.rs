// ABOUTME: Agent descriptor, memory block, and tool binding models for the agent platform
// ABOUTME: Encodes the memory block capacity rule applied when agents are created
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::agent::{BLOCK_LIMIT_FLOOR, BLOCK_LIMIT_MARGIN};

/// A labeled text buffer attached to an agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    /// Block label, e.g. `persona` or `human`
    pub label: String,
    /// Block content
    pub value: String,
    /// Capacity in characters
    pub limit: usize,
}

impl MemoryBlock {
    /// Create a block whose capacity follows [`block_limit`]
    pub fn sized(label: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: label.into(),
            limit: block_limit(&value),
            value,
        }
    }
}

/// Capacity for a memory block holding `content`.
///
/// The larger of the fixed floor and the content length plus a margin, so
/// the content can always grow by at least the margin before the platform
/// rejects writes.
#[must_use]
pub fn block_limit(content: &str) -> usize {
    BLOCK_LIMIT_FLOOR.max(content.chars().count() + BLOCK_LIMIT_MARGIN)
}

/// Reference to a tool offered by a named tool source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolBinding {
    /// Tool name as exposed by the source server
    pub tool_name: String,
    /// Registered MCP server name on the agent platform
    pub source_server: String,
}

impl ToolBinding {
    /// Create a binding
    pub fn new(tool_name: impl Into<String>, source_server: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            source_server: source_server.into(),
        }
    }
}

/// Everything needed to create an agent.
///
/// Serializes directly to the agent platform's create-agent request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSpec {
    /// Agent name, the unique lookup key
    pub name: String,
    /// Ordered memory blocks
    pub memory_blocks: Vec<MemoryBlock>,
    /// Chat model handle
    pub model: String,
    /// Embedding model handle
    pub embedding: String,
    /// Resolved tool identifiers
    pub tool_ids: Vec<String>,
    /// IANA timezone name
    pub timezone: String,
    /// Sleep-time agents are not used
    pub enable_sleeptime: bool,
    /// Environment passed to tool executions
    pub tool_exec_environment_variables: BTreeMap<String, String>,
}

impl AgentSpec {
    /// Add a tool identifier, keeping the set free of duplicates
    pub fn push_tool_id(&mut self, tool_id: impl Into<String>) {
        let tool_id = tool_id.into();
        if !self.tool_ids.contains(&tool_id) {
            self.tool_ids.push(tool_id);
        }
    }
}

/// Agent as reported by the agent platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Platform-assigned agent id
    pub id: String,
    /// Agent name
    pub name: String,
    /// Timezone, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_limit_floor_for_short_content() {
        assert_eq!(block_limit(""), BLOCK_LIMIT_FLOOR);
        assert_eq!(block_limit("short persona"), BLOCK_LIMIT_FLOOR);
    }

    #[test]
    fn test_block_limit_keeps_margin_near_floor() {
        let content = "x".repeat(4500);
        assert_eq!(block_limit(&content), 5500);
    }

    #[test]
    fn test_block_limit_counts_characters() {
        let content = "é".repeat(4500);
        assert_eq!(block_limit(&content), 5500);
    }

    #[test]
    fn test_push_tool_id_deduplicates() {
        let mut spec = AgentSpec {
            name: "chef-agent".into(),
            memory_blocks: vec![],
            model: "m".into(),
            embedding: "e".into(),
            tool_ids: vec![],
            timezone: "UTC".into(),
            enable_sleeptime: false,
            tool_exec_environment_variables: BTreeMap::new(),
        };
        spec.push_tool_id("tool-1");
        spec.push_tool_id("tool-1");
        spec.push_tool_id("tool-2");
        assert_eq!(spec.tool_ids, vec!["tool-1", "tool-2"]);
    }
}

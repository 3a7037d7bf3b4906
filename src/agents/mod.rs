// ABOUTME: Agent platform integration: Letta client, chef agent provisioning, tool source registration
// ABOUTME: All platform calls go through the AgentPlatform trait so they can be faked in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Platform trait and Letta REST client
pub mod platform;
/// Idempotent chef agent creation
pub mod provisioner;
/// MCP server registration for the gateway
pub mod tool_source;

pub use platform::{AgentPlatform, LettaClient};
pub use provisioner::{AgentBlueprint, AgentProvisioner, ProvisionOutcome};
pub use tool_source::{ensure_tool_source, ToolSourceStatus};

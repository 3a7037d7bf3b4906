// ABOUTME: Registers this gateway as a named SSE MCP server on the agent platform
// ABOUTME: Registration is skipped when a server with the same name already exists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::AgentPlatform;
use crate::errors::AppResult;
use tracing::info;

/// Whether a registration call was made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSourceStatus {
    /// A server with this name was already registered
    AlreadyRegistered,
    /// The server was registered by this call
    Registered,
}

/// Ensure `server_name` is registered on the platform, pointing at `server_url`.
///
/// An existing registration is returned as-is, even if its URL differs.
///
/// # Errors
///
/// Returns an error if listing or registering MCP servers fails
pub async fn ensure_tool_source(
    platform: &dyn AgentPlatform,
    server_name: &str,
    server_url: &str,
) -> AppResult<ToolSourceStatus> {
    let registered = platform.list_mcp_servers().await?;
    if registered.iter().any(|name| name == server_name) {
        info!(server_name = %server_name, "MCP server already registered");
        return Ok(ToolSourceStatus::AlreadyRegistered);
    }

    platform.register_mcp_server(server_name, server_url).await?;
    info!(server_name = %server_name, server_url = %server_url, "Registered MCP server");
    Ok(ToolSourceStatus::Registered)
}

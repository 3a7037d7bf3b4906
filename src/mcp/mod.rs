// ABOUTME: Model Context Protocol (MCP) gateway serving recipe, meal plan and notification tools
// ABOUTME: Groups the JSON-RPC dispatcher, sub-server proxy, gateway mount, schemas and SSE transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON-RPC dispatch over local and proxied tools
pub mod gateway;
/// Gateway assembly from the resolved credential
pub mod mount;
/// Stdio client for the Mealie MCP sub-server
pub mod proxy;
/// MCP wire types
pub mod schema;
/// SSE session tracking
pub mod sse_transport;

pub use gateway::McpGateway;
pub use mount::ToolGatewayMount;
pub use proxy::{McpProxy, ProxyError};
pub use sse_transport::{SseMessage, SseSessions};

// ABOUTME: Route module organization for the RecipeLLM MCP server HTTP endpoints
// ABOUTME: Assembles health, setup and MCP transport routes under one traced router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Each domain module owns its route definitions and thin handlers that
//! delegate to the gateway or the provisioner.

/// Liveness check
pub mod health;
/// Model Context Protocol transports
pub mod mcp;
/// Manual agent provisioning trigger
pub mod setup;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::agents::AgentProvisioner;
use crate::mcp::{McpGateway, SseSessions};

pub use health::HealthRoutes;
pub use mcp::{McpRoutes, McpState};
pub use setup::SetupRoutes;

/// Build the full HTTP router
pub fn router(gateway: Arc<McpGateway>, provisioner: Arc<AgentProvisioner>) -> Router {
    let mcp_state = McpState {
        gateway,
        sessions: Arc::new(SseSessions::new()),
    };

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(SetupRoutes::routes(provisioner))
        .merge(McpRoutes::routes(mcp_state))
        .layer(TraceLayer::new_for_http())
}

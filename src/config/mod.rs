// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration for Mealie, Letta, the gateway, and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the RecipeLLM MCP server
//!
//! All configuration comes from environment variables; CLI flags in the
//! binary may override individual values afterwards.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    BootstrapIdentity, GatewayConfig, LettaConfig, MealieConfig, NotificationConfig,
    ProxyCommandConfig, ServerConfig,
};

// ABOUTME: Main library entry point for the RecipeLLM MCP server
// ABOUTME: Bootstraps Mealie credentials and the Letta chef agent, and serves recipe tools over MCP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # RecipeLLM MCP Server
//!
//! Bridges a Letta "chef" agent to a Mealie recipe server and a notification
//! service through a Model Context Protocol (MCP) tool gateway.
//!
//! ## Startup
//!
//! - **Credential bootstrap**: reuse a persisted Mealie API token when it is
//!   still accepted, otherwise log in with the bootstrap identity and mint a
//!   new one, falling back to `MEALIE_API_KEY` when that fails
//! - **Tool source**: register this gateway as an MCP server on Letta
//! - **Agent provisioning**: look up the chef agent by name and create it
//!   only when missing
//!
//! ## Architecture
//!
//! - **auth**: credential store, validator, minter and the bootstrap state machine
//! - **agents**: agent platform seam, Letta client and the provisioner
//! - **mcp**: JSON-RPC gateway, sub-server proxy and SSE transport
//! - **tools**: recipe, meal plan, notification and agent tools
//! - **routes**: `/health`, `/setup` and the MCP transports
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipellm_mcp_server::config::environment::ServerConfig;
//! use recipellm_mcp_server::lifecycle::{shutdown_signal, ServerLifecycle};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.gateway.http_port)).await?;
//!     ServerLifecycle::from_config(config)
//!         .run(listener, shutdown_signal())
//!         .await
//! }
//! ```

/// Agent platform client and chef agent provisioning
pub mod agents;

/// Mealie credential bootstrap
pub mod auth;

/// Configuration loaded from the environment
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Plain-text rendering of recipes for the agent
pub mod formatters;

/// JSON-RPC 2.0 message types
pub mod jsonrpc;

/// Startup orchestration and graceful shutdown
pub mod lifecycle;

/// Production logging and structured output
pub mod logging;

/// Model Context Protocol gateway
pub mod mcp;

/// Mealie REST client
pub mod mealie;

/// Shared data models for agents and credentials
pub mod models;

/// Push notifications
pub mod notifications;

/// HTTP routes
pub mod routes;

/// MCP tools exposed by the gateway
pub mod tools;

/// Utility functions and helpers
pub mod utils;

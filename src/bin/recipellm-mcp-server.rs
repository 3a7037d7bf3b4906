// ABOUTME: Server binary bootstrapping Mealie credentials and the chef agent, then serving the MCP gateway
// ABOUTME: Loads configuration from the environment with CLI overrides and runs until SIGINT/SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # RecipeLLM MCP Server Binary
//!
//! Resolves a Mealie API credential, registers this gateway on the Letta
//! agent platform, serves recipe and notification tools over MCP, and makes
//! sure the chef agent exists.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use recipellm_mcp_server::{
    config::environment::ServerConfig,
    lifecycle::{shutdown_signal, ServerLifecycle},
    logging,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recipellm-mcp-server")]
#[command(about = "RecipeLLM MCP Server - Mealie recipe tools and chef agent bootstrap for Letta")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the persisted Mealie credential file
    #[arg(long)]
    token_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.gateway.http_port = http_port;
    }
    if let Some(token_file) = args.token_file {
        config.mealie.token_file = token_file;
    }

    info!("Starting RecipeLLM MCP Server");
    info!("{}", config.summary());

    let address = format!("{}:{}", config.gateway.host, config.gateway.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    display_available_endpoints(&config);

    if let Err(e) = ServerLifecycle::from_config(config)
        .run(listener, shutdown_signal())
        .await
    {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Display all available endpoints
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.gateway.host;
    let port = config.gateway.http_port;

    info!("=== Available Endpoints ===");
    info!("Service:");
    info!("   Health:            GET  http://{host}:{port}/health");
    info!("   Agent Setup:       POST http://{host}:{port}/setup");
    info!("MCP Protocol:");
    info!("   HTTP Transport:    POST http://{host}:{port}/mcp");
    info!("   Server-Sent Events: GET http://{host}:{port}/sse");
    info!("   SSE Messages:      POST http://{host}:{port}/messages?session_id={{id}}");
    info!("   Advertised URL:    {}", config.gateway.public_url);
    info!("=== End of Endpoint List ===");
}

// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging and a server configuration pointing at fake backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `recipellm_mcp_server`

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Once};

use recipellm_mcp_server::agents::{AgentBlueprint, AgentPlatform, AgentProvisioner, LettaClient};
use recipellm_mcp_server::config::environment::ServerConfig;
use recipellm_mcp_server::mcp::{McpGateway, ToolGatewayMount};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration pointing at the given backends, with the sub-server disabled
pub fn test_config(mealie_url: &str, letta_url: &str, token_file: &Path) -> ServerConfig {
    test_config_with(mealie_url, letta_url, token_file, &[])
}

/// Like [`test_config`], with extra variables layered on top
pub fn test_config_with(
    mealie_url: &str,
    letta_url: &str,
    token_file: &Path,
    extra: &[(&str, &str)],
) -> ServerConfig {
    let token_file = token_file.display().to_string();
    let mut vars: HashMap<&str, String> = HashMap::from([
        ("MEALIE_BASE_URL", mealie_url.to_owned()),
        ("MEALIE_API_KEY", "fallback-key".to_owned()),
        ("MEALIE_TOKEN_FILE", token_file),
        ("LETTA_BASE_URL", letta_url.to_owned()),
        ("LETTA_TOKEN", "letta-token".to_owned()),
        ("RECIPELLM_MCP_SERVER_URL", "http://recipellm:8000/sse".to_owned()),
        ("MEALIE_MCP_COMMAND", String::new()),
    ]);
    for (key, value) in extra {
        vars.insert(key, (*value).to_owned());
    }
    ServerConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Chef agent provisioner talking to the Letta at `config.letta.base_url`
pub fn provisioner(config: &ServerConfig) -> Arc<AgentProvisioner> {
    let platform: Arc<dyn AgentPlatform> = Arc::new(LettaClient::from_config(&config.letta));
    Arc::new(AgentProvisioner::new(
        platform,
        AgentBlueprint::chef(&config.letta),
    ))
}

/// Gateway with the built-in tools and no sub-server, bound to `credential`
pub fn local_gateway(config: &ServerConfig, credential: &str) -> McpGateway {
    ToolGatewayMount::from_credential(config, credential, provisioner(config))
        .register_tools()
        .finish()
}

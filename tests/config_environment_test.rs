// ABOUTME: Tests for loading the server configuration from process environment variables
// ABOUTME: Serialized with serial_test because every case mutates the shared environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::Path;

use recipellm_mcp_server::config::environment::ServerConfig;
use serial_test::serial;

const VARS: &[&str] = &[
    "MEALIE_BASE_URL",
    "MEALIE_API_KEY",
    "MEALIE_TOKEN_FILE",
    "MEALIE_USERNAME",
    "MEALIE_PASSWORD",
    "MEALIE_MCP_COMMAND",
    "MEALIE_MCP_DIR",
    "LETTA_BASE_URL",
    "LETTA_TOKEN",
    "LETTA_MODEL",
    "LETTA_EMBEDDING",
    "RECIPELLM_MCP_SERVER_URL",
    "HOST",
    "HTTP_PORT",
    "NOTIFICATION_BASE_URL",
    "NOTIFICATION_TOPIC",
];

fn reset_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

fn set_required() {
    env::set_var("MEALIE_BASE_URL", "http://mealie:9000");
    env::set_var("MEALIE_API_KEY", "fallback-key");
    env::set_var("LETTA_BASE_URL", "http://letta:8283");
    env::set_var("LETTA_TOKEN", "letta-token");
    env::set_var("RECIPELLM_MCP_SERVER_URL", "http://recipellm:8000/sse");
}

#[test]
#[serial]
fn test_defaults_from_env() {
    reset_env();
    set_required();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.gateway.http_port, 8000);
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.mealie.token_file, Path::new("./data/mealie_token.json"));
    assert_eq!(config.mealie.bootstrap.username, "changeme@example.com");
    assert_eq!(config.mealie.bootstrap.password, "MyPassword");
    assert_eq!(config.letta.model, "letta/letta-free");
    assert_eq!(config.letta.embedding, "letta/letta-free");
    assert!(config.notifications.is_none());

    let proxy = config.gateway.mealie_mcp.unwrap();
    assert_eq!(proxy.program, "uv");
    assert_eq!(proxy.args, vec!["run", "src/server.py"]);
    reset_env();
}

#[test]
#[serial]
fn test_missing_required_variable_is_named() {
    reset_env();
    set_required();
    env::remove_var("LETTA_TOKEN");

    let error = ServerConfig::from_env().unwrap_err();

    assert!(error.to_string().contains("LETTA_TOKEN"), "{error}");
    reset_env();
}

#[test]
#[serial]
fn test_overrides_from_env() {
    reset_env();
    set_required();
    env::set_var("HTTP_PORT", "9100");
    env::set_var("LETTA_MODEL", "openai/gpt-4o-mini");
    env::set_var("MEALIE_TOKEN_FILE", "/var/lib/recipellm/token.json");
    env::set_var("NOTIFICATION_BASE_URL", "http://ntfy:80");
    env::set_var("NOTIFICATION_TOPIC", "kitchen");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.gateway.http_port, 9100);
    assert_eq!(config.letta.model, "openai/gpt-4o-mini");
    assert_eq!(
        config.mealie.token_file,
        Path::new("/var/lib/recipellm/token.json")
    );
    let notifications = config.notifications.unwrap();
    assert_eq!(notifications.topic, "kitchen");
    reset_env();
}

#[test]
#[serial]
fn test_empty_sub_server_command_disables_proxy() {
    reset_env();
    set_required();
    env::set_var("MEALIE_MCP_COMMAND", "");

    let config = ServerConfig::from_env().unwrap();

    assert!(config.gateway.mealie_mcp.is_none());
    assert!(config.summary().contains("Mealie MCP sub-server: Disabled"));
    reset_env();
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    reset_env();
    set_required();
    env::set_var("HTTP_PORT", "eighty");

    assert!(ServerConfig::from_env().is_err());
    reset_env();
}

#[test]
#[serial]
fn test_non_http_upstream_is_rejected() {
    reset_env();
    set_required();
    env::set_var("MEALIE_BASE_URL", "ftp://mealie");

    let error = ServerConfig::from_env().unwrap_err();

    assert!(error.to_string().contains("MEALIE_BASE_URL"), "{error}");
    reset_env();
}

// ABOUTME: HTTP route tests for health, setup and the MCP transports
// ABOUTME: Drives the assembled router with one-shot requests, including the SSE endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use helpers::axum_test::AxumTestRequest;
use helpers::fake_backends::FakeLetta;
use recipellm_mcp_server::constants::agent::REQUESTED_TOOLS;
use recipellm_mcp_server::jsonrpc::error_codes;
use recipellm_mcp_server::routes;
use serde_json::{json, Value};
use tempfile::TempDir;

fn app(letta_url: &str, dir: &TempDir) -> Router {
    let config = common::test_config(
        "http://mealie.invalid",
        letta_url,
        &dir.path().join("token.json"),
    );
    let gateway = Arc::new(common::local_gateway(&config, "abc"));
    routes::router(gateway, common::provisioner(&config))
}

#[tokio::test]
async fn test_health_returns_ok() {
    let dir = TempDir::new().unwrap();

    let response = AxumTestRequest::get("/health")
        .send(app("http://letta.invalid", &dir))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_setup_provisions_agent_in_background() {
    common::init_test_logging();
    let letta = FakeLetta::start(&["letta/letta-free"], REQUESTED_TOOLS).await;
    let dir = TempDir::new().unwrap();

    let response = AxumTestRequest::post("/setup")
        .send(app(&letta.base_url, &dir))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), "OK");

    for _ in 0..50 {
        if letta.creates() == 1 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("agent was not created after POST /setup");
}

#[tokio::test]
async fn test_setup_reports_ok_even_when_provisioning_fails() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();

    let response = AxumTestRequest::post("/setup")
        .send(app("http://127.0.0.1:9", &dir))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_mcp_initialize_over_http() {
    let dir = TempDir::new().unwrap();

    let response = AxumTestRequest::post("/mcp")
        .json(&json!({"jsonrpc": "2.0", "id": 7, "method": "initialize", "params": {}}))
        .send(app("http://letta.invalid", &dir))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["id"], 7);
    assert_eq!(body["result"]["serverInfo"]["name"], "recipellm-mcp-server");
}

#[tokio::test]
async fn test_mcp_notification_is_accepted_without_body() {
    let dir = TempDir::new().unwrap();

    let response = AxumTestRequest::post("/mcp")
        .json(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
        .send(app("http://letta.invalid", &dir))
        .await;

    assert_eq!(response.status(), 202);
}

#[tokio::test]
async fn test_mcp_malformed_body_is_parse_error() {
    let dir = TempDir::new().unwrap();

    let response = AxumTestRequest::post("/mcp")
        .raw("{not json")
        .send(app("http://letta.invalid", &dir))
        .await;

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], error_codes::PARSE_ERROR);
}

#[tokio::test]
async fn test_message_for_unknown_session_is_not_found() {
    let dir = TempDir::new().unwrap();

    let response = AxumTestRequest::post("/messages?session_id=session_missing")
        .json(&json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}))
        .send(app("http://letta.invalid", &dir))
        .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_sse_announces_message_endpoint() {
    let dir = TempDir::new().unwrap();

    let response = AxumTestRequest::get("/sse")
        .send_sse(app("http://letta.invalid", &dir))
        .await;

    assert_eq!(response.status(), 200);
    let frame = response.text();
    assert!(frame.contains("event: endpoint"), "{frame}");
    assert!(frame.contains("/messages?session_id=session_"), "{frame}");
}

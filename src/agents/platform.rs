// ABOUTME: Agent platform seam and its Letta REST v1 implementation
// ABOUTME: Covers agent lookup/creation, model listing, MCP tool attachment, and MCP server registration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::LettaConfig;
use crate::constants::service_names;
use crate::errors::{AppError, AppResult};
use crate::models::{AgentDescriptor, AgentSpec};
use crate::utils::http_client::{body_snippet, join_url, shared_client};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Operations the bootstrap needs from the agent-hosting platform
#[async_trait]
pub trait AgentPlatform: Send + Sync {
    /// Agents whose name equals `name`, in platform order
    async fn find_agents(&self, name: &str) -> AppResult<Vec<AgentDescriptor>>;

    /// Handles of the chat models the platform offers
    async fn list_model_handles(&self) -> AppResult<Vec<String>>;

    /// Attach tool `tool_name` from MCP server `server_name`, returning its tool id
    async fn attach_mcp_tool(&self, server_name: &str, tool_name: &str) -> AppResult<String>;

    /// Create an agent
    async fn create_agent(&self, spec: &AgentSpec) -> AppResult<AgentDescriptor>;

    /// Names of the MCP servers registered on the platform
    async fn list_mcp_servers(&self) -> AppResult<Vec<String>>;

    /// Register an SSE MCP server under `server_name`
    async fn register_mcp_server(&self, server_name: &str, server_url: &str) -> AppResult<()>;
}

#[derive(Deserialize)]
struct ModelEntry {
    #[serde(default)]
    handle: Option<String>,
}

#[derive(Deserialize)]
struct ToolEntry {
    id: String,
}

#[derive(Serialize)]
struct RegisterSseServer<'a> {
    server_name: &'a str,
    server_url: &'a str,
    #[serde(rename = "type")]
    server_type: &'a str,
}

/// Letta REST client
#[derive(Clone)]
pub struct LettaClient {
    base_url: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for LettaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LettaClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl LettaClient {
    /// Create a client for the Letta server at `base_url`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            client: shared_client(),
        }
    }

    /// Create a client from configuration
    #[must_use]
    pub fn from_config(config: &LettaConfig) -> Self {
        Self::new(&config.base_url, &config.token)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, join_url(&self.base_url, path))
            .bearer_auth(&self.token)
    }

    async fn send(request: RequestBuilder, operation: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            AppError::external_unavailable(service_names::LETTA, format!("{operation}: {e}"))
                .with_source(e)
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = body_snippet(response).await;
        Err(AppError::external_service(
            service_names::LETTA,
            format!("{operation} returned HTTP {status}: {body}"),
        ))
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder, operation: &str) -> AppResult<T> {
        Self::send(request, operation)
            .await?
            .json()
            .await
            .map_err(|e| {
                AppError::external_service(
                    service_names::LETTA,
                    format!("{operation} returned an unexpected body: {e}"),
                )
            })
    }
}

#[async_trait]
impl AgentPlatform for LettaClient {
    async fn find_agents(&self, name: &str) -> AppResult<Vec<AgentDescriptor>> {
        let request = self
            .request(reqwest::Method::GET, "/v1/agents/")
            .query(&[("name", name)]);
        let agents: Vec<AgentDescriptor> = Self::json(request, "list agents").await?;
        debug!(agent_name = %name, count = agents.len(), "Listed agents by name");
        // The name filter is advisory on some Letta versions
        Ok(agents.into_iter().filter(|a| a.name == name).collect())
    }

    async fn list_model_handles(&self) -> AppResult<Vec<String>> {
        let request = self.request(reqwest::Method::GET, "/v1/models/");
        let models: Vec<ModelEntry> = Self::json(request, "list models").await?;
        Ok(models.into_iter().filter_map(|m| m.handle).collect())
    }

    async fn attach_mcp_tool(&self, server_name: &str, tool_name: &str) -> AppResult<String> {
        let path = format!("/v1/tools/mcp/servers/{server_name}/{tool_name}");
        let request = self.request(reqwest::Method::POST, &path);
        let tool: ToolEntry = Self::json(request, "add MCP tool").await?;
        Ok(tool.id)
    }

    async fn create_agent(&self, spec: &AgentSpec) -> AppResult<AgentDescriptor> {
        let request = self.request(reqwest::Method::POST, "/v1/agents/").json(spec);
        Self::json(request, "create agent").await
    }

    async fn list_mcp_servers(&self) -> AppResult<Vec<String>> {
        let request = self.request(reqwest::Method::GET, "/v1/tools/mcp/servers");
        let servers: BTreeMap<String, Value> = Self::json(request, "list MCP servers").await?;
        Ok(servers.into_keys().collect())
    }

    async fn register_mcp_server(&self, server_name: &str, server_url: &str) -> AppResult<()> {
        let body = RegisterSseServer {
            server_name,
            server_url,
            server_type: "sse",
        };
        let request = self
            .request(reqwest::Method::PUT, "/v1/tools/mcp/servers")
            .json(&body);
        Self::send(request, "register MCP server").await.map(drop)
    }
}

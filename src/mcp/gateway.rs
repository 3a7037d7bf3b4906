// ABOUTME: MCP JSON-RPC dispatcher combining the local tool registry with a prefixed sub-server
// ABOUTME: Handles initialize, ping, tools/list, tools/call and client notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Gateway
//!
//! Local tools are looked up by exact name first. Names starting with
//! `<prefix>_` are then routed to the mounted sub-server with the prefix
//! stripped. Tool failures are returned as `isError` tool results so the
//! agent sees the message, while malformed requests and unknown tools are
//! JSON-RPC errors.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::errors::ToolError;
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::mcp::proxy::McpProxy;
use crate::mcp::schema::{InitializeResponse, ToolCall, ToolResponse, ToolSchema, ToolsListResult};
use crate::tools::{ToolContext, ToolRegistry, ToolResult};

/// Dispatches MCP requests to local tools or the mounted sub-server.
pub struct McpGateway {
    registry: Arc<ToolRegistry>,
    context: ToolContext,
    proxy: Option<Arc<McpProxy>>,
}

impl McpGateway {
    /// Assemble a gateway
    #[must_use]
    pub const fn new(
        registry: Arc<ToolRegistry>,
        context: ToolContext,
        proxy: Option<Arc<McpProxy>>,
    ) -> Self {
        Self {
            registry,
            context,
            proxy,
        }
    }

    /// The local tool registry
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// The mounted sub-server, if it started
    #[must_use]
    pub fn proxy(&self) -> Option<&Arc<McpProxy>> {
        self.proxy.as_ref()
    }

    /// Handle one JSON-RPC message.
    ///
    /// Returns `None` for notifications, which get no response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            if request.jsonrpc == JSONRPC_VERSION {
                debug!(method = %request.method, "Received client notification");
            } else {
                warn!(
                    method = %request.method,
                    version = %request.jsonrpc,
                    "Dropping notification with unsupported JSON-RPC version"
                );
            }
            return None;
        }

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported JSON-RPC version '{}'", request.jsonrpc),
            ));
        }

        debug!(method = %request.method, id = ?request.id, "Handling MCP request");
        let id = request.id.clone();
        let response = match request.method.as_str() {
            "initialize" => Self::handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id).await,
            "tools/call" => self.handle_tools_call(id, request.params).await,
            other => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        };
        Some(response)
    }

    fn handle_initialize(id: Option<Value>) -> JsonRpcResponse {
        info!("MCP client initialized a session");
        match serde_json::to_value(InitializeResponse::gateway()) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
        }
    }

    /// Local schemas followed by the sub-server's, renamed under the prefix
    pub async fn list_tools(&self) -> Vec<ToolSchema> {
        let mut tools = self.registry.schemas();

        if let Some(proxy) = &self.proxy {
            match proxy.list_tools().await {
                Ok(remote) => tools.extend(remote.into_iter().map(|tool| ToolSchema {
                    name: format!("{}_{}", proxy.prefix(), tool.name),
                    ..tool
                })),
                Err(e) => warn!(
                    prefix = %proxy.prefix(),
                    error = %e,
                    "Sub-server tool listing failed; listing local tools only"
                ),
            }
        }
        tools
    }

    async fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: self.list_tools().await,
        };
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
        }
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let call: ToolCall = match params.map(serde_json::from_value).transpose() {
            Ok(Some(call)) => call,
            Ok(None) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "tools/call requires params",
                )
            }
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid tools/call params: {e}"),
                )
            }
        };
        let arguments = call.arguments.unwrap_or_else(|| json!({}));

        if self.registry.contains(&call.name) {
            return self.call_local(id, &call.name, arguments).await;
        }
        if let Some(remote_name) = self.strip_prefix(&call.name) {
            return self.call_remote(id, &call.name, remote_name, arguments).await;
        }

        JsonRpcResponse::error(
            id,
            error_codes::INVALID_PARAMS,
            ToolError::not_found(&call.name).to_string(),
        )
    }

    /// The sub-server's own name for `name`, if `name` is routed to it
    fn strip_prefix<'a>(&self, name: &'a str) -> Option<&'a str> {
        let prefix = match &self.proxy {
            Some(proxy) => proxy.prefix(),
            None => crate::constants::gateway::MEALIE_PROXY_PREFIX,
        };
        name.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|rest| !rest.is_empty())
    }

    async fn call_local(&self, id: Option<Value>, name: &str, arguments: Value) -> JsonRpcResponse {
        let response = match self.registry.execute(name, arguments, &self.context).await {
            Ok(result) => result.into_response(),
            Err(e) => {
                warn!(tool = %name, error = %e, "Tool execution failed");
                ToolResult::error(e.to_string()).into_response()
            }
        };
        Self::tool_response(id, &response)
    }

    async fn call_remote(
        &self,
        id: Option<Value>,
        name: &str,
        remote_name: &str,
        arguments: Value,
    ) -> JsonRpcResponse {
        let Some(proxy) = &self.proxy else {
            let error = ToolError::proxy_unavailable(name, crate::constants::gateway::MEALIE_PROXY_PREFIX);
            warn!(tool = %name, "{error}");
            return Self::tool_response(id, &ToolResponse::text(error.to_string(), true));
        };

        match proxy.call_tool(remote_name, arguments).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                warn!(tool = %name, prefix = %proxy.prefix(), error = %e, "Sub-server tool call failed");
                let error = ToolError::execution_failed(name, e.to_string());
                Self::tool_response(id, &ToolResponse::text(error.to_string(), true))
            }
        }
    }

    fn tool_response(id: Option<Value>, response: &ToolResponse) -> JsonRpcResponse {
        match serde_json::to_value(response) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
        }
    }
}

impl std::fmt::Debug for McpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpGateway")
            .field("registry", &self.registry)
            .field("proxy", &self.proxy)
            .finish_non_exhaustive()
    }
}

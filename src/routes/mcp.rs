// ABOUTME: MCP transport routes exposing the tool gateway over HTTP
// ABOUTME: POST /mcp answers directly; GET /sse plus POST /messages implement the SSE transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::jsonrpc::{error_codes, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::sse_transport::{SseMessage, MESSAGES_PATH};
use crate::mcp::{McpGateway, SseSessions};

/// Interval between SSE keep-alive comments
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Shared state of the MCP routes
#[derive(Clone)]
pub struct McpState {
    /// Tool gateway
    pub gateway: Arc<McpGateway>,
    /// Open SSE sessions
    pub sessions: Arc<SseSessions>,
}

/// Query string of `POST /messages`
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    /// Session announced in the `endpoint` event
    pub session_id: String,
}

/// MCP routes implementation
pub struct McpRoutes;

impl McpRoutes {
    /// Create all MCP routes
    pub fn routes(state: McpState) -> Router {
        Router::new()
            .route("/mcp", post(Self::handle_mcp))
            .route("/sse", get(Self::handle_sse))
            .route(MESSAGES_PATH, post(Self::handle_message))
            .with_state(state)
    }

    /// Single request, response in the HTTP body
    async fn handle_mcp(State(state): State<McpState>, body: String) -> Response {
        let request = match parse_request(&body) {
            Ok(request) => request,
            Err(error) => return Json(error).into_response(),
        };
        match state.gateway.handle(request).await {
            Some(response) => Json(response).into_response(),
            None => StatusCode::ACCEPTED.into_response(),
        }
    }

    /// Open an SSE session
    async fn handle_sse(State(state): State<McpState>) -> impl IntoResponse {
        let (session_id, stream) = state.sessions.open();
        debug!(session_id = %session_id, "Streaming SSE session");
        Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
    }

    /// Accept a message for an SSE session; the response goes out on the stream
    async fn handle_message(
        State(state): State<McpState>,
        Query(query): Query<MessageQuery>,
        body: String,
    ) -> Response {
        let session_id = query.session_id;
        if !state.sessions.contains(&session_id) {
            return AppError::not_found(format!("SSE session {session_id}")).into_response();
        }

        let request = match parse_request(&body) {
            Ok(request) => request,
            Err(error) => return (StatusCode::BAD_REQUEST, Json(error)).into_response(),
        };

        tokio::spawn(async move {
            let Some(response) = state.gateway.handle(request).await else {
                return;
            };
            match SseMessage::response(&response) {
                Ok(message) => {
                    if !state.sessions.send(&session_id, message) {
                        warn!(session_id = %session_id, "SSE session closed before response was sent");
                    }
                }
                Err(e) => warn!(session_id = %session_id, error = %e, "Failed to encode response"),
            }
        });

        (StatusCode::ACCEPTED, "Accepted").into_response()
    }
}

/// Decode a JSON-RPC request, producing the matching JSON-RPC error on failure
fn parse_request(body: &str) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        JsonRpcResponse::error(None, error_codes::PARSE_ERROR, format!("Parse error: {e}"))
    })?;
    let id = value.get("id").cloned();
    serde_json::from_value(value).map_err(|e| {
        JsonRpcResponse::error(id, error_codes::INVALID_REQUEST, format!("Invalid request: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_for_malformed_json() {
        let error = parse_request("{not json").unwrap_err();
        assert_eq!(error.error.unwrap().code, error_codes::PARSE_ERROR);
    }

    #[test]
    fn test_invalid_request_keeps_id() {
        let error = parse_request(r#"{"jsonrpc":"2.0","id":7}"#).unwrap_err();
        assert_eq!(error.id, Some(serde_json::json!(7)));
        assert_eq!(error.error.unwrap().code, error_codes::INVALID_REQUEST);
    }
}

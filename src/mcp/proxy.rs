// ABOUTME: Stdio JSON-RPC client for a tool-providing MCP sub-server run as a child process
// ABOUTME: Spawns the process, performs the initialize handshake, and forwards tools/list and tools/call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sub-server Proxy
//!
//! The Mealie MCP server is started as a child process speaking newline
//! delimited JSON-RPC on stdin/stdout. Requests are serialized behind one
//! lock: a request is written, then lines are read until the response with
//! the matching id arrives. Anything else the child prints on stdout
//! (notifications, log messages) is skipped.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use crate::config::environment::ProxyCommandConfig;
use crate::constants::gateway::{MCP_PROTOCOL_VERSION, SERVER_NAME};
use crate::errors::{AppError, ErrorCode};
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
use crate::mcp::schema::ToolSchema;

/// How long a single sub-server request may take
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors talking to a sub-server
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The child process could not be started
    #[error("Failed to start sub-server '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Reading from or writing to the child failed
    #[error("Sub-server I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The child closed its stdout
    #[error("Sub-server closed its output stream")]
    Closed,

    /// The child sent something that is not a usable JSON-RPC message
    #[error("Invalid message from sub-server: {0}")]
    Protocol(String),

    /// The child answered with a JSON-RPC error
    #[error("Sub-server returned error {code}: {message}")]
    Remote {
        /// JSON-RPC error code
        code: i32,
        /// Error message
        message: String,
    },

    /// No answer within the request timeout
    #[error("Sub-server did not answer '{method}' within {seconds}s")]
    Timeout {
        /// Method that timed out
        method: String,
        /// Timeout in seconds
        seconds: u64,
    },
}

impl From<ProxyError> for AppError {
    fn from(error: ProxyError) -> Self {
        let code = match &error {
            ProxyError::Remote { .. } => ErrorCode::ExternalServiceError,
            ProxyError::Spawn { .. }
            | ProxyError::Io(_)
            | ProxyError::Closed
            | ProxyError::Timeout { .. } => ErrorCode::ResourceUnavailable,
            ProxyError::Protocol(_) => ErrorCode::SerializationError,
        };
        Self::new(code, error.to_string())
    }
}

type Reader = Lines<Box<dyn AsyncBufRead + Send + Unpin>>;
type Writer = Box<dyn AsyncWrite + Send + Unpin>;

/// Both ends of the child's stdio, locked together for one exchange
struct Channel {
    writer: Writer,
    reader: Reader,
}

/// A running MCP sub-server mounted under a name prefix.
pub struct McpProxy {
    prefix: String,
    channel: Mutex<Channel>,
    next_id: AtomicU64,
    child: Mutex<Option<Child>>,
}

impl McpProxy {
    /// Spawn the configured command and complete the MCP handshake.
    ///
    /// `env` is added to the child's inherited environment.
    ///
    /// # Errors
    ///
    /// Returns `ProxyError` if the process cannot be started or the
    /// handshake fails
    pub async fn spawn(
        prefix: impl Into<String>,
        command: &ProxyCommandConfig,
        env: &[(&str, &str)],
    ) -> Result<Self, ProxyError> {
        let prefix = prefix.into();
        info!(
            prefix = %prefix,
            program = %command.program,
            args = ?command.args,
            working_dir = %command.working_dir.display(),
            "Starting MCP sub-server"
        );

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.working_dir)
            .envs(env.iter().copied())
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProxyError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ProxyError::Protocol("child stdin was not captured".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ProxyError::Protocol("child stdout was not captured".into()))?;

        let proxy = Self::from_streams(prefix, BufReader::new(stdout), stdin);
        *proxy.child.lock().await = Some(child);
        proxy.initialize().await?;
        Ok(proxy)
    }

    /// Build a proxy over already-connected streams without a handshake.
    pub fn from_streams<R, W>(prefix: impl Into<String>, reader: R, writer: W) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let reader: Box<dyn AsyncBufRead + Send + Unpin> = Box::new(reader);
        Self {
            prefix: prefix.into(),
            channel: Mutex::new(Channel {
                writer: Box::new(writer),
                reader: reader.lines(),
            }),
            next_id: AtomicU64::new(0),
            child: Mutex::new(None),
        }
    }

    /// Mount prefix, without the trailing underscore
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Send `initialize` followed by `notifications/initialized`.
    ///
    /// # Errors
    ///
    /// Returns `ProxyError` if the sub-server rejects the handshake
    pub async fn initialize(&self) -> Result<Value, ProxyError> {
        let result = self
            .request(
                "initialize",
                json!({
                    "protocolVersion": MCP_PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                }),
            )
            .await?;
        self.notify("notifications/initialized").await?;

        let server_name = result
            .pointer("/serverInfo/name")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        info!(prefix = %self.prefix, server = %server_name, "MCP sub-server initialized");
        Ok(result)
    }

    /// Tools offered by the sub-server, under their own names.
    ///
    /// # Errors
    ///
    /// Returns `ProxyError` if the request fails or the tool list is malformed
    pub async fn list_tools(&self) -> Result<Vec<ToolSchema>, ProxyError> {
        let result = self.request("tools/list", json!({})).await?;
        let tools = result.get("tools").cloned().unwrap_or_else(|| json!([]));
        serde_json::from_value(tools).map_err(|e| ProxyError::Protocol(format!("tools/list: {e}")))
    }

    /// Call a sub-server tool by its own (unprefixed) name.
    ///
    /// The result is the sub-server's `tools/call` result, passed through
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ProxyError` if the request fails
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, ProxyError> {
        self.request("tools/call", json!({ "name": name, "arguments": arguments }))
            .await
    }

    /// Stop the child process, if this proxy owns one
    pub async fn shutdown(&self) {
        if let Some(mut child) = self.child.lock().await.take() {
            if let Err(e) = child.kill().await {
                warn!(prefix = %self.prefix, error = %e, "Failed to stop MCP sub-server");
            } else {
                info!(prefix = %self.prefix, "MCP sub-server stopped");
            }
        }
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProxyError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let request = JsonRpcRequest::with_id(method, Some(params), json!(id));
        let line = serde_json::to_string(&request)
            .map_err(|e| ProxyError::Protocol(format!("request encoding: {e}")))?;

        let mut channel = self.channel.lock().await;
        write_line(&mut channel.writer, &line).await?;
        debug!(prefix = %self.prefix, method, id, "Sent request to sub-server");

        let response = timeout(REQUEST_TIMEOUT, read_response(&mut channel.reader, id))
            .await
            .map_err(|_| ProxyError::Timeout {
                method: method.to_owned(),
                seconds: REQUEST_TIMEOUT.as_secs(),
            })??;
        drop(channel);

        if let Some(error) = response.error {
            return Err(ProxyError::Remote {
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result.unwrap_or(Value::Null))
    }

    async fn notify(&self, method: &str) -> Result<(), ProxyError> {
        let notification = JsonRpcRequest::notification(method, None);
        let line = serde_json::to_string(&notification)
            .map_err(|e| ProxyError::Protocol(format!("notification encoding: {e}")))?;
        let mut channel = self.channel.lock().await;
        write_line(&mut channel.writer, &line).await
    }
}

impl std::fmt::Debug for McpProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpProxy")
            .field("prefix", &self.prefix)
            .field("requests_sent", &self.next_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

async fn write_line(writer: &mut Writer, line: &str) -> Result<(), ProxyError> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

async fn read_response(reader: &mut Reader, id: u64) -> Result<JsonRpcResponse, ProxyError> {
    let expected = json!(id);
    loop {
        let Some(line) = reader.next_line().await? else {
            return Err(ProxyError::Closed);
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let Ok(message) = serde_json::from_str::<Value>(trimmed) else {
            debug!(line = %trimmed, "Skipping non-JSON output from sub-server");
            continue;
        };
        if message.get("id") != Some(&expected) || message.get("method").is_some() {
            debug!(message = %message, "Skipping unrelated sub-server message");
            continue;
        }

        return serde_json::from_value(message)
            .map_err(|e| ProxyError::Protocol(format!("response decoding: {e}")));
    }
}

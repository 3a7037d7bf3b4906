// ABOUTME: Server-Sent Events transport for the MCP gateway (legacy HTTP+SSE flavour)
// ABOUTME: Tracks open SSE sessions and streams JSON-RPC responses back as message events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # SSE Transport
//!
//! A client opens `GET /sse` and first receives an `endpoint` event naming
//! the URL to POST its requests to (`/messages?session_id=...`). Responses to
//! those requests are delivered on the open stream as `message` events.
//! Closing the stream ends the session.

use std::convert::Infallible;
use std::sync::Arc;

use axum::response::sse::Event;
use dashmap::DashMap;
use futures_util::stream::Stream;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::jsonrpc::JsonRpcResponse;

/// Path clients POST their JSON-RPC messages to
pub const MESSAGES_PATH: &str = "/messages";

/// One outgoing SSE event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseMessage {
    /// SSE event name
    pub event_type: String,
    /// Event payload
    pub data: String,
}

impl SseMessage {
    /// The `endpoint` event announcing where to POST messages
    #[must_use]
    pub fn endpoint(session_id: &str) -> Self {
        Self {
            event_type: "endpoint".to_owned(),
            data: format!("{MESSAGES_PATH}?session_id={session_id}"),
        }
    }

    /// A JSON-RPC response delivered as a `message` event
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the response cannot be encoded
    pub fn response(response: &JsonRpcResponse) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_type: "message".to_owned(),
            data: serde_json::to_string(response)?,
        })
    }

    fn into_event(self) -> Event {
        Event::default().event(self.event_type).data(self.data)
    }
}

/// Open SSE sessions keyed by session id
#[derive(Debug, Default)]
pub struct SseSessions {
    sessions: DashMap<String, mpsc::UnboundedSender<SseMessage>>,
}

impl SseSessions {
    /// Create an empty session table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session and return its event stream.
    ///
    /// The session is removed when the stream is dropped.
    pub fn open(self: &Arc<Self>) -> (String, impl Stream<Item = Result<Event, Infallible>> + Send) {
        let session_id = format!("session_{}", Uuid::new_v4());
        let (sender, mut receiver) = mpsc::unbounded_channel();
        self.sessions.insert(session_id.clone(), sender);
        info!(session_id = %session_id, active = self.sessions.len(), "SSE session opened");

        let guard = SessionGuard {
            sessions: Arc::clone(self),
            session_id: session_id.clone(),
        };
        let first = SseMessage::endpoint(&session_id);

        let stream = async_stream::stream! {
            let _guard = guard;
            yield Ok(first.into_event());
            while let Some(message) = receiver.recv().await {
                yield Ok(message.into_event());
            }
        };
        (session_id, stream)
    }

    /// Whether `session_id` is open
    #[must_use]
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of open sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is open
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Queue `message` on a session; false if the session is gone
    pub fn send(&self, session_id: &str, message: SseMessage) -> bool {
        let Some(sender) = self.sessions.get(session_id) else {
            return false;
        };
        sender.send(message).is_ok()
    }

    /// Close a session
    pub fn close(&self, session_id: &str) {
        if self.sessions.remove(session_id).is_some() {
            info!(session_id = %session_id, active = self.sessions.len(), "SSE session closed");
        }
    }
}

struct SessionGuard {
    sessions: Arc<SseSessions>,
    session_id: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        debug!(session_id = %self.session_id, "SSE stream dropped");
        self.sessions.close(&self.session_id);
    }
}

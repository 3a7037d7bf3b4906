// ABOUTME: Publishes plain-text messages to an ntfy-compatible topic
// ABOUTME: POST {base}/{topic} with the message as body and an optional Title header
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::NotificationConfig;
use crate::constants::service_names;
use crate::errors::{AppError, AppResult};
use crate::utils::http_client::{body_snippet, join_url, shared_client};
use reqwest::Client;
use tracing::info;

/// Notification publisher for one topic
#[derive(Debug, Clone)]
pub struct NotificationClient {
    topic_url: String,
    client: Client,
}

impl NotificationClient {
    /// Create a publisher from configuration
    #[must_use]
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            topic_url: join_url(&config.base_url, &config.topic),
            client: shared_client(),
        }
    }

    /// Publish `message`, optionally titled
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or rejects the message
    pub async fn send(&self, message: &str, title: Option<&str>) -> AppResult<()> {
        let mut request = self.client.post(&self.topic_url).body(message.to_owned());
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            request = request.header("Title", title);
        }

        let response = request.send().await.map_err(|e| {
            AppError::external_unavailable(service_names::NOTIFICATIONS, e.to_string())
                .with_source(e)
        })?;
        let status = response.status();
        if !status.is_success() {
            let body = body_snippet(response).await;
            return Err(AppError::external_service(
                service_names::NOTIFICATIONS,
                format!("HTTP {status}: {body}"),
            ));
        }
        info!(topic_url = %self.topic_url, "Sent notification");
        Ok(())
    }
}

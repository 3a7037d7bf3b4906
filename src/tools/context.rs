// ABOUTME: Explicit execution context handed to every tool call
// ABOUTME: Built once at startup from the resolved Mealie credential and configured clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::agents::AgentProvisioner;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::mealie::MealieClient;
use crate::notifications::NotificationClient;

/// Shared resources for tool execution.
///
/// Holds the Mealie client bound to the credential chosen by the auth
/// bootstrap. The credential is fixed for the life of the process.
#[derive(Clone)]
pub struct ToolContext {
    /// Mealie client
    pub mealie: MealieClient,
    /// Notification publisher, when configured
    pub notifications: Option<NotificationClient>,
    /// Chef agent provisioner
    pub provisioner: Arc<AgentProvisioner>,
}

impl ToolContext {
    /// Assemble a context
    #[must_use]
    pub const fn new(
        mealie: MealieClient,
        notifications: Option<NotificationClient>,
        provisioner: Arc<AgentProvisioner>,
    ) -> Self {
        Self {
            mealie,
            notifications,
            provisioner,
        }
    }

    /// The notification publisher
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when notifications are not configured
    pub fn notifications(&self) -> AppResult<&NotificationClient> {
        self.notifications.as_ref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                "NOTIFICATION_BASE_URL and NOTIFICATION_TOPIC are not configured",
            )
        })
    }
}

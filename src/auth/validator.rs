// ABOUTME: Checks a candidate bearer credential against the recipe backend identity endpoint
// ABOUTME: HTTP 200 means valid; any other status or transport failure means invalid
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::mealie::SELF_PATH;
use crate::errors::BootstrapError;
use crate::utils::http_client::{body_snippet, join_url, shared_client};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, warn};

/// Validation seam for bearer credentials
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    /// Whether the backend accepts `token`. Never retries.
    async fn validate(&self, token: &str) -> bool;
}

/// Validator calling `GET /api/users/self` on a Mealie instance
#[derive(Debug, Clone)]
pub struct MealieCredentialValidator {
    base_url: String,
    client: Client,
}

impl MealieCredentialValidator {
    /// Create a validator for the Mealie instance at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, shared_client())
    }

    /// Create a validator using a specific HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Run the identity check, reporting why a credential was rejected
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` with the HTTP status on rejection, or without
    /// one when the backend could not be reached
    pub async fn check(&self, token: &str) -> Result<(), BootstrapError> {
        let response = self
            .client
            .get(join_url(&self.base_url, SELF_PATH))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BootstrapError::ValidationFailed {
                status: None,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }
        Err(BootstrapError::ValidationFailed {
            status: Some(status.as_u16()),
            reason: body_snippet(response).await,
        })
    }
}

#[async_trait]
impl CredentialValidator for MealieCredentialValidator {
    async fn validate(&self, token: &str) -> bool {
        match self.check(token).await {
            Ok(()) => {
                debug!("Credential accepted by Mealie");
                true
            }
            Err(e @ BootstrapError::ValidationFailed { status: Some(_), .. }) => {
                warn!(error = %e, "Credential rejected by Mealie");
                false
            }
            Err(e) => {
                error!(error = %e, "Could not validate credential against Mealie");
                false
            }
        }
    }
}

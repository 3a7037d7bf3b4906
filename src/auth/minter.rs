// ABOUTME: Mints a long-lived recipe backend API token from the bootstrap login
// ABOUTME: Password grant for a session token, then exchanges it for a named API token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::mealie::{
    API_TOKENS_PATH, API_TOKEN_INTEGRATION_ID, API_TOKEN_NAME, AUTH_TOKEN_PATH,
};
use crate::errors::{BootstrapError, MintStage};
use crate::utils::http_client::{body_snippet, join_url, shared_client};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

/// A freshly minted API credential with the backend's issuance metadata
#[derive(Clone)]
pub struct MintedCredential {
    /// Bearer token
    pub token: String,
    /// Full creation response, persisted as `token_data`
    pub token_data: Value,
}

impl std::fmt::Debug for MintedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintedCredential")
            .field("token", &"<redacted>")
            .field("token_data", &self.token_data)
            .finish()
    }
}

/// Minting seam. Every failure is reported as `None` after logging.
#[async_trait]
pub trait CredentialMinter: Send + Sync {
    /// Password login, returning a short-lived session token
    async fn login(&self, username: &str, password: &str) -> Option<String>;

    /// Exchange a session token for a long-lived API credential
    async fn mint_api_credential(&self, session_token: &str) -> Option<MintedCredential>;
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: Option<String>,
}

#[derive(Serialize)]
struct CreateApiTokenRequest<'a> {
    name: &'a str,
    integration_id: &'a str,
}

/// Minter talking to Mealie's auth and user token endpoints
#[derive(Debug, Clone)]
pub struct MealieCredentialMinter {
    base_url: String,
    client: Client,
}

impl MealieCredentialMinter {
    /// Create a minter for the Mealie instance at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, shared_client())
    }

    /// Create a minter using a specific HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Password login via `POST /api/auth/token`
    ///
    /// # Errors
    ///
    /// Returns `MintFailed` at the login stage on transport failure, a
    /// non-success status, or a response without `access_token`
    pub async fn try_login(&self, username: &str, password: &str) -> Result<String, BootstrapError> {
        let params = [("username", username), ("password", password)];
        let response = self
            .client
            .post(join_url(&self.base_url, AUTH_TOKEN_PATH))
            .form(&params)
            .send()
            .await
            .map_err(|e| BootstrapError::mint(MintStage::Login, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = body_snippet(response).await;
            return Err(BootstrapError::mint(MintStage::Login, Some(status.as_u16()), body));
        }

        let body: LoginResponse = response.json().await.map_err(|e| {
            BootstrapError::mint(MintStage::Login, Some(status.as_u16()), e.to_string())
        })?;
        body.access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                BootstrapError::mint(
                    MintStage::Login,
                    Some(status.as_u16()),
                    "response has no access_token",
                )
            })
    }

    /// Create a named API token via `POST /api/users/api-tokens`
    ///
    /// # Errors
    ///
    /// Returns `MintFailed` at the API token stage on transport failure, any
    /// status other than 201, or a response without `token`
    pub async fn try_mint(&self, session_token: &str) -> Result<MintedCredential, BootstrapError> {
        let request = CreateApiTokenRequest {
            name: API_TOKEN_NAME,
            integration_id: API_TOKEN_INTEGRATION_ID,
        };
        let response = self
            .client
            .post(join_url(&self.base_url, API_TOKENS_PATH))
            .bearer_auth(session_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| BootstrapError::mint(MintStage::ApiToken, None, e.to_string()))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = body_snippet(response).await;
            return Err(BootstrapError::mint(MintStage::ApiToken, Some(status.as_u16()), body));
        }

        let token_data: Value = response.json().await.map_err(|e| {
            BootstrapError::mint(MintStage::ApiToken, Some(status.as_u16()), e.to_string())
        })?;
        let token = token_data
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| {
                BootstrapError::mint(
                    MintStage::ApiToken,
                    Some(status.as_u16()),
                    "response has no token",
                )
            })?;

        Ok(MintedCredential { token, token_data })
    }
}

#[async_trait]
impl CredentialMinter for MealieCredentialMinter {
    async fn login(&self, username: &str, password: &str) -> Option<String> {
        match self.try_login(username, password).await {
            Ok(session) => {
                info!(username = %username, "Logged in to Mealie");
                Some(session)
            }
            Err(e) => {
                error!(username = %username, error = %e, "Mealie login failed");
                None
            }
        }
    }

    async fn mint_api_credential(&self, session_token: &str) -> Option<MintedCredential> {
        match self.try_mint(session_token).await {
            Ok(credential) => {
                info!(token_name = API_TOKEN_NAME, "Created Mealie API token");
                Some(credential)
            }
            Err(e) => {
                error!(error = %e, "Mealie API token creation failed");
                None
            }
        }
    }
}

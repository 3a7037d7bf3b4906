// ABOUTME: Idempotent startup step that ensures a usable recipe backend credential
// ABOUTME: Reuses a valid persisted token, otherwise mints and saves one, else degrades to the fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    CredentialMinter, CredentialStore, CredentialValidator, FileCredentialStore,
    MealieCredentialMinter, MealieCredentialValidator,
};
use crate::config::{BootstrapIdentity, MealieConfig};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Result of one bootstrap run
#[derive(Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The persisted credential was accepted; nothing was written
    Cached(String),
    /// A new credential was minted and persisted
    Minted(String),
    /// Minting failed; the externally configured credential is used unchecked
    Degraded(String),
}

impl BootstrapOutcome {
    /// The credential to use for the rest of the run
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Cached(token) | Self::Minted(token) | Self::Degraded(token) => token,
        }
    }

    /// Whether the fallback credential is in use
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    /// Short label for logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cached(_) => "cached",
            Self::Minted(_) => "minted",
            Self::Degraded(_) => "degraded",
        }
    }
}

impl fmt::Debug for BootstrapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BootstrapOutcome::{}(<redacted>)", self.label())
    }
}

/// Drives the credential state machine against a store, validator and minter
pub struct AuthBootstrapper {
    store: Arc<dyn CredentialStore>,
    validator: Arc<dyn CredentialValidator>,
    minter: Arc<dyn CredentialMinter>,
    identity: BootstrapIdentity,
    fallback_token: String,
}

impl AuthBootstrapper {
    /// Assemble a bootstrapper from its collaborators
    pub fn new(
        store: Arc<dyn CredentialStore>,
        validator: Arc<dyn CredentialValidator>,
        minter: Arc<dyn CredentialMinter>,
        identity: BootstrapIdentity,
        fallback_token: impl Into<String>,
    ) -> Self {
        Self {
            store,
            validator,
            minter,
            identity,
            fallback_token: fallback_token.into(),
        }
    }

    /// Wire the file store and Mealie HTTP clients from configuration
    #[must_use]
    pub fn from_config(config: &MealieConfig) -> Self {
        Self::new(
            Arc::new(FileCredentialStore::new(&config.token_file)),
            Arc::new(MealieCredentialValidator::new(&config.base_url)),
            Arc::new(MealieCredentialMinter::new(&config.base_url)),
            config.bootstrap.clone(),
            &config.fallback_api_key,
        )
    }

    /// Ensure a credential is available.
    ///
    /// Never fails: every failure path ends in [`BootstrapOutcome::Degraded`].
    /// A valid persisted credential causes no writes and no minting.
    pub async fn ensure_credential(&self) -> BootstrapOutcome {
        match self.store.load().await {
            Some(candidate) => {
                if self.validator.validate(&candidate).await {
                    info!(outcome = "cached", "Using persisted Mealie credential");
                    return BootstrapOutcome::Cached(candidate);
                }
                warn!("Persisted Mealie credential is no longer valid, minting a new one");
            }
            None => info!("No persisted Mealie credential, minting a new one"),
        }

        if let Some(token) = self.mint().await {
            info!(outcome = "minted", "Using newly minted Mealie credential");
            return BootstrapOutcome::Minted(token);
        }

        error!(
            outcome = "degraded",
            username = %self.identity.username,
            "Could not mint a Mealie credential, falling back to MEALIE_API_KEY"
        );
        BootstrapOutcome::Degraded(self.fallback_token.clone())
    }

    async fn mint(&self) -> Option<String> {
        let session = self
            .minter
            .login(&self.identity.username, &self.identity.password)
            .await?;
        let credential = self.minter.mint_api_credential(&session).await?;
        self.store
            .save(&credential.token, credential.token_data)
            .await;
        Some(credential.token)
    }
}

// ABOUTME: Tagged error variants for credential bootstrap and agent provisioning
// ABOUTME: Lets callers branch on failure kind instead of matching on log strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

/// Which step of credential minting failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintStage {
    /// Password login against the token endpoint
    Login,
    /// Exchanging the session token for a long-lived API token
    ApiToken,
}

impl fmt::Display for MintStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::ApiToken => write!(f, "api token creation"),
        }
    }
}

/// Failure modes of the startup bootstrap.
///
/// `ValidationFailed`, `MintFailed` and `ToolUnresolved` are recoverable: the
/// bootstrap logs them and degrades. `ConfigError` and `CreateFailed` are
/// returned to the caller unchanged.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BootstrapError {
    /// A candidate credential was rejected or could not be checked
    #[error("Credential validation failed{}: {reason}", status_suffix(.status))]
    ValidationFailed {
        /// HTTP status returned by the identity check, if any
        status: Option<u16>,
        /// Failure details
        reason: String,
    },

    /// Minting a new credential failed
    #[error("Credential minting failed during {stage}{}: {reason}", status_suffix(.status))]
    MintFailed {
        /// Step that failed
        stage: MintStage,
        /// HTTP status returned by the backend, if any
        status: Option<u16>,
        /// Failure details (response body or transport error)
        reason: String,
    },

    /// Deployment misconfiguration, never retried
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// What is misconfigured
        reason: String,
    },

    /// A requested tool could not be resolved on the agent platform
    #[error("Tool '{tool_name}' could not be resolved from MCP server '{server_name}': {reason}")]
    ToolUnresolved {
        /// Requested tool name
        tool_name: String,
        /// Tool source the name was looked up in
        server_name: String,
        /// Failure details
        reason: String,
    },

    /// The agent platform rejected or failed an agent operation
    #[error("Agent operation failed for '{agent_name}': {reason}")]
    CreateFailed {
        /// Agent name
        agent_name: String,
        /// Failure details
        reason: String,
    },
}

#[allow(clippy::ref_option)]
fn status_suffix(status: &Option<u16>) -> String {
    status.map_or_else(String::new, |s| format!(" (HTTP {s})"))
}

impl BootstrapError {
    /// The configured chat model is not offered by the agent platform
    #[must_use]
    pub fn model_unavailable(model: &str, available: &[String]) -> Self {
        Self::ConfigError {
            reason: format!("model {model} not found in available models: {available:?}"),
        }
    }

    /// Create a minting error
    pub fn mint(stage: MintStage, status: Option<u16>, reason: impl Into<String>) -> Self {
        Self::MintFailed {
            stage,
            status,
            reason: reason.into(),
        }
    }

    /// Create an agent operation error
    pub fn create_failed(agent_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CreateFailed {
            agent_name: agent_name.into(),
            reason: reason.into(),
        }
    }
}

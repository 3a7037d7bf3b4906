// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses required upstream URLs/credentials and optional tuning from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{agent, defaults, mealie};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Login used to mint a new recipe-backend credential
#[derive(Clone)]
pub struct BootstrapIdentity {
    /// Username (Mealie accepts the email address)
    pub username: String,
    /// Password
    pub password: String,
}

impl fmt::Debug for BootstrapIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapIdentity")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Recipe backend configuration
#[derive(Clone)]
pub struct MealieConfig {
    /// Base URL of the Mealie instance
    pub base_url: String,
    /// Externally supplied credential, used when no credential can be minted
    pub fallback_api_key: String,
    /// Location of the persisted credential file
    pub token_file: PathBuf,
    /// Identity used for minting
    pub bootstrap: BootstrapIdentity,
}

impl fmt::Debug for MealieConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MealieConfig")
            .field("base_url", &self.base_url)
            .field("fallback_api_key", &"<redacted>")
            .field("token_file", &self.token_file)
            .field("bootstrap", &self.bootstrap)
            .finish()
    }
}

/// Agent platform configuration
#[derive(Clone)]
pub struct LettaConfig {
    /// Base URL of the Letta server
    pub base_url: String,
    /// Bearer token for the Letta API
    pub token: String,
    /// Chat model handle the chef agent is created with
    pub model: String,
    /// Embedding model handle the chef agent is created with
    pub embedding: String,
}

impl fmt::Debug for LettaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LettaConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("model", &self.model)
            .field("embedding", &self.embedding)
            .finish()
    }
}

/// Command line of a tool-providing child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyCommandConfig {
    /// Executable
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Working directory
    pub working_dir: PathBuf,
}

impl ProxyCommandConfig {
    /// Parse a whitespace separated command line; `None` when empty
    #[must_use]
    pub fn parse(command: &str, working_dir: impl Into<PathBuf>) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_owned);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            working_dir: working_dir.into(),
        })
    }
}

/// Tool gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to bind
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// URL the agent platform reaches this gateway at (SSE endpoint)
    pub public_url: String,
    /// Mealie MCP sub-server to mount, if enabled
    pub mealie_mcp: Option<ProxyCommandConfig>,
}

/// ntfy-style notification backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Base URL of the notification server
    pub base_url: String,
    /// Topic messages are published to
    pub topic: String,
}

/// Server configuration loaded once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Recipe backend
    pub mealie: MealieConfig,
    /// Agent platform
    pub letta: LettaConfig,
    /// Tool gateway
    pub gateway: GatewayConfig,
    /// Notification backend, when configured
    pub notifications: Option<NotificationConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| anyhow!("{key} environment variable is required"))
        };
        let or_default = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let mealie = MealieConfig {
            base_url: required("MEALIE_BASE_URL")?,
            fallback_api_key: required("MEALIE_API_KEY")?,
            token_file: PathBuf::from(or_default("MEALIE_TOKEN_FILE", defaults::TOKEN_FILE)),
            bootstrap: BootstrapIdentity {
                username: or_default("MEALIE_USERNAME", mealie::DEFAULT_USERNAME),
                password: or_default("MEALIE_PASSWORD", mealie::DEFAULT_PASSWORD),
            },
        };

        let letta = LettaConfig {
            base_url: required("LETTA_BASE_URL")?,
            token: required("LETTA_TOKEN")?,
            model: or_default("LETTA_MODEL", agent::DEFAULT_MODEL),
            embedding: or_default("LETTA_EMBEDDING", agent::DEFAULT_EMBEDDING),
        };

        // An explicitly empty command disables the sub-server
        let mealie_mcp = match lookup("MEALIE_MCP_COMMAND") {
            Some(command) => ProxyCommandConfig::parse(
                &command,
                or_default("MEALIE_MCP_DIR", defaults::MEALIE_MCP_DIR),
            ),
            None => ProxyCommandConfig::parse(
                defaults::MEALIE_MCP_COMMAND,
                or_default("MEALIE_MCP_DIR", defaults::MEALIE_MCP_DIR),
            ),
        };

        let gateway = GatewayConfig {
            host: or_default("HOST", defaults::HOST),
            http_port: or_default("HTTP_PORT", &defaults::HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            public_url: required("RECIPELLM_MCP_SERVER_URL")?,
            mealie_mcp,
        };

        let notifications = match (lookup("NOTIFICATION_BASE_URL"), lookup("NOTIFICATION_TOPIC")) {
            (Some(base_url), Some(topic)) if !base_url.is_empty() && !topic.is_empty() => {
                Some(NotificationConfig { base_url, topic })
            }
            _ => None,
        };

        let config = Self {
            mealie,
            letta,
            gateway,
            notifications,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if an upstream URL is not an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("MEALIE_BASE_URL", &self.mealie.base_url),
            ("LETTA_BASE_URL", &self.letta.base_url),
            ("RECIPELLM_MCP_SERVER_URL", &self.gateway.public_url),
        ] {
            let url = url::Url::parse(value).with_context(|| format!("Invalid {name} value"))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(anyhow!("{name} must be an http(s) URL, got {value}"));
            }
        }
        if let Some(notifications) = &self.notifications {
            url::Url::parse(&notifications.base_url)
                .context("Invalid NOTIFICATION_BASE_URL value")?;
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "RecipeLLM MCP Server Configuration:\n\
             - HTTP: {}:{}\n\
             - Mealie: {}\n\
             - Credential file: {}\n\
             - Letta: {} (model {}, embedding {})\n\
             - Gateway URL: {}\n\
             - Mealie MCP sub-server: {}\n\
             - Notifications: {}",
            self.gateway.host,
            self.gateway.http_port,
            self.mealie.base_url,
            self.mealie.token_file.display(),
            self.letta.base_url,
            self.letta.model,
            self.letta.embedding,
            self.gateway.public_url,
            self.gateway
                .mealie_mcp
                .as_ref()
                .map_or_else(|| "Disabled".to_owned(), |proxy| proxy.program.clone()),
            self.notifications
                .as_ref()
                .map_or("Disabled", |_| "Enabled"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("MEALIE_BASE_URL", "http://mealie:9000"),
            ("MEALIE_API_KEY", "fallback-key"),
            ("LETTA_BASE_URL", "http://letta:8283"),
            ("LETTA_TOKEN", "letta-token"),
            ("RECIPELLM_MCP_SERVER_URL", "http://recipellm:8000/sse"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<ServerConfig> {
        ServerConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_owned()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&base_vars()).unwrap();
        assert_eq!(config.gateway.http_port, 8000);
        assert_eq!(config.letta.model, "letta/letta-free");
        assert_eq!(config.mealie.bootstrap.username, "changeme@example.com");
        assert_eq!(
            config.gateway.mealie_mcp,
            ProxyCommandConfig::parse("uv run src/server.py", "./mealie-mcp-server")
        );
        assert!(config.notifications.is_none());
    }

    #[test]
    fn test_each_required_variable_is_fatal() {
        for key in [
            "MEALIE_BASE_URL",
            "MEALIE_API_KEY",
            "LETTA_BASE_URL",
            "LETTA_TOKEN",
            "RECIPELLM_MCP_SERVER_URL",
        ] {
            let mut vars = base_vars();
            vars.remove(key);
            let error = load(&vars).unwrap_err();
            assert!(error.to_string().contains(key), "missing {key}: {error}");
        }
    }

    #[test]
    fn test_empty_proxy_command_disables_sub_server() {
        let mut vars = base_vars();
        vars.insert("MEALIE_MCP_COMMAND", "");
        assert!(load(&vars).unwrap().gateway.mealie_mcp.is_none());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut vars = base_vars();
        vars.insert("HTTP_PORT", "eighty");
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_summary_hides_secrets() {
        let config = load(&base_vars()).unwrap();
        let summary = config.summary();
        assert!(!summary.contains("fallback-key"));
        assert!(!summary.contains("letta-token"));
        assert!(!format!("{config:?}").contains("letta-token"));
    }
}

// ABOUTME: Builds the tool gateway from the resolved Mealie credential
// ABOUTME: Registers local tools against an explicit context and mounts the Mealie MCP sub-server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tracing::{error, info};

use crate::agents::AgentProvisioner;
use crate::config::environment::{ProxyCommandConfig, ServerConfig};
use crate::constants::gateway::MEALIE_PROXY_PREFIX;
use crate::mcp::gateway::McpGateway;
use crate::mcp::proxy::McpProxy;
use crate::mealie::MealieClient;
use crate::notifications::NotificationClient;
use crate::tools::{ToolContext, ToolRegistry};

/// Step-by-step assembly of an [`McpGateway`].
///
/// The credential is bound into the context once; the gateway never
/// re-reads it.
pub struct ToolGatewayMount {
    context: ToolContext,
    registry: ToolRegistry,
    proxy: Option<Arc<McpProxy>>,
}

impl ToolGatewayMount {
    /// Start from an explicit context with no tools registered
    #[must_use]
    pub fn new(context: ToolContext) -> Self {
        Self {
            context,
            registry: ToolRegistry::new(),
            proxy: None,
        }
    }

    /// Build the context from configuration and the bootstrap's credential
    #[must_use]
    pub fn from_credential(
        config: &ServerConfig,
        credential: &str,
        provisioner: Arc<AgentProvisioner>,
    ) -> Self {
        let mealie = MealieClient::new(&config.mealie.base_url, credential);
        let notifications = config.notifications.as_ref().map(NotificationClient::new);
        Self::new(ToolContext::new(mealie, notifications, provisioner))
    }

    /// Register the built-in tools; the notification tool only when configured
    #[must_use]
    pub fn register_tools(mut self) -> Self {
        let notifications_enabled = self.context.notifications.is_some();
        self.registry.register_builtin_tools(notifications_enabled);
        self
    }

    /// Mount an already running sub-server
    #[must_use]
    pub fn with_proxy(mut self, proxy: McpProxy) -> Self {
        self.proxy = Some(Arc::new(proxy));
        self
    }

    /// Spawn the Mealie MCP sub-server and mount it under `mealie_`.
    ///
    /// A sub-server that fails to start is logged and left out; the local
    /// tools keep working.
    pub async fn spawn_mealie_proxy(
        self,
        command: Option<&ProxyCommandConfig>,
        credential: &str,
    ) -> Self {
        let Some(command) = command else {
            info!("Mealie MCP sub-server disabled");
            return self;
        };

        let base_url = self.context.mealie.base_url().to_owned();
        let env = [
            ("MEALIE_BASE_URL", base_url.as_str()),
            ("MEALIE_API_KEY", credential),
        ];
        match McpProxy::spawn(MEALIE_PROXY_PREFIX, command, &env).await {
            Ok(proxy) => self.with_proxy(proxy),
            Err(e) => {
                error!(
                    program = %command.program,
                    error = %e,
                    "Mealie MCP sub-server failed to start; continuing without it"
                );
                self
            }
        }
    }

    /// Finish assembly
    #[must_use]
    pub fn finish(self) -> McpGateway {
        info!(
            local_tools = self.registry.len(),
            proxy_mounted = self.proxy.is_some(),
            "Tool gateway mounted"
        );
        McpGateway::new(Arc::new(self.registry), self.context, self.proxy)
    }

    /// Full startup mount: context, built-in tools, then the Mealie sub-server
    pub async fn mount(
        config: &ServerConfig,
        credential: &str,
        provisioner: Arc<AgentProvisioner>,
    ) -> McpGateway {
        Self::from_credential(config, credential, provisioner)
            .register_tools()
            .spawn_mealie_proxy(config.gateway.mealie_mcp.as_ref(), credential)
            .await
            .finish()
    }
}

// ABOUTME: Startup orchestration for credential bootstrap, tool-source registration and agent provisioning
// ABOUTME: Runs the phases in a fixed order, serves HTTP with graceful shutdown, and stops the sub-server on exit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Lifecycle
//!
//! Startup has three phases:
//!
//! 1. **Prepare**: the Mealie credential bootstrap and the registration of
//!    this gateway as an MCP server on the agent platform run concurrently.
//!    They touch disjoint systems. A degraded credential is logged and
//!    accepted; a failed registration aborts startup.
//! 2. **Serve**: the gateway is mounted with the resolved credential and the
//!    HTTP listener starts accepting connections.
//! 3. **Provision**: the chef agent is looked up or created. The platform
//!    resolves the agent's tools through the running gateway, so this phase
//!    waits for phase 2. Any provisioning error stops the server and is
//!    returned to the caller.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::agents::{
    ensure_tool_source, AgentBlueprint, AgentPlatform, AgentProvisioner, LettaClient,
    ProvisionOutcome, ToolSourceStatus,
};
use crate::auth::{AuthBootstrapper, BootstrapOutcome};
use crate::config::environment::ServerConfig;
use crate::constants::agent::MCP_SERVER_NAME;
use crate::mcp::{McpGateway, ToolGatewayMount};
use crate::routes;

/// Owns the startup collaborators and drives the phases in order.
pub struct ServerLifecycle {
    config: ServerConfig,
    auth: AuthBootstrapper,
    platform: Arc<dyn AgentPlatform>,
    provisioner: Arc<AgentProvisioner>,
}

impl ServerLifecycle {
    /// Assemble from explicit collaborators
    pub fn new(
        config: ServerConfig,
        auth: AuthBootstrapper,
        platform: Arc<dyn AgentPlatform>,
        provisioner: Arc<AgentProvisioner>,
    ) -> Self {
        Self {
            config,
            auth,
            platform,
            provisioner,
        }
    }

    /// Wire the Mealie and Letta clients from configuration
    #[must_use]
    pub fn from_config(config: ServerConfig) -> Self {
        let platform: Arc<dyn AgentPlatform> = Arc::new(LettaClient::from_config(&config.letta));
        let provisioner = Arc::new(AgentProvisioner::new(
            Arc::clone(&platform),
            AgentBlueprint::chef(&config.letta),
        ));
        let auth = AuthBootstrapper::from_config(&config.mealie);
        Self::new(config, auth, platform, provisioner)
    }

    /// The shared agent provisioner
    #[must_use]
    pub fn provisioner(&self) -> &Arc<AgentProvisioner> {
        &self.provisioner
    }

    /// Phase 1: resolve the credential and register the tool source.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway cannot be registered on the agent platform
    pub async fn prepare(&self) -> Result<(BootstrapOutcome, ToolSourceStatus)> {
        let (credential, tool_source) = tokio::join!(
            self.auth.ensure_credential(),
            ensure_tool_source(
                self.platform.as_ref(),
                MCP_SERVER_NAME,
                &self.config.gateway.public_url,
            )
        );

        if credential.is_degraded() {
            warn!("Running with the fallback MEALIE_API_KEY; Mealie calls may be rejected");
        }
        let tool_source = tool_source.with_context(|| {
            format!(
                "Failed to register {MCP_SERVER_NAME} at {} on the agent platform",
                self.config.gateway.public_url
            )
        })?;

        info!(
            credential = credential.label(),
            tool_source = ?tool_source,
            "Startup preparation finished"
        );
        Ok((credential, tool_source))
    }

    /// Phase 3: ensure the chef agent exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured model is unavailable or the agent
    /// platform fails to look up or create the agent
    pub async fn provision(&self) -> Result<ProvisionOutcome> {
        let outcome = self
            .provisioner
            .ensure_agent()
            .await
            .context("Chef agent provisioning failed")?;
        info!(
            agent_id = %outcome.agent_id(),
            created = matches!(outcome, ProvisionOutcome::Created(_)),
            "Chef agent ready"
        );
        Ok(outcome)
    }

    /// Phase 2: mount the gateway against the resolved credential
    pub async fn mount(&self, credential: &BootstrapOutcome) -> McpGateway {
        ToolGatewayMount::mount(&self.config, credential.token(), Arc::clone(&self.provisioner))
            .await
    }

    /// Run all phases and serve until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if preparation or provisioning fails, or the HTTP
    /// server stops with an I/O error
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (credential, _) = self.prepare().await?;
        let gateway = Arc::new(self.mount(&credential).await);
        let app = routes::router(Arc::clone(&gateway), Arc::clone(&self.provisioner));

        let address = listener.local_addr().context("Listener has no local address")?;
        info!(address = %address, "HTTP server listening");

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    tokio::select! {
                        () = shutdown => info!("Shutdown signal received"),
                        _ = stop_rx => info!("Stopping after startup failure"),
                    }
                })
                .await
        });

        if let Err(e) = self.provision().await {
            error!(error = %e, "Startup failed; stopping HTTP server");
            let _ = stop_tx.send(());
            match server.await {
                Ok(Ok(())) => {}
                Ok(Err(serve_error)) => {
                    error!(error = %serve_error, "HTTP server failed while stopping");
                }
                Err(join_error) => {
                    error!(error = %join_error, "HTTP server task failed while stopping");
                }
            }
            stop_proxy(&gateway).await;
            return Err(e);
        }

        let served = server.await.context("HTTP server task failed")?;
        drop(stop_tx);
        stop_proxy(&gateway).await;
        served.context("HTTP server error")?;
        info!("Server stopped");
        Ok(())
    }
}

async fn stop_proxy(gateway: &McpGateway) {
    if let Some(proxy) = gateway.proxy() {
        proxy.shutdown().await;
    }
}

/// Resolves on Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT"),
        () = terminate => info!("Received SIGTERM"),
    }
}

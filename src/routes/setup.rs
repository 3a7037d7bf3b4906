// ABOUTME: Manual trigger to (re)provision the chef agent
// ABOUTME: POST /setup starts provisioning in the background and always answers "OK"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! The provisioning outcome is only visible in the logs. Overlapping
//! triggers are not serialized and may race to create the agent.

use std::sync::Arc;

use axum::{extract::State, routing::post, Router};
use tracing::{error, info};

use crate::agents::AgentProvisioner;

/// Setup routes implementation
pub struct SetupRoutes;

impl SetupRoutes {
    /// Create the setup route
    pub fn routes(provisioner: Arc<AgentProvisioner>) -> Router {
        Router::new()
            .route("/setup", post(Self::handle_setup))
            .with_state(provisioner)
    }

    async fn handle_setup(State(provisioner): State<Arc<AgentProvisioner>>) -> &'static str {
        info!("Setup requested; provisioning chef agent in the background");
        tokio::spawn(async move {
            match provisioner.ensure_agent().await {
                Ok(outcome) => info!(
                    agent_id = %outcome.agent_id(),
                    agent_name = %outcome.descriptor().name,
                    "Setup finished"
                ),
                Err(e) => error!(error = %e, "Setup failed"),
            }
        });
        "OK"
    }
}

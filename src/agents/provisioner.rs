// ABOUTME: Idempotent lookup-or-create of the chef agent on the agent platform
// ABOUTME: Checks the model, resolves requested tools, sizes memory blocks, then creates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::AgentPlatform;
use crate::config::LettaConfig;
use crate::constants::{agent, CHEF_PERSONA};
use crate::errors::BootstrapError;
use crate::models::{AgentDescriptor, AgentSpec, MemoryBlock, ToolBinding};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// An agent with the name already existed; it was left untouched
    Existing(AgentDescriptor),
    /// The agent was created by this run
    Created(AgentDescriptor),
}

impl ProvisionOutcome {
    /// Platform id of the agent
    #[must_use]
    pub fn agent_id(&self) -> &str {
        &self.descriptor().id
    }

    /// The agent descriptor
    #[must_use]
    pub const fn descriptor(&self) -> &AgentDescriptor {
        match self {
            Self::Existing(descriptor) | Self::Created(descriptor) => descriptor,
        }
    }
}

/// What agent to provision
#[derive(Debug, Clone)]
pub struct AgentBlueprint {
    /// Agent name; the lookup key
    pub name: String,
    /// Chat model handle
    pub model: String,
    /// Embedding model handle
    pub embedding: String,
    /// Tools to attach at creation
    pub tools: Vec<ToolBinding>,
    /// Persona block content
    pub persona: String,
    /// Human block content
    pub human: String,
}

impl AgentBlueprint {
    /// The chef agent with its requested tools from the gateway's MCP server
    #[must_use]
    pub fn chef(config: &LettaConfig) -> Self {
        Self {
            name: agent::CHEF_AGENT_NAME.to_owned(),
            model: config.model.clone(),
            embedding: config.embedding.clone(),
            tools: agent::REQUESTED_TOOLS
                .iter()
                .map(|tool| ToolBinding::new(*tool, agent::MCP_SERVER_NAME))
                .collect(),
            persona: CHEF_PERSONA.to_owned(),
            human: String::new(),
        }
    }
}

/// Looks up the named agent and creates it only when absent.
///
/// An existing agent is never reconfigured, even when its model, tools or
/// persona differ from the blueprint. Two concurrent runs may both miss the
/// lookup and create duplicates; callers are expected not to overlap.
pub struct AgentProvisioner {
    platform: Arc<dyn AgentPlatform>,
    blueprint: AgentBlueprint,
}

impl AgentProvisioner {
    /// Create a provisioner
    pub fn new(platform: Arc<dyn AgentPlatform>, blueprint: AgentBlueprint) -> Self {
        Self {
            platform,
            blueprint,
        }
    }

    /// The blueprint this provisioner creates from
    #[must_use]
    pub const fn blueprint(&self) -> &AgentBlueprint {
        &self.blueprint
    }

    /// Ensure the agent exists, returning its descriptor
    ///
    /// # Errors
    ///
    /// - `ConfigError` when the configured model is not offered (nothing is created)
    /// - `CreateFailed` when lookup, model listing, or creation fails upstream
    pub async fn ensure_agent(&self) -> Result<ProvisionOutcome, BootstrapError> {
        let name = &self.blueprint.name;

        if let Some(existing) = self.lookup().await? {
            info!(agent_name = %name, agent_id = %existing.id, "Agent already exists");
            return Ok(ProvisionOutcome::Existing(existing));
        }

        info!(agent_name = %name, model = %self.blueprint.model, "Creating agent");
        self.check_model().await?;
        let spec = self.build_spec().await;
        let created = self
            .platform
            .create_agent(&spec)
            .await
            .map_err(|e| BootstrapError::create_failed(name, e.to_string()))?;

        info!(
            agent_name = %name,
            agent_id = %created.id,
            tool_count = spec.tool_ids.len(),
            "Agent created"
        );
        Ok(ProvisionOutcome::Created(created))
    }

    async fn lookup(&self) -> Result<Option<AgentDescriptor>, BootstrapError> {
        let name = &self.blueprint.name;
        let matches = self
            .platform
            .find_agents(name)
            .await
            .map_err(|e| BootstrapError::create_failed(name, format!("lookup failed: {e}")))?;
        if matches.len() > 1 {
            warn!(agent_name = %name, count = matches.len(), "Multiple agents share this name, using the first");
        }
        Ok(matches.into_iter().next())
    }

    async fn check_model(&self) -> Result<(), BootstrapError> {
        let handles = self.platform.list_model_handles().await.map_err(|e| {
            BootstrapError::create_failed(&self.blueprint.name, format!("model listing failed: {e}"))
        })?;
        if handles.iter().any(|handle| handle == &self.blueprint.model) {
            Ok(())
        } else {
            Err(BootstrapError::model_unavailable(
                &self.blueprint.model,
                &handles,
            ))
        }
    }

    /// Resolve one binding to its tool id
    ///
    /// # Errors
    ///
    /// Returns `ToolUnresolved` when the platform cannot attach the tool
    pub async fn resolve_tool(&self, binding: &ToolBinding) -> Result<String, BootstrapError> {
        self.platform
            .attach_mcp_tool(&binding.source_server, &binding.tool_name)
            .await
            .map_err(|e| BootstrapError::ToolUnresolved {
                tool_name: binding.tool_name.clone(),
                server_name: binding.source_server.clone(),
                reason: e.to_string(),
            })
    }

    async fn build_spec(&self) -> AgentSpec {
        let blueprint = &self.blueprint;
        let mut spec = AgentSpec {
            name: blueprint.name.clone(),
            memory_blocks: vec![
                MemoryBlock::sized(agent::HUMAN_BLOCK_LABEL, blueprint.human.as_str()),
                MemoryBlock::sized(agent::PERSONA_BLOCK_LABEL, blueprint.persona.as_str()),
            ],
            model: blueprint.model.clone(),
            embedding: blueprint.embedding.clone(),
            tool_ids: Vec::with_capacity(blueprint.tools.len()),
            timezone: agent::AGENT_TIMEZONE.to_owned(),
            enable_sleeptime: false,
            tool_exec_environment_variables: BTreeMap::new(),
        };

        for binding in &blueprint.tools {
            match self.resolve_tool(binding).await {
                Ok(tool_id) => spec.push_tool_id(tool_id),
                Err(e) => warn!(error = %e, "Skipping unresolved tool"),
            }
        }
        spec
    }
}

// ABOUTME: Core data models shared by the bootstrap, provisioner, and gateway
// ABOUTME: Credential record and agent descriptor types with their invariants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Core data models

/// Agent descriptor, memory blocks and tool bindings
pub mod agent;

/// Persisted recipe-backend credential
pub mod credential;

pub use agent::{AgentDescriptor, AgentSpec, MemoryBlock, ToolBinding};
pub use credential::CredentialRecord;

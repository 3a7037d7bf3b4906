// ABOUTME: Core types and constants for the RecipeLLM MCP server
// ABOUTME: Foundation crate with error handling, bootstrap constants, and credential/agent models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # RecipeLLM Core
//!
//! Foundation crate providing shared types and constants for the RecipeLLM
//! MCP server. It holds no I/O: everything here is data shared between the
//! credential bootstrap, the agent provisioner and the tool gateway.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the
//!   tagged `BootstrapError` / `ToolError` variants
//! - **constants**: Agent, credential and gateway constants organized by domain
//! - **models**: Credential record and agent descriptor types

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Credential and agent data models
pub mod models;

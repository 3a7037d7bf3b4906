// ABOUTME: Module containing all local MCP tool implementations organized by category.
// ABOUTME: Each submodule exposes a create_*_tools constructor used by the registry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Implementations
//!
//! - `recipes` - Mealie recipe search, fetch, import and notes
//! - `mealplans` - Mealie household meal plans
//! - `notifications` - push notifications
//! - `agent` - chef agent provisioning

/// Chef agent provisioning
pub mod agent;
/// Meal plan tools
pub mod mealplans;
/// Notification tools
pub mod notifications;
/// Recipe tools
pub mod recipes;

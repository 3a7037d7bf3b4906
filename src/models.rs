// ABOUTME: Re-exports credential and agent data models from the core crate
// ABOUTME: Adds the recipe backend payload types used by the tool wrappers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models

pub use recipellm_core::models::agent::block_limit;
pub use recipellm_core::models::*;

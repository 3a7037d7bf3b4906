// ABOUTME: Re-exports the unified error types from the core crate
// ABOUTME: Keeps `crate::errors::*` paths stable for modules and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! See `recipellm_core::errors` for the definitions.

pub use recipellm_core::errors::bootstrap::MintStage;
pub use recipellm_core::errors::*;

// ABOUTME: Re-exports application constants from the core crate
// ABOUTME: Agent, credential, gateway, and default configuration values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application constants, defined in `recipellm_core::constants`

pub use recipellm_core::constants::*;

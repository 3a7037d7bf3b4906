// ABOUTME: Mealie recipe backend integration for the gateway's tools
// ABOUTME: REST client plus the payload models it reads and writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Authenticated REST client
pub mod client;
/// Request and response payloads
pub mod models;

pub use client::MealieClient;

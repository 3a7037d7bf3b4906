// ABOUTME: Push notifications to the household through an ntfy-style HTTP endpoint
// ABOUTME: Enabled only when a notification base URL and topic are configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// ntfy-compatible publisher
pub mod client;

pub use client::NotificationClient;

// ABOUTME: Liveness route used by container health checks
// ABOUTME: GET /health answers a plain "OK" without touching any backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{routing::get, Router};

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes() -> Router {
        async fn health_handler() -> &'static str {
            "OK"
        }

        Router::new().route("/health", get(health_handler))
    }
}

// ABOUTME: Shared HTTP client utilities with connection pooling
// ABOUTME: One reqwest client per process, reused by every upstream REST client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder, Response};
use std::sync::OnceLock;

/// Global shared HTTP client
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// User agent sent on every upstream request
const USER_AGENT: &str = concat!("recipellm-mcp-server/", env!("CARGO_PKG_VERSION"));

/// Get or create the shared HTTP client.
///
/// No request timeout is configured: upstream calls rely on the transport
/// defaults, so a hung upstream hangs the caller.
pub fn shared_client() -> Client {
    SHARED_CLIENT
        .get_or_init(|| {
            ClientBuilder::new()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new())
        })
        .clone()
}

/// Join a base URL and an absolute API path without doubling slashes
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Read a response body for diagnostics, never failing
pub async fn body_snippet(response: Response) -> String {
    const MAX_LEN: usize = 512;
    let body = response.text().await.unwrap_or_default();
    if body.chars().count() > MAX_LEN {
        let truncated: String = body.chars().take(MAX_LEN).collect();
        format!("{truncated}...")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_normalizes_slashes() {
        assert_eq!(
            join_url("http://mealie:9000/", "/api/users/self"),
            "http://mealie:9000/api/users/self"
        );
        assert_eq!(
            join_url("http://letta:8283", "v1/agents/"),
            "http://letta:8283/v1/agents/"
        );
    }
}

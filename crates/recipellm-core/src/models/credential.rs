// ABOUTME: Persisted bearer credential for the recipe backend
// ABOUTME: Serialized as {"token": ..., "token_data": {...}} in the credential file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Credential record written to the local credential file.
///
/// Replaced wholesale on rotation, never mutated in place. When the file
/// exists its `token` is non-empty and was accepted by the backend at the
/// time it was written.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Bearer token
    pub token: String,
    /// Issuance metadata as returned by the backend (opaque)
    #[serde(default)]
    pub token_data: Value,
}

impl CredentialRecord {
    /// Create a record from a token and its issuance metadata
    pub fn new(token: impl Into<String>, token_data: Value) -> Self {
        Self {
            token: token.into(),
            token_data,
        }
    }

    /// Whether this record carries a usable token
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

// Tokens must never end up in logs
impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("token", &"<redacted>")
            .field("token_data", &self.token_data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_data_defaults_to_null() {
        let record: CredentialRecord = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(record.token, "abc");
        assert!(record.token_data.is_null());
        assert!(record.has_token());
    }

    #[test]
    fn test_debug_redacts_token() {
        let record = CredentialRecord::new("secret-token", Value::Null);
        assert!(!format!("{record:?}").contains("secret-token"));
    }
}

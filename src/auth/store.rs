// ABOUTME: Local persistence of the recipe backend credential as a single JSON file
// ABOUTME: Loads never fail outward and saves replace the file atomically via temp file + rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::CredentialRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info, warn};

/// Persistence seam for the credential record
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the persisted token.
    ///
    /// `None` when the file is missing, unparseable, or has no usable token.
    async fn load(&self) -> Option<String>;

    /// Replace the persisted record. Failures are logged, not returned.
    async fn save(&self, token: &str, token_data: Value);
}

/// Credential store backed by one JSON file on local disk.
///
/// Assumes a single writer process; no lock file is taken.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the credential file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_atomically(&self, record: &CredentialRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(record)?;
        let temp = self.temp_path();
        fs::write(&temp, body).await?;
        fs::rename(&temp, &self.path).await
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Option<String> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No persisted credential");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read credential file");
                return None;
            }
        };

        match serde_json::from_slice::<CredentialRecord>(&raw) {
            Ok(record) if record.has_token() => Some(record.token),
            Ok(_) => {
                warn!(path = %self.path.display(), "Credential file has no token");
                None
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Credential file is not valid JSON");
                None
            }
        }
    }

    async fn save(&self, token: &str, token_data: Value) {
        let record = CredentialRecord::new(token, token_data);
        match self.write_atomically(&record).await {
            Ok(()) => info!(path = %self.path.display(), "Saved credential"),
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to save credential");
                // Leave no partial temp file behind
                let _ = fs::remove_file(self.temp_path()).await;
            }
        }
    }
}

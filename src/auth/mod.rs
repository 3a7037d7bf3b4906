// ABOUTME: Recipe backend credential bootstrap: persistence, validation, and minting
// ABOUTME: Exposes the collaborator traits and the bootstrapper that drives them at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Credential Bootstrap
//!
//! On every start the server needs a bearer credential for Mealie. The
//! [`AuthBootstrapper`] loads the persisted one from [`CredentialStore`],
//! checks it with [`CredentialValidator`], and only when that fails asks the
//! [`CredentialMinter`] for a new one. If minting fails too, the externally
//! configured `MEALIE_API_KEY` is used and the run continues degraded.

/// Startup state machine
pub mod bootstrap;
/// Token creation through the Mealie auth endpoints
pub mod minter;
/// Local credential file
pub mod store;
/// Identity check against Mealie
pub mod validator;

pub use bootstrap::{AuthBootstrapper, BootstrapOutcome};
pub use minter::{CredentialMinter, MealieCredentialMinter, MintedCredential};
pub use store::{CredentialStore, FileCredentialStore};
pub use validator::{CredentialValidator, MealieCredentialValidator};

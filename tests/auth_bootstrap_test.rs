// ABOUTME: Integration tests for the Mealie credential bootstrap against a fake Mealie server
// ABOUTME: Covers reuse of a valid persisted token, minting, and the degraded fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::atomic::Ordering;

use helpers::fake_backends::{FakeMealie, MintFault, MINTED_TOKEN};
use recipellm_mcp_server::auth::{AuthBootstrapper, BootstrapOutcome};
use serde_json::Value;
use tempfile::TempDir;

fn bootstrapper(mealie: &FakeMealie, dir: &TempDir, extra: &[(&str, &str)]) -> AuthBootstrapper {
    let config = common::test_config_with(
        &mealie.base_url,
        "http://letta.invalid",
        &dir.path().join("data/mealie_token.json"),
        extra,
    );
    AuthBootstrapper::from_config(&config.mealie)
}

fn token_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("data/mealie_token.json")
}

fn write_token_file(dir: &TempDir, contents: &str) {
    let path = token_path(dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_valid_cached_credential_is_used_without_mutation() {
    common::init_test_logging();
    let mealie = FakeMealie::start(&["abc"]).await;
    let dir = TempDir::new().unwrap();
    let original = r#"{"token":"abc","token_data":{"name":"recipellm","id":3}}"#;
    write_token_file(&dir, original);

    let outcome = bootstrapper(&mealie, &dir, &[]).ensure_credential().await;

    assert_eq!(outcome, BootstrapOutcome::Cached("abc".into()));
    assert_eq!(mealie.state.self_checks.load(Ordering::SeqCst), 1);
    assert_eq!(mealie.state.auth_calls(), 0);
    assert_eq!(std::fs::read_to_string(token_path(&dir)).unwrap(), original);
}

#[tokio::test]
async fn test_token_only_file_is_left_byte_identical() {
    common::init_test_logging();
    let mealie = FakeMealie::start(&["abc"]).await;
    let dir = TempDir::new().unwrap();
    write_token_file(&dir, r#"{"token":"abc"}"#);

    let outcome = bootstrapper(&mealie, &dir, &[]).ensure_credential().await;

    assert_eq!(outcome.token(), "abc");
    assert_eq!(mealie.state.auth_calls(), 0);
    assert_eq!(
        std::fs::read_to_string(token_path(&dir)).unwrap(),
        r#"{"token":"abc"}"#
    );
}

#[tokio::test]
async fn test_missing_credential_is_minted_once_and_persisted() {
    common::init_test_logging();
    let mealie = FakeMealie::start(&[]).await;
    let dir = TempDir::new().unwrap();

    let outcome = bootstrapper(&mealie, &dir, &[]).ensure_credential().await;

    assert_eq!(outcome, BootstrapOutcome::Minted(MINTED_TOKEN.into()));
    assert_eq!(mealie.state.logins.load(Ordering::SeqCst), 1);
    assert_eq!(mealie.state.mints.load(Ordering::SeqCst), 1);

    let record: Value =
        serde_json::from_str(&std::fs::read_to_string(token_path(&dir)).unwrap()).unwrap();
    assert_eq!(record["token"], MINTED_TOKEN);
    assert_eq!(record["token_data"]["token"], MINTED_TOKEN);
    assert!(!dir.path().join("data/mealie_token.json.tmp").exists());
}

#[tokio::test]
async fn test_rejected_credential_is_replaced() {
    common::init_test_logging();
    let mealie = FakeMealie::start(&[]).await;
    let dir = TempDir::new().unwrap();
    write_token_file(&dir, r#"{"token":"expired","token_data":{}}"#);

    let outcome = bootstrapper(&mealie, &dir, &[]).ensure_credential().await;

    assert_eq!(outcome, BootstrapOutcome::Minted(MINTED_TOKEN.into()));
    assert_eq!(mealie.state.logins.load(Ordering::SeqCst), 1);
    assert_eq!(mealie.state.mints.load(Ordering::SeqCst), 1);
    let record: Value =
        serde_json::from_str(&std::fs::read_to_string(token_path(&dir)).unwrap()).unwrap();
    assert_eq!(record["token"], MINTED_TOKEN);
}

#[tokio::test]
async fn test_second_run_reuses_minted_credential() {
    common::init_test_logging();
    let mealie = FakeMealie::start(&[]).await;
    let dir = TempDir::new().unwrap();

    let first = bootstrapper(&mealie, &dir, &[]).ensure_credential().await;
    let second = bootstrapper(&mealie, &dir, &[]).ensure_credential().await;

    assert!(matches!(first, BootstrapOutcome::Minted(_)));
    assert_eq!(second, BootstrapOutcome::Cached(MINTED_TOKEN.into()));
    assert_eq!(mealie.state.mints.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_login_degrades_without_writing() {
    common::init_test_logging();
    let mealie = FakeMealie::start(&[]).await;
    let dir = TempDir::new().unwrap();

    let outcome = bootstrapper(&mealie, &dir, &[("MEALIE_PASSWORD", "wrong")])
        .ensure_credential()
        .await;

    assert_eq!(outcome, BootstrapOutcome::Degraded("fallback-key".into()));
    assert!(outcome.is_degraded());
    assert_eq!(mealie.state.logins.load(Ordering::SeqCst), 1);
    assert_eq!(mealie.state.mints.load(Ordering::SeqCst), 0);
    assert!(!token_path(&dir).exists());
}

async fn assert_mint_fault_degrades(fault: MintFault, expected_mints: usize) {
    common::init_test_logging();
    let mealie = FakeMealie::start(&[]).await;
    mealie.fail_minting(fault);
    let dir = TempDir::new().unwrap();

    let outcome = bootstrapper(&mealie, &dir, &[]).ensure_credential().await;

    assert_eq!(outcome, BootstrapOutcome::Degraded("fallback-key".into()), "{fault:?}");
    assert_eq!(mealie.state.logins.load(Ordering::SeqCst), 1, "{fault:?}");
    assert_eq!(mealie.state.mints.load(Ordering::SeqCst), expected_mints, "{fault:?}");
    assert!(!token_path(&dir).exists(), "{fault:?}");
}

#[tokio::test]
async fn test_api_token_server_error_degrades() {
    assert_mint_fault_degrades(MintFault::ApiTokenServerError, 1).await;
}

#[tokio::test]
async fn test_api_token_requires_created_status() {
    assert_mint_fault_degrades(MintFault::ApiTokenWrongSuccessStatus, 1).await;
}

#[tokio::test]
async fn test_api_token_response_without_token_degrades() {
    assert_mint_fault_degrades(MintFault::ApiTokenWithoutToken, 1).await;
}

#[tokio::test]
async fn test_login_response_without_access_token_degrades() {
    assert_mint_fault_degrades(MintFault::LoginWithoutAccessToken, 0).await;
}

#[tokio::test]
async fn test_unreachable_mealie_degrades() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let config = common::test_config(
        "http://127.0.0.1:9",
        "http://letta.invalid",
        &token_path(&dir),
    );
    write_token_file(&dir, r#"{"token":"abc"}"#);

    let outcome = AuthBootstrapper::from_config(&config.mealie)
        .ensure_credential()
        .await;

    assert!(outcome.is_degraded());
    assert_eq!(outcome.token(), "fallback-key");
    assert_eq!(
        std::fs::read_to_string(token_path(&dir)).unwrap(),
        r#"{"token":"abc"}"#
    );
}

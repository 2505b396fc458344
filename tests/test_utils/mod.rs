//! Test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};
use serde_json::Value;
use tempfile::TempDir;

use assethub::api::AppState;
use assethub::api::app;
use assethub::core::AppConfig;
use assethub::core::db::{async_db, migrate_db};

pub const TEST_USER_ID: &str = "6a503659-15e4-4427-835f-7873f8ff8ecf";

/// Config rooted in `storage` with no paid sources. Every upstream the
/// tests could reach points at a closed port unless overridden.
pub fn test_config(storage: &Path) -> AppConfig {
    AppConfig {
        storage_path: storage.display().to_string(),
        db_path: storage.join("db").display().to_string(),
        unsplash_access_key: None,
        pexels_api_key: None,
        unsplash_api_url: String::from("http://127.0.0.1:1"),
        pexels_api_url: String::from("http://127.0.0.1:1"),
        picsum_url: String::from("https://picsum.photos"),
        unsplash_source_url: String::from("https://source.unsplash.com"),
        auth_api_url: String::from("http://127.0.0.1:1"),
        auth_service_key: String::from("test-service-key"),
    }
}

/// Creates the application router over a freshly migrated db at
/// `config.db_path`.
pub async fn test_app_with_config(config: AppConfig) -> Router {
    fs::create_dir_all(&config.db_path).expect("Failed to create db directory");

    let db = async_db(&config.db_path)
        .await
        .expect("Failed to connect to async db");
    db.call(|conn| {
        migrate_db(conn).expect("Failed to migrate db");
        Ok(())
    })
    .await
    .unwrap();

    let app_state = AppState::new(db, config);
    app(Arc::new(RwLock::new(app_state)))
}

/// Creates a test application router in a temporary directory. Keep
/// the returned `TempDir` alive for as long as the router is used.
pub async fn test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let router = test_app_with_config(test_config(dir.path())).await;
    (router, dir)
}

/// Same as `test_app` with tokens verified by the server at `auth_url`
pub async fn test_app_with_auth(auth_url: &str) -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = test_config(dir.path());
    config.auth_api_url = auth_url.to_string();
    let router = test_app_with_config(config).await;
    (router, dir)
}

/// Register `token` with the mock auth provider as the user described
/// by `user`
pub async fn mock_auth_user(
    server: &mut mockito::ServerGuard,
    token: &str,
    user: Value,
) -> mockito::Mock {
    server
        .mock("GET", "/auth/v1/user")
        .match_header("apikey", "test-service-key")
        .match_header("authorization", format!("Bearer {}", token).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user.to_string())
        .create_async()
        .await
}

pub async fn body_to_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

pub async fn body_to_string(body: Body) -> String {
    String::from_utf8(body_to_bytes(body).await).expect("Body is not utf-8")
}

pub async fn body_to_json(body: Body) -> Value {
    serde_json::from_slice(&body_to_bytes(body).await).expect("Body is not json")
}

//! Shared fixtures: an in-memory SQLite store and a fully wired router.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, Schema};
use tower::ServiceExt;

use user_service_lib::infra::{Cache, Database, MemoryCache};
use user_service_lib::repository::entities::UserEntity;
use user_service_lib::repository::UserStore;
use user_service_lib::routes::create_router;
use user_service_lib::state::AppState;

pub const TEST_TTL_SECONDS: u64 = 3600;

/// Connect to a fresh in-memory database with the users table created.
pub async fn memory_db() -> DatabaseConnection {
    // A single connection keeps every query on the same in-memory database
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let conn = SeaDatabase::connect(options)
        .await
        .expect("Failed to open sqlite");

    let backend = conn.get_database_backend();
    let table = Schema::new(backend).create_table_from_entity(UserEntity);
    conn.execute(backend.build(&table))
        .await
        .expect("Failed to create users table");

    conn
}

/// Router, raw connection and cache backend for one test.
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub cache: Arc<MemoryCache>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = memory_db().await;
        let cache = Arc::new(MemoryCache::new());

        let state = AppState::new(
            Arc::new(UserStore::new(db.clone())),
            Cache::new(cache.clone(), TEST_TTL_SECONDS),
            Arc::new(Database::from_connection(db.clone())),
        );

        Self {
            router: create_router(state, 30),
            db,
            cache,
        }
    }

    /// Send one request and return the status and body text.
    pub async fn send(&self, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

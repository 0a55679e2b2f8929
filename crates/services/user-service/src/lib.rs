//! User Service Library
//!
//! HTTP CRUD for users over a relational store, with a read-through,
//! write-invalidate cache in front of single-user reads.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use common::{CacheBackend, CacheConfig};

use crate::config::UserServiceConfig;
use crate::infra::{Cache, CacheResult, CacheStore, Database, MemoryCache, RedisCache};
use crate::repository::UserStore;
use crate::routes::create_router;
use crate::state::AppState;

/// Open the configured cache backend.
///
/// The Redis backend must answer `PING` before this returns.
pub async fn connect_cache(config: &CacheConfig) -> CacheResult<Arc<dyn CacheStore>> {
    match config.backend {
        CacheBackend::Redis => Ok(Arc::new(RedisCache::connect(&config.url).await?)),
        CacheBackend::Memory => {
            info!("Using in-process cache");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// Store and cache are both checked before the listener is bound; either
/// failing aborts startup.
pub async fn run(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Arc::new(Database::connect(&config.database).await?);

    // Initialize cache
    let store = connect_cache(&config.cache).await?;
    let cache = Cache::new(store, config.cache.default_ttl_seconds);

    // Create repository and app state
    let users = Arc::new(UserStore::new(db.get_connection()));
    let state = AppState::new(users, cache, db.clone());

    // Build router
    let app = create_router(state, config.request_timeout_seconds);

    // Build address
    let addr: SocketAddr = config.service.addr().parse()?;
    info!(service = %config.service.service_name, "Listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    db.close().await?;

    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Unable to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

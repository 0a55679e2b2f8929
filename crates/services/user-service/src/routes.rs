//! Route configuration.

use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, response::Json, routing::get, BoxError, Router};
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use common::AppError;

use crate::handlers::{health_routes, user_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Path serving the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Create the main router with all routes.
pub fn create_router(state: AppState, request_timeout_seconds: u64) -> Router {
    let router = Router::new()
        // Health check
        .nest("/health", health_routes())
        // API documentation
        .route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
        // User CRUD
        .merge(user_routes());

    with_middleware(router, Duration::from_secs(request_timeout_seconds)).with_state(state)
}

/// Request tracing plus a per-request deadline answered with `AppError::Timeout`.
pub fn with_middleware<S>(router: Router<S>, request_timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        tracing::warn!("Request timed out");
        AppError::Timeout
    } else {
        AppError::internal(format!("Unhandled middleware error: {}", err))
    }
}

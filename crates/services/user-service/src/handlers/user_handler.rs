//! User handlers.
//!
//! One path, dispatched on method. GET reads through the cache, PUT refreshes
//! it after a successful update and DELETE invalidates it. Cache failures are
//! logged and never change the response.

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use tracing::{debug, error, info, warn};

use common::{AppError, AppResult};
use domain::{User, UserPayload, USER_ID_PARAM, USER_PATH};

use crate::extractors::PayloadJson;
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route(
        USER_PATH,
        get(get_user)
            .post(create_user)
            .put(update_user)
            .delete(delete_user)
            // `get` would otherwise answer HEAD as well
            .head(unsupported_method)
            .fallback(unsupported_method),
    )
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    params(
        ("id" = i64, Query, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserPayload),
        (status = 400, description = "Missing or non-numeric id"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<UserPayload>> {
    let id = parse_user_id(&params)?;

    // Try cache first
    if let Some(user) = cached_user(&state, id).await {
        return Ok(Json(user));
    }

    // Cache miss - the store result is not written back
    let user = state.users.get_by_id(id).await?;

    Ok(Json(UserPayload::from(user)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "User created", body = UserPayload),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    PayloadJson(payload): PayloadJson<UserPayload>,
) -> AppResult<Json<UserPayload>> {
    let id = state.users.add(payload.name.clone()).await?;
    info!(id, "User created");

    Ok(Json(UserPayload::new(id, payload.name)))
}

/// Update a user's name
#[utoipa::path(
    put,
    path = "/user",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Malformed body or store failure"),
        (status = 500, description = "No user with that id")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    PayloadJson(payload): PayloadJson<UserPayload>,
) -> AppResult<StatusCode> {
    let user = User::from(payload.clone());

    let updated = state.users.update(&user).await.map_err(|e| {
        error!(id = user.id, error = ?e, "User update failed");
        AppError::bad_request("User could not be updated")
    })?;

    if !updated {
        return Err(AppError::internal(format!(
            "update matched no user with id {}",
            user.id
        )));
    }

    // Failures are logged by the cache
    let _ = state.cache.set(user.id, &payload).await;

    Ok(StatusCode::OK)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/user",
    tag = "Users",
    params(
        ("id" = i64, Query, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted, or no such user"),
        (status = 400, description = "Missing or non-numeric id"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<StatusCode> {
    let id = parse_user_id(&params)?;

    // Failures are logged by the cache
    let _ = state.cache.delete(id).await;

    state.users.delete(id).await?;
    info!(id, "User deleted");

    Ok(StatusCode::OK)
}

async fn unsupported_method(method: Method) -> AppError {
    warn!(%method, "Unsupported method");
    AppError::NotImplemented
}

/// Extract the user id from the query string. The first `id` wins.
pub fn parse_user_id(params: &[(String, String)]) -> AppResult<i64> {
    let raw = params
        .iter()
        .find(|(key, _)| key == USER_ID_PARAM)
        .map(|(_, value)| value.as_str())
        .unwrap_or_default();

    if raw.is_empty() {
        return Err(AppError::bad_request("can't get id"));
    }

    raw.parse()
        .map_err(|e| AppError::bad_request(format!("can't parse id: {}", e)))
}

/// Cached payload for `id`. Errors and undecodable entries count as a miss.
async fn cached_user(state: &AppState, id: i64) -> Option<UserPayload> {
    let raw = match state.cache.get(id).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(id, "Cache miss");
            return None;
        }
        Err(_) => return None,
    };

    match serde_json::from_str(&raw) {
        Ok(user) => {
            debug!(id, "Cache hit");
            Some(user)
        }
        Err(e) => {
            warn!(id, error = %e, "Ignoring undecodable cache entry");
            None
        }
    }
}

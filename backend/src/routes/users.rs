//! User routes
//!
//! Password hashing is offloaded to the blocking thread pool by the service.

use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use bloglist_shared::types::{RegisterUserRequest, UserListEntry, UserResponse};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(register).get(list_users))
}

/// POST /api/users - Register a new user
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let Json(req) = payload?;
    let user = UserService::register(state.store(), state.passwords(), req).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users - Users with their blogs' title, url and author
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserListEntry>>> {
    let users = UserService::list(state.store()).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

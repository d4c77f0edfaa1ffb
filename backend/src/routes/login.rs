//! Login route
//!
//! Exchanges a username and password for a bearer token.

use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use bloglist_shared::types::{LoginRequest, LoginResponse};

/// Create login routes
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/", post(login))
}

/// POST /api/login
///
/// # Performance
/// Password verification is offloaded to blocking thread pool.
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    let response = UserService::login(state.store(), state.jwt(), req).await?;
    Ok(Json(response))
}

//! Authentication extractor
//!
//! A request moves through three steps: the bearer token is extracted from
//! the `Authorization` header, verified by the JWT service, and resolved to a
//! stored user. Failing any step rejects the request with 401 before the
//! handler runs.

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use bloglist_shared::{AuthError, User};
use tracing::debug;
use uuid::Uuid;

/// Authenticated user resolved from a bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    #[inline]
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidScheme)
}

/// Run the full extract, verify, resolve sequence
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = bearer_token(headers)?;
    let claims = state.jwt().verify_token(token)?;
    let user_id = claims.user_id()?;

    let user = state
        .store()
        .find_user_by_id(user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            debug!(%user_id, "Token refers to a user that no longer exists");
            AuthError::UserNotFound
        })?;

    Ok(AuthUser { user })
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        authenticate(&app_state, &parts.headers).await
    }
}

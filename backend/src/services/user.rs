//! User service for registration, listing and login
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{NewUser, RepositoryError, Store, UserRepository};
use bloglist_shared::types::{LoginRequest, LoginResponse, RegisterUserRequest};
use bloglist_shared::{AuthError, User, UserWithBlogs};
use tracing::{info, warn};
use validator::Validate;

/// User service for account operations
pub struct UserService;

impl UserService {
    /// Register a new user
    pub async fn register(
        store: &dyn Store,
        passwords: &PasswordService,
        req: RegisterUserRequest,
    ) -> Result<User, ApiError> {
        req.validate()?;
        let (Some(username), Some(password)) = (req.username, req.password) else {
            return Err(ApiError::Validation(
                "username and password are required".to_string(),
            ));
        };

        if store
            .username_exists(&username)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(username_taken());
        }

        let password_hash = passwords
            .hash_async(password)
            .await
            .map_err(ApiError::Internal)?;

        let user = store
            .create_user(NewUser {
                username,
                name: req.name,
                password_hash,
            })
            .await
            .map_err(|e| {
                if matches!(
                    e.downcast_ref::<RepositoryError>(),
                    Some(RepositoryError::DuplicateUsername(_))
                ) {
                    username_taken()
                } else {
                    ApiError::Internal(e)
                }
            })?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// All users with projections of their blogs
    pub async fn list(store: &dyn Store) -> Result<Vec<UserWithBlogs>, ApiError> {
        store
            .list_users_with_blogs()
            .await
            .map_err(ApiError::Internal)
    }

    /// Login with username and password
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(
        store: &dyn Store,
        jwt_service: &JwtService,
        req: LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        let Some(user) = store
            .find_user_by_username(&req.username)
            .await
            .map_err(ApiError::Internal)?
        else {
            warn!(username = %req.username, "Login attempt for unknown user");
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = PasswordService::verify_async(req.password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = jwt_service
            .issue_token(user.id, &user.username)
            .map_err(ApiError::Internal)?;

        Ok(LoginResponse {
            token,
            username: user.username,
            name: user.name,
        })
    }
}

fn username_taken() -> ApiError {
    ApiError::InvalidField {
        field: "username".to_string(),
        message: "username must be unique".to_string(),
    }
}

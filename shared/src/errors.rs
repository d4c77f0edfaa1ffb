//! Error types for the Bloglist application

use thiserror::Error;

/// Authentication error types
///
/// Every variant maps to HTTP 401.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing authorization header")]
    MissingToken,

    #[error("Invalid authorization format")]
    InvalidScheme,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid user ID in token")]
    InvalidSubject,

    #[error("User not found")]
    UserNotFound,
}

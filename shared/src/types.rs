//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::aggregation::{AuthorBlogs, AuthorLikes};
use crate::models::{Blog, BlogOwner, BlogSummary, BlogWithOwner, User, UserWithBlogs};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// ============================================================================
// Blog Types
// ============================================================================

/// Largest like count a blog may hold
pub const MAX_LIKES: i64 = i32::MAX as i64;

/// Create blog request
///
/// `title` and `url` are optional at the type level so that a missing field
/// surfaces as a validation error rather than a JSON parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title cannot be empty")
    )]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[validate(
        required(message = "url is required"),
        length(min = 1, message = "url cannot be empty")
    )]
    pub url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 2147483647, message = "likes must be between 0 and 2147483647"))]
    pub likes: Option<i64>,
}

/// Update blog request. Every provided field overwrites the stored one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBlogRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "url cannot be empty"))]
    pub url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 2147483647, message = "likes must be between 0 and 2147483647"))]
    pub likes: Option<i64>,
}

/// Blog as returned by mutating endpoints, with the owner as a bare id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Uuid,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: blog.user,
        }
    }
}

/// Blog as returned by the listing endpoint, with the owner embedded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopulatedBlogResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Option<BlogOwner>,
}

impl From<BlogWithOwner> for PopulatedBlogResponse {
    fn from(view: BlogWithOwner) -> Self {
        let BlogWithOwner { blog, owner } = view;
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner,
        }
    }
}

/// Aggregate statistics over every stored blog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogStatsResponse {
    pub total_likes: i64,
    pub favorite_blog: Option<BlogResponse>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

// ============================================================================
// User Types
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(
        required(message = "username is required"),
        length(min = 3, message = "username must be at least 3 characters")
    )]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[validate(
        required(message = "password is required"),
        length(min = 3, message = "password must be at least 3 characters")
    )]
    pub password: Option<String>,
}

/// Registered user, with the ownership set as bare ids
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<Uuid>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: user.blogs,
        }
    }
}

/// User listing entry, with owned blogs projected to title/url/author
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserListEntry {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<BlogSummary>,
}

impl From<UserWithBlogs> for UserListEntry {
    fn from(view: UserWithBlogs) -> Self {
        Self {
            id: view.user.id,
            username: view.user.username,
            name: view.user.name,
            blogs: view.blogs,
        }
    }
}

// ============================================================================
// Login Types
// ============================================================================

/// Login request
///
/// Missing fields deserialize as empty strings and fail as bad credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

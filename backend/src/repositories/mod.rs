//! Data access layer
//!
//! Handlers and services talk to storage only through the [`Store`] trait.
//! `PgStore` backs production; `MemoryStore` backs the `memory` storage
//! setting and the test suites.

pub mod memory;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use bloglist_shared::{Blog, BlogWithOwner, User, UserWithBlogs};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Input for creating a blog
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Uuid,
}

/// Field replacements for a blog. `None` leaves the stored value.
#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

/// Typed failures callers may want to react to; everything else is opaque
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("user {0} does not exist")]
    MissingUser(Uuid),
}

/// Blog persistence
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// All blogs in creation order
    async fn list_blogs(&self) -> Result<Vec<Blog>>;

    /// All blogs in creation order, each joined with its owner
    async fn list_blogs_with_owner(&self) -> Result<Vec<BlogWithOwner>>;

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>>;

    async fn create_blog(&self, input: NewBlog) -> Result<Blog>;

    /// Apply `changes`; `None` if no blog has this id
    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> Result<Option<Blog>>;

    /// Delete and return the blog; `None` if no blog has this id
    async fn delete_blog(&self, id: Uuid) -> Result<Option<Blog>>;
}

/// User persistence, including each user's ownership set
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`RepositoryError::DuplicateUsername`] if the name is taken
    async fn create_user(&self, input: NewUser) -> Result<User>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn username_exists(&self, username: &str) -> Result<bool>;

    /// All users in creation order, each with projections of its blogs
    async fn list_users_with_blogs(&self) -> Result<Vec<UserWithBlogs>>;

    /// Append `blog_id` to the user's ownership set
    async fn add_blog_to_user(&self, user_id: Uuid, blog_id: Uuid) -> Result<()>;

    /// Remove `blog_id` from the user's ownership set
    async fn remove_blog_from_user(&self, user_id: Uuid, blog_id: Uuid) -> Result<()>;
}

/// Complete storage backend
#[async_trait]
pub trait Store: BlogRepository + UserRepository {
    /// Cheap round trip proving the backend is reachable
    async fn health_check(&self) -> Result<()>;
}

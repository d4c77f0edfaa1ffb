//! Data models for the Bloglist application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
///
/// `blogs` is the ownership set: the ids of every post this user created
/// and is allowed to delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub blogs: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether `blog_id` is in this user's ownership set
    pub fn owns(&self, blog_id: Uuid) -> bool {
        self.blogs.contains(&blog_id)
    }
}

/// Blog post record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    /// Owning user
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Public identity of a blog's owner, embedded in blog listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogOwner {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

impl From<&User> for BlogOwner {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

/// Blog joined with its owning user
///
/// `owner` is `None` only if the owning user row has gone missing.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogWithOwner {
    pub blog: Blog,
    pub owner: Option<BlogOwner>,
}

/// Projection of a blog shown inside a user listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogSummary {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub author: Option<String>,
}

impl From<&Blog> for BlogSummary {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title.clone(),
            url: blog.url.clone(),
            author: blog.author.clone(),
        }
    }
}

/// User joined with the projections of the blogs it owns
#[derive(Debug, Clone, PartialEq)]
pub struct UserWithBlogs {
    pub user: User,
    pub blogs: Vec<BlogSummary>,
}

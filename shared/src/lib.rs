//! Bloglist Shared Library
//!
//! This crate contains shared types, models, and the pure blog aggregations
//! used by the backend.

pub mod aggregation;
pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use aggregation::{
    favorite_blog, most_blogs, most_likes, total_likes, AuthorBlogs, AuthorLikes, BlogEntry,
};
pub use errors::*;
pub use models::{Blog, BlogOwner, BlogSummary, BlogWithOwner, User, UserWithBlogs};
pub use types::*;

//! In-process store
//!
//! Keeps users and blogs in insertion-ordered vectors behind a single
//! `RwLock`. Data lives only as long as the process.

use super::{
    BlogChanges, BlogRepository, NewBlog, NewUser, RepositoryError, Store, UserRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use bloglist_shared::{Blog, BlogOwner, BlogSummary, BlogWithOwner, User, UserWithBlogs};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    blogs: Vec<Blog>,
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn list_blogs(&self) -> Result<Vec<Blog>> {
        Ok(self.inner.read().await.blogs.clone())
    }

    async fn list_blogs_with_owner(&self) -> Result<Vec<BlogWithOwner>> {
        let inner = self.inner.read().await;
        Ok(inner
            .blogs
            .iter()
            .map(|blog| BlogWithOwner {
                blog: blog.clone(),
                owner: inner
                    .users
                    .iter()
                    .find(|u| u.id == blog.user)
                    .map(BlogOwner::from),
            })
            .collect())
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>> {
        let inner = self.inner.read().await;
        Ok(inner.blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn create_blog(&self, input: NewBlog) -> Result<Blog> {
        let blog = Blog {
            id: Uuid::new_v4(),
            title: input.title,
            author: input.author,
            url: input.url,
            likes: input.likes,
            user: input.user,
            created_at: Utc::now(),
        };
        self.inner.write().await.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> Result<Option<Blog>> {
        let mut inner = self.inner.write().await;
        let Some(blog) = inner.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            blog.title = title;
        }
        if let Some(author) = changes.author {
            blog.author = Some(author);
        }
        if let Some(url) = changes.url {
            blog.url = url;
        }
        if let Some(likes) = changes.likes {
            blog.likes = likes;
        }
        Ok(Some(blog.clone()))
    }

    async fn delete_blog(&self, id: Uuid) -> Result<Option<Blog>> {
        let mut inner = self.inner.write().await;
        let position = inner.blogs.iter().position(|b| b.id == id);
        Ok(position.map(|index| inner.blogs.remove(index)))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == input.username) {
            return Err(RepositoryError::DuplicateUsername(input.username).into());
        }

        let user = User {
            id: Uuid::new_v4(),
            username: input.username,
            name: input.name,
            password_hash: input.password_hash,
            blogs: Vec::new(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().any(|u| u.username == username))
    }

    async fn list_users_with_blogs(&self) -> Result<Vec<UserWithBlogs>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .map(|user| UserWithBlogs {
                user: user.clone(),
                blogs: user
                    .blogs
                    .iter()
                    .filter_map(|id| inner.blogs.iter().find(|b| b.id == *id))
                    .map(BlogSummary::from)
                    .collect(),
            })
            .collect())
    }

    async fn add_blog_to_user(&self, user_id: Uuid, blog_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(RepositoryError::MissingUser(user_id))?;

        if !user.blogs.contains(&blog_id) {
            user.blogs.push(blog_id);
        }
        Ok(())
    }

    async fn remove_blog_from_user(&self, user_id: Uuid, blog_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == user_id) {
            user.blogs.retain(|id| *id != blog_id);
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

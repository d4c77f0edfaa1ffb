//! PostgreSQL store
//!
//! Each user's ownership set is a `UUID[]` column, maintained alongside the
//! `blogs.user_id` reference without a wrapping transaction.

use super::{
    BlogChanges, BlogRepository, NewBlog, NewUser, RepositoryError, Store, UserRepository,
};
use crate::db;
use anyhow::Result;
use async_trait::async_trait;
use bloglist_shared::{Blog, BlogOwner, BlogSummary, BlogWithOwner, User, UserWithBlogs};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRecord {
    id: Uuid,
    username: String,
    name: Option<String>,
    password_hash: String,
    blog_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            name: record.name,
            password_hash: record.password_hash,
            blogs: record.blog_ids,
            created_at: record.created_at,
        }
    }
}

/// Blog record from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct BlogRecord {
    id: Uuid,
    title: String,
    author: Option<String>,
    url: String,
    likes: i64,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<BlogRecord> for Blog {
    fn from(record: BlogRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            author: record.author,
            url: record.url,
            likes: record.likes,
            user: record.user_id,
            created_at: record.created_at,
        }
    }
}

/// Blog joined with its owner's public fields
#[derive(Debug, Clone, sqlx::FromRow)]
struct BlogWithOwnerRecord {
    #[sqlx(flatten)]
    blog: BlogRecord,
    owner_username: Option<String>,
    owner_name: Option<String>,
}

/// Blog projection for user listings
#[derive(Debug, Clone, sqlx::FromRow)]
struct BlogSummaryRecord {
    id: Uuid,
    title: String,
    url: String,
    author: Option<String>,
}

const USER_COLUMNS: &str = "id, username, name, password_hash, blog_ids, created_at";
const BLOG_COLUMNS: &str = "id, title, author, url, likes, user_id, created_at";

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BlogRepository for PgStore {
    async fn list_blogs(&self) -> Result<Vec<Blog>> {
        let records = sqlx::query_as::<_, BlogRecord>(&format!(
            "SELECT {} FROM blogs ORDER BY created_at, id",
            BLOG_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Blog::from).collect())
    }

    async fn list_blogs_with_owner(&self) -> Result<Vec<BlogWithOwner>> {
        let records = sqlx::query_as::<_, BlogWithOwnerRecord>(
            r#"
            SELECT b.id, b.title, b.author, b.url, b.likes, b.user_id, b.created_at,
                   u.username AS owner_username, u.name AS owner_name
            FROM blogs b
            LEFT JOIN users u ON u.id = b.user_id
            ORDER BY b.created_at, b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let owner = record.owner_username.map(|username| BlogOwner {
                    id: record.blog.user_id,
                    username,
                    name: record.owner_name,
                });
                BlogWithOwner {
                    blog: record.blog.into(),
                    owner,
                }
            })
            .collect())
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>> {
        let record = sqlx::query_as::<_, BlogRecord>(&format!(
            "SELECT {} FROM blogs WHERE id = $1",
            BLOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Blog::from))
    }

    async fn create_blog(&self, input: NewBlog) -> Result<Blog> {
        let record = sqlx::query_as::<_, BlogRecord>(&format!(
            r#"
            INSERT INTO blogs (id, title, author, url, likes, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BLOG_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.author)
        .bind(&input.url)
        .bind(input.likes)
        .bind(input.user)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    async fn update_blog(&self, id: Uuid, changes: BlogChanges) -> Result<Option<Blog>> {
        let record = sqlx::query_as::<_, BlogRecord>(&format!(
            r#"
            UPDATE blogs SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                url = COALESCE($4, url),
                likes = COALESCE($5, likes)
            WHERE id = $1
            RETURNING {}
            "#,
            BLOG_COLUMNS
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.author)
        .bind(changes.url)
        .bind(changes.likes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Blog::from))
    }

    async fn delete_blog(&self, id: Uuid) -> Result<Option<Blog>> {
        let record = sqlx::query_as::<_, BlogRecord>(&format!(
            "DELETE FROM blogs WHERE id = $1 RETURNING {}",
            BLOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Blog::from))
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, input: NewUser) -> Result<User> {
        let result = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (id, username, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.username)
        .bind(&input.name)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(record) => Ok(record.into()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(RepositoryError::DuplicateUsername(input.username).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(User::from))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(User::from))
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn list_users_with_blogs(&self) -> Result<Vec<UserWithBlogs>> {
        let users = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {} FROM users ORDER BY created_at, id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let blog_ids: Vec<Uuid> = users
            .iter()
            .flat_map(|u| u.blog_ids.iter().copied())
            .collect();

        let summaries: HashMap<Uuid, BlogSummary> = sqlx::query_as::<_, BlogSummaryRecord>(
            r#"
            SELECT id, title, url, author
            FROM blogs
            WHERE id = ANY($1)
            "#,
        )
        .bind(&blog_ids)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| {
            (
                r.id,
                BlogSummary {
                    id: r.id,
                    title: r.title,
                    url: r.url,
                    author: r.author,
                },
            )
        })
        .collect();

        Ok(users
            .into_iter()
            .map(|record| {
                let blogs = record
                    .blog_ids
                    .iter()
                    .filter_map(|id| summaries.get(id).cloned())
                    .collect();
                UserWithBlogs {
                    user: record.into(),
                    blogs,
                }
            })
            .collect())
    }

    async fn add_blog_to_user(&self, user_id: Uuid, blog_id: Uuid) -> Result<()> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET blog_ids = array_append(blog_ids, $2)
            WHERE id = $1 AND NOT ($2 = ANY(blog_ids))
            "#,
        )
        .bind(user_id)
        .bind(blog_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 && !self.user_exists(user_id).await? {
            return Err(RepositoryError::MissingUser(user_id).into());
        }
        Ok(())
    }

    async fn remove_blog_from_user(&self, user_id: Uuid, blog_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET blog_ids = array_remove(blog_ids, $2)
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(blog_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl PgStore {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<()> {
        db::health_check(&self.pool).await
    }
}

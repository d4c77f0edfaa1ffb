//! Blog service
//!
//! Creation and deletion touch two records, the blog and its owner's
//! ownership set. The writes are sequential and not compensated if the
//! second one fails.

use crate::error::ApiError;
use crate::repositories::{BlogChanges, BlogRepository, NewBlog, Store, UserRepository};
use bloglist_shared::types::{BlogStatsResponse, CreateBlogRequest, UpdateBlogRequest};
use bloglist_shared::{
    favorite_blog, most_blogs, most_likes, total_likes, Blog, BlogWithOwner, User,
};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Blog service for CRUD and statistics
pub struct BlogService;

impl BlogService {
    /// Parse a path id; malformed ids are reported like unknown ones
    pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
        Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId(format!("malformatted id '{}'", raw)))
    }

    /// All blogs with their owners embedded
    pub async fn list(store: &dyn Store) -> Result<Vec<BlogWithOwner>, ApiError> {
        store
            .list_blogs_with_owner()
            .await
            .map_err(ApiError::Internal)
    }

    /// Create a blog owned by `owner` and record it in the owner's set
    pub async fn create(
        store: &dyn Store,
        owner: &User,
        req: CreateBlogRequest,
    ) -> Result<Blog, ApiError> {
        req.validate()?;
        let (Some(title), Some(url)) = (req.title, req.url) else {
            return Err(ApiError::Validation("title and url are required".to_string()));
        };

        let blog = store
            .create_blog(NewBlog {
                title,
                author: req.author,
                url,
                likes: req.likes.unwrap_or(0),
                user: owner.id,
            })
            .await
            .map_err(ApiError::Internal)?;

        store
            .add_blog_to_user(owner.id, blog.id)
            .await
            .map_err(ApiError::Internal)?;

        info!(blog_id = %blog.id, user_id = %owner.id, "Blog created");
        Ok(blog)
    }

    /// Overwrite the provided fields of a blog
    pub async fn update(
        store: &dyn Store,
        id: Uuid,
        req: UpdateBlogRequest,
    ) -> Result<Blog, ApiError> {
        req.validate()?;

        let changes = BlogChanges {
            title: req.title,
            author: req.author,
            url: req.url,
            likes: req.likes,
        };

        store
            .update_blog(id, changes)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::InvalidId(format!("no blog with id {}", id)))
    }

    /// Delete a blog owned by `caller`
    ///
    /// The ownership check runs before anything is written.
    pub async fn delete(store: &dyn Store, caller: &User, id: Uuid) -> Result<Blog, ApiError> {
        let exists = store.find_blog(id).await.map_err(ApiError::Internal)?;
        if exists.is_none() {
            return Err(ApiError::InvalidId(format!("no blog with id {}", id)));
        }

        if !caller.owns(id) {
            warn!(blog_id = %id, user_id = %caller.id, "Rejected delete of blog not owned by caller");
            return Err(ApiError::NotOwner(
                "only the creator can delete a blog".to_string(),
            ));
        }

        store
            .remove_blog_from_user(caller.id, id)
            .await
            .map_err(ApiError::Internal)?;

        let deleted = store
            .delete_blog(id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::InvalidId(format!("no blog with id {}", id)))?;

        info!(blog_id = %id, user_id = %caller.id, "Blog deleted");
        Ok(deleted)
    }

    /// Aggregate statistics over every blog
    pub async fn stats(store: &dyn Store) -> Result<BlogStatsResponse, ApiError> {
        let blogs = store.list_blogs().await.map_err(ApiError::Internal)?;
        Ok(Self::summarize(&blogs))
    }

    /// Pure part of [`BlogService::stats`]
    pub fn summarize(blogs: &[Blog]) -> BlogStatsResponse {
        BlogStatsResponse {
            total_likes: total_likes(blogs),
            favorite_blog: favorite_blog(blogs).cloned().map(Into::into),
            most_blogs: most_blogs(blogs),
            most_likes: most_likes(blogs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MemoryStore, NewUser};

    async fn store_with_user(username: &str) -> (MemoryStore, User) {
        let store = MemoryStore::new();
        let user = store
            .create_user(NewUser {
                username: username.to_string(),
                name: None,
                password_hash: "$2b$04$placeholder".to_string(),
            })
            .await
            .unwrap();
        (store, user)
    }

    fn create_request(title: &str, likes: Option<i64>) -> CreateBlogRequest {
        CreateBlogRequest {
            title: Some(title.to_string()),
            author: Some("arjun".to_string()),
            url: Some("a.com".to_string()),
            likes,
        }
    }

    #[test]
    fn test_parse_id_rejects_malformed() {
        assert!(matches!(
            BlogService::parse_id("5a422a851b54a676234d17f7"),
            Err(ApiError::InvalidId(_))
        ));
        assert!(BlogService::parse_id(&Uuid::new_v4().to_string()).is_ok());
    }

    #[tokio::test]
    async fn test_create_defaults_likes_and_records_ownership() {
        let (store, user) = store_with_user("root").await;

        let blog = BlogService::create(&store, &user, create_request("Hello", None))
            .await
            .unwrap();
        assert_eq!(blog.likes, 0);
        assert_eq!(blog.user, user.id);

        let owner = store.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(owner.blogs, vec![blog.id]);
    }

    #[tokio::test]
    async fn test_create_without_url_is_rejected() {
        let (store, user) = store_with_user("root").await;
        let req = CreateBlogRequest {
            url: None,
            ..create_request("Hello", Some(3))
        };

        let result = BlogService::create(&store, &user, req).await;
        assert!(matches!(result, Err(ApiError::InvalidField { .. })));
        assert!(BlogService::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_leaves_blog() {
        let (store, owner) = store_with_user("root").await;
        let other = store
            .create_user(NewUser {
                username: "intruder".to_string(),
                name: None,
                password_hash: "$2b$04$placeholder".to_string(),
            })
            .await
            .unwrap();
        let blog = BlogService::create(&store, &owner, create_request("Hello", Some(1)))
            .await
            .unwrap();

        let result = BlogService::delete(&store, &other, blog.id).await;
        assert!(matches!(result, Err(ApiError::NotOwner(_))));
        assert!(store.find_blog(blog.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_by_owner_clears_ownership_set() {
        let (store, user) = store_with_user("root").await;
        let blog = BlogService::create(&store, &user, create_request("Hello", Some(1)))
            .await
            .unwrap();
        let user = store.find_user_by_id(user.id).await.unwrap().unwrap();

        let deleted = BlogService::delete(&store, &user, blog.id).await.unwrap();
        assert_eq!(deleted.id, blog.id);

        let user = store.find_user_by_id(user.id).await.unwrap().unwrap();
        assert!(user.blogs.is_empty());
        assert!(store.find_blog(blog.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_invalid() {
        let (store, user) = store_with_user("root").await;
        let result = BlogService::delete(&store, &user, Uuid::new_v4()).await;
        assert!(matches!(result, Err(ApiError::InvalidId(_))));
    }

    #[tokio::test]
    async fn test_stats_over_stored_blogs() {
        let (store, user) = store_with_user("root").await;
        for (title, likes) in [("a", 5), ("b", 9), ("c", 9)] {
            BlogService::create(&store, &user, create_request(title, Some(likes)))
                .await
                .unwrap();
        }

        let stats = BlogService::stats(&store).await.unwrap();
        assert_eq!(stats.total_likes, 23);
        assert_eq!(stats.favorite_blog.unwrap().title, "b");
        assert_eq!(stats.most_blogs.unwrap().blogs, 3);
        assert_eq!(stats.most_likes.unwrap().likes, 23);
    }

    #[test]
    fn test_summarize_empty() {
        let stats = BlogService::summarize(&[]);
        assert_eq!(stats.total_likes, 0);
        assert!(stats.favorite_blog.is_none());
        assert!(stats.most_blogs.is_none());
        assert!(stats.most_likes.is_none());
    }
}

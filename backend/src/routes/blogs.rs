//! Blog routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::BlogService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use bloglist_shared::types::{
    BlogResponse, BlogStatsResponse, CreateBlogRequest, PopulatedBlogResponse, UpdateBlogRequest,
};

/// Create blog routes
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/stats", get(blog_stats))
        .route("/:id", put(update_blog).delete(delete_blog))
}

/// GET /api/blogs - All blogs with their owners embedded
async fn list_blogs(State(state): State<AppState>) -> ApiResult<Json<Vec<PopulatedBlogResponse>>> {
    let blogs = BlogService::list(state.store()).await?;
    Ok(Json(blogs.into_iter().map(Into::into).collect()))
}

/// POST /api/blogs - Create a blog owned by the caller
///
/// # Authentication
/// Requires valid Bearer token in Authorization header.
async fn create_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BlogResponse>)> {
    let Json(req) = payload?;
    let blog = BlogService::create(state.store(), &auth.user, req).await?;
    Ok((StatusCode::CREATED, Json(blog.into())))
}

/// PUT /api/blogs/:id - Overwrite the provided fields of a blog
async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBlogRequest>, JsonRejection>,
) -> ApiResult<Json<BlogResponse>> {
    let Json(req) = payload?;
    let id = BlogService::parse_id(&id)?;
    let blog = BlogService::update(state.store(), id, req).await?;
    Ok(Json(blog.into()))
}

/// DELETE /api/blogs/:id - Delete a blog the caller owns
///
/// # Authentication
/// Requires valid Bearer token in Authorization header.
async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<BlogResponse>> {
    let id = BlogService::parse_id(&id)?;
    let blog = BlogService::delete(state.store(), &auth.user, id).await?;
    Ok(Json(blog.into()))
}

/// GET /api/blogs/stats - Likes and author statistics
async fn blog_stats(State(state): State<AppState>) -> ApiResult<Json<BlogStatsResponse>> {
    let stats = BlogService::stats(state.store()).await?;
    Ok(Json(stats))
}

//! Integration tests for blog endpoints

mod common;

use axum::http::StatusCode;
use bloglist_shared::types::MAX_LIKES;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_blogs_are_returned_as_json() {
    let app = common::TestApp::new();
    let (_, token) = app.register_and_login().await;
    app.create_blog(&token, "React patterns", "Michael Chan", 7).await;
    app.create_blog(&token, "Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5)
        .await;

    let response = app.get("/api/blogs").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("application/json"));
    let blogs = response.json();
    assert_eq!(blogs.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_listed_blogs_embed_owner() {
    let app = common::TestApp::new();
    let (username, token) = app.register_and_login().await;
    app.create_blog(&token, "React patterns", "Michael Chan", 7).await;

    let blogs = app.get("/api/blogs").await.json();
    let blog = &blogs[0];

    assert!(blog["id"].is_string());
    assert_eq!(blog["user"]["username"], username.as_str());
    assert_eq!(blog["user"]["name"], "Test User");
    assert!(blog["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_blog_records_owner() {
    let app = common::TestApp::new();
    let (username, token) = app.register_and_login().await;

    let blog = app.create_blog(&token, "Canonical string reduction", "Edsger W. Dijkstra", 12).await;
    assert_eq!(blog["title"], "Canonical string reduction");
    assert_eq!(blog["likes"], 12);

    let users = app.get("/api/users").await.json();
    let owner = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == username.as_str())
        .unwrap();
    assert_eq!(owner["id"], blog["user"]);
    assert_eq!(owner["blogs"][0]["id"], blog["id"]);
    assert_eq!(owner["blogs"][0]["title"], "Canonical string reduction");
}

#[tokio::test]
async fn test_likes_default_to_zero() {
    let app = common::TestApp::new();
    let (_, token) = app.register_and_login().await;

    let response = app
        .post(
            "/api/blogs",
            json!({ "title": "First class tests", "author": "Robert C. Martin", "url": "http://blog.cleancoder.com" }),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["likes"], 0);
}

#[tokio::test]
async fn test_blog_without_title_or_url_is_rejected() {
    let app = common::TestApp::new();
    let (_, token) = app.register_and_login().await;

    let no_title = app
        .post("/api/blogs", json!({ "author": "x", "url": "http://x.com" }), Some(&token))
        .await;
    assert_eq!(no_title.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_title.json()["error"]["field"], "title");

    let no_url = app
        .post("/api/blogs", json!({ "title": "x", "author": "x" }), Some(&token))
        .await;
    assert_eq!(no_url.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_url.json()["error"]["field"], "url");

    assert_eq!(app.get("/api/blogs").await.json().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_blog_without_token_is_unauthorized() {
    let app = common::TestApp::new();

    let response = app
        .post("/api/blogs", json!({ "title": "x", "url": "http://x.com" }), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.get("/api/blogs").await.json().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_update_overwrites_given_fields() {
    let app = common::TestApp::new();
    let (_, token) = app.register_and_login().await;
    let blog = app.create_blog(&token, "Type wars", "Robert C. Martin", 2).await;
    let id = blog["id"].as_str().unwrap();

    let response = app.put(&format!("/api/blogs/{}", id), json!({ "likes": 3 })).await;

    assert_eq!(response.status, StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["likes"], 3);
    assert_eq!(updated["title"], "Type wars");
    assert_eq!(updated["user"], blog["user"]);
}

#[tokio::test]
async fn test_update_unknown_or_malformed_id() {
    let app = common::TestApp::new();

    let unknown = app
        .put(&format!("/api/blogs/{}", Uuid::new_v4()), json!({ "likes": 1 }))
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    let malformed = app.put("/api/blogs/not-an-id", json!({ "likes": 1 })).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.json()["error"]["code"], "INVALID_ID");
}

#[tokio::test]
async fn test_owner_can_delete_blog() {
    let app = common::TestApp::new();
    let (username, token) = app.register_and_login().await;
    let blog = app.create_blog(&token, "TDD harms architecture", "Robert C. Martin", 0).await;
    let id = blog["id"].as_str().unwrap();

    let response = app.delete(&format!("/api/blogs/{}", id), Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["id"], blog["id"]);
    assert_eq!(app.get("/api/blogs").await.json().as_array().unwrap().len(), 0);

    let users = app.get("/api/users").await.json();
    let owner = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == username.as_str())
        .unwrap();
    assert_eq!(owner["blogs"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_non_owner_cannot_delete_blog() {
    let app = common::TestApp::new();
    let (_, owner_token) = app.register_and_login().await;
    let (_, other_token) = app.register_and_login().await;
    let blog = app.create_blog(&owner_token, "Mine", "Owner", 1).await;
    let path = format!("/api/blogs/{}", blog["id"].as_str().unwrap());

    let response = app.delete(&path, Some(&other_token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"]["code"], "NOT_OWNER");
    assert_eq!(app.get("/api/blogs").await.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_or_malformed_id() {
    let app = common::TestApp::new();
    let (_, token) = app.register_and_login().await;

    let unknown = app
        .delete(&format!("/api/blogs/{}", Uuid::new_v4()), Some(&token))
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    let malformed = app.delete("/api/blogs/12345", Some(&token)).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = common::TestApp::new();
    let (_, token) = app.register_and_login().await;

    let response = app
        .request("POST", "/api/blogs", Some(&token), Some(json!("just a string")))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_summarize_all_blogs() {
    let app = common::TestApp::new();
    let (_, token) = app.register_and_login().await;
    app.create_blog(&token, "React patterns", "Michael Chan", 7).await;
    app.create_blog(&token, "Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5)
        .await;
    app.create_blog(&token, "Canonical string reduction", "Edsger W. Dijkstra", 12)
        .await;
    app.create_blog(&token, "First class tests", "Robert C. Martin", 10).await;
    app.create_blog(&token, "TDD harms architecture", "Robert C. Martin", 0).await;
    app.create_blog(&token, "Type wars", "Robert C. Martin", 2).await;

    let response = app.get("/api/blogs/stats").await;

    assert_eq!(response.status, StatusCode::OK);
    let stats = response.json();
    assert_eq!(stats["total_likes"], 36);
    assert_eq!(stats["favorite_blog"]["title"], "Canonical string reduction");
    assert_eq!(
        stats["most_blogs"],
        json!({ "author": "Robert C. Martin", "blogs": 3 })
    );
    assert_eq!(
        stats["most_likes"],
        json!({ "author": "Edsger W. Dijkstra", "likes": 17 })
    );
}

#[tokio::test]
async fn test_stats_of_empty_store() {
    let app = common::TestApp::new();

    let stats = app.get("/api/blogs/stats").await.json();

    assert_eq!(stats["total_likes"], 0);
    assert!(stats["favorite_blog"].is_null());
    assert!(stats["most_blogs"].is_null());
    assert!(stats["most_likes"].is_null());
}

#[tokio::test]
async fn test_like_counts_above_limit_are_rejected() {
    let app = common::TestApp::new();
    let (_, token) = app.register_and_login().await;

    let response = app
        .post(
            "/api/blogs",
            json!({ "title": "Huge", "url": "http://huge.example.com", "likes": i64::MAX }),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"]["field"], "likes");

    let blog = app.create_blog(&token, "Modest", "Someone", 1).await;
    let update = app
        .put(
            &format!("/api/blogs/{}", blog["id"].as_str().unwrap()),
            json!({ "likes": i64::MAX }),
        )
        .await;
    assert_eq!(update.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_with_maximal_like_counts() {
    let app = common::TestApp::new();
    let (_, token) = app.register_and_login().await;
    app.create_blog(&token, "Popular", "Ada", MAX_LIKES).await;
    app.create_blog(&token, "Also popular", "Ada", MAX_LIKES).await;
    app.create_blog(&token, "Quiet", "Grace", 1).await;

    let response = app.get("/api/blogs/stats").await;

    assert_eq!(response.status, StatusCode::OK);
    let stats = response.json();
    assert_eq!(stats["total_likes"], 2 * MAX_LIKES + 1);
    assert_eq!(stats["most_likes"], json!({ "author": "Ada", "likes": 2 * MAX_LIKES }));
}

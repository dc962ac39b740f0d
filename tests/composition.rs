//! 组装后的完整服务：四个模块 + 全局中间件，基于内存 SQLite

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use mygram::bootstrap::{build_router, compose_modules};
use mygram::infrastructure::http::TokenCodec;
use mygram::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

async fn app() -> Router {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let registry = compose_modules(&pool).unwrap();
    let tokens = Arc::new(TokenCodec::new("integration-secret", 3600).unwrap());
    build_router(registry, tokens)
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    Reply {
        status,
        headers,
        body,
    }
}

async fn register_and_login(app: &Router, username: &str) -> String {
    let reply = send(
        app,
        Method::POST,
        "/users/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "secret123",
            "age": 21,
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);

    let reply = send(
        app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({
            "email": format!("{}@example.com", username),
            "password": "secret123",
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
    reply.body["data"]["token"].as_str().unwrap().to_string()
}

fn assert_cors(headers: &HeaderMap) {
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(headers.get("access-control-max-age").unwrap(), "86400");
    assert_eq!(
        headers.get("access-control-allow-methods").unwrap(),
        "POST, GET, PUT, DELETE, UPDATE"
    );
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization, X-Max"
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_user_registration_rules() {
    let app = app().await;
    register_and_login(&app, "alice").await;

    let duplicate = send(
        &app,
        Method::POST,
        "/users/register",
        None,
        Some(json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "secret123",
            "age": 30,
        })),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["errno"], 409);

    let too_young = send(
        &app,
        Method::POST,
        "/users/register",
        None,
        Some(json!({
            "username": "kid",
            "email": "kid@example.com",
            "password": "secret123",
            "age": 8,
        })),
    )
    .await;
    assert_eq!(too_young.status, StatusCode::BAD_REQUEST);

    let wrong_password = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "nope-nope" })),
    )
    .await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_photo_comment_flow_across_modules() {
    let app = app().await;
    let alice = register_and_login(&app, "alice").await;
    let bob = register_and_login(&app, "bob").await;

    let unauthenticated = send(&app, Method::GET, "/photos", None, None).await;
    assert_eq!(unauthenticated.status, StatusCode::UNAUTHORIZED);

    let photo = send(
        &app,
        Method::POST,
        "/photos",
        Some(&alice),
        Some(json!({
            "title": "Sunset",
            "caption": "at the beach",
            "photo_url": "https://example.com/sunset.jpg",
        })),
    )
    .await;
    assert_eq!(photo.status, StatusCode::CREATED, "{}", photo.body);
    let photo_id = photo.body["data"]["id"].as_str().unwrap().to_string();

    let listed = send(&app, Method::GET, "/photos", Some(&bob), None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"][0]["user"]["username"], "alice");

    let hijack = send(
        &app,
        Method::PUT,
        &format!("/photos/{}", photo_id),
        Some(&bob),
        Some(json!({ "title": "Mine", "photo_url": "https://example.com/x.jpg" })),
    )
    .await;
    assert_eq!(hijack.status, StatusCode::FORBIDDEN);

    let comment = send(
        &app,
        Method::POST,
        "/comments",
        Some(&bob),
        Some(json!({ "photo_id": photo_id, "message": "Beautiful" })),
    )
    .await;
    assert_eq!(comment.status, StatusCode::CREATED, "{}", comment.body);
    let comment_id = comment.body["data"]["id"].as_str().unwrap().to_string();

    let orphan = send(
        &app,
        Method::POST,
        "/comments",
        Some(&bob),
        Some(json!({
            "photo_id": uuid::Uuid::new_v4().to_string(),
            "message": "Hello?",
        })),
    )
    .await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);

    let filtered = send(
        &app,
        Method::GET,
        &format!("/comments?photo_id={}", photo_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(filtered.status, StatusCode::OK);
    assert_eq!(filtered.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(filtered.body["data"][0]["user"]["username"], "bob");

    // 照片所有者可以删除他人的评论
    let removed = send(
        &app,
        Method::DELETE,
        &format!("/comments/{}", comment_id),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(removed.status, StatusCode::OK, "{}", removed.body);

    let empty = send(&app, Method::GET, "/comments", Some(&alice), None).await;
    assert!(empty.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_social_media_listing_shape() {
    let app = app().await;
    let alice = register_and_login(&app, "alice").await;

    let created = send(
        &app,
        Method::POST,
        "/socialmedias",
        Some(&alice),
        Some(json!({ "name": "Instagram", "social_media_url": "https://instagram.com/alice" })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);

    let listed = send(&app, Method::GET, "/socialmedias", Some(&alice), None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let items = listed.body["data"]["social_medias"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Instagram");
    assert_eq!(items[0]["user"]["username"], "alice");
}

#[tokio::test]
async fn test_cors_headers_on_every_response() {
    let app = app().await;

    let preflight = send(&app, Method::OPTIONS, "/users/login", None, None).await;
    assert_eq!(preflight.status, StatusCode::OK);
    assert!(preflight.body.is_null());
    assert_cors(&preflight.headers);

    let missing = send(&app, Method::GET, "/nowhere", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["errno"], 404);
    assert_cors(&missing.headers);

    let rejected = send(&app, Method::GET, "/photos", None, None).await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert_cors(&rejected.headers);
}

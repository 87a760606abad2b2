//! HTTP Route Tests
//!
//! Drive the axum router directly with `tower::ServiceExt::oneshot` and check
//! that the envelopes come back as real HTTP responses.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use gallery_api::gallery::{GalleryHandler, InMemoryGalleryStore, ItemLayout};
use gallery_api::http_server::HttpServer;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(layout: ItemLayout) -> Router {
    let store = Arc::new(InMemoryGalleryStore::new(layout));
    HttpServer::build_router(GalleryHandler::new(store))
}

async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, String, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let origin = response
        .headers()
        .get("access-control-allow-origin")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, origin, value)
}

#[tokio::test]
async fn test_health() {
    let (status, _, body) = send(router(ItemLayout::Profile), "GET", "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_gallery_preflight() {
    let app = router(ItemLayout::Profile);
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/gallery")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(headers["access-control-max-age"], "86400");
}

#[tokio::test]
async fn test_gallery_create_view_delete() {
    let app = router(ItemLayout::Profile);

    let (status, origin, created) = send(
        app.clone(),
        "POST",
        "/gallery",
        r#"{"image_url": "https://cdn/a.jpg", "name": "Ada"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(origin, "*");
    assert_eq!(created, json!({"success": true, "id": 1}));

    let (status, _, views) = send(app.clone(), "GET", "/gallery?type=view&id=1", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(views, json!({"views": 1}));

    let (_, _, listing) = send(app.clone(), "GET", "/gallery", "").await;
    assert_eq!(listing["items"][0]["views"], 1);

    let (status, _, deleted) = send(app.clone(), "DELETE", "/gallery?id=1", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"success": true}));

    let (_, _, listing) = send(app, "GET", "/gallery", "").await;
    assert_eq!(listing, json!({"items": []}));
}

#[tokio::test]
async fn test_gallery_errors() {
    let app = router(ItemLayout::Profile);

    let (status, origin, body) = send(app.clone(), "DELETE", "/gallery", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(origin, "*");
    assert_eq!(body, json!({"error": "Missing id parameter"}));

    let (status, _, body) = send(app, "PATCH", "/gallery", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"error": "Method not allowed"}));
}

#[tokio::test]
async fn test_images_listing() {
    let (status, origin, body) = send(router(ItemLayout::Basic), "GET", "/images", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(origin, "*");

    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 3);
    for image in images {
        assert!(image["url"].as_str().unwrap().starts_with("https://"));
    }
}

#[tokio::test]
async fn test_images_rejects_post() {
    let (status, _, body) = send(router(ItemLayout::Basic), "POST", "/images", "{}").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"error": "Method not allowed"}));
}

/// POST raw bytes; returns status, CORS origin, content type and JSON body
async fn send_bytes(
    app: Router,
    uri: &str,
    bytes: Vec<u8>,
) -> (StatusCode, String, String, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(bytes))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default()
    };
    let origin = header("access-control-allow-origin");
    let content_type = header("content-type");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, origin, content_type, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_non_utf8_body_is_enveloped() {
    for uri in ["/gallery", "/images"] {
        let (status, origin, content_type, body) =
            send_bytes(router(ItemLayout::Profile), uri, vec![0xff, 0xfe, b'{', b'}']).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(origin, "*");
        assert_eq!(content_type, "application/json");
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_oversized_body_is_enveloped() {
    let oversized = vec![b' '; 3 * 1024 * 1024];
    let (status, origin, content_type, body) =
        send_bytes(router(ItemLayout::Profile), "/gallery", oversized).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(origin, "*");
    assert_eq!(content_type, "application/json");
    assert!(body["error"].is_string());
}

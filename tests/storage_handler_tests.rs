mod common;

use agency_site_api::{AppConfig, MockStorageService};
use axum::http::StatusCode;
use common::{TestApp, get, multipart, post, test_app, test_app_with};
use serde_json::json;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

async fn create_portfolio_item(app: &TestApp, token: &str) -> String {
    let (status, created) = app
        .send(post(
            "/api/portfolio",
            Some(token),
            json!({ "title": "Harbour Coffee", "description": "d", "category": "Web" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    created["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_portfolio_image_upload_sets_url() {
    let app = test_app();
    let token = app.admin_token().await;
    let id = create_portfolio_item(&app, &token).await;

    let (status, body) = app
        .send(multipart(
            &format!("/api/portfolio/{id}/image"),
            Some(&token),
            "image",
            "cover.png",
            "image/png",
            PNG_BYTES,
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let url = body["image"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:9000/mock-bucket/portfolio/"));
    assert!(url.ends_with(".png"));

    // The URL is persisted, not just echoed.
    let (_, fetched) = app.send(get(&format!("/api/portfolio/{id}"), None)).await;
    assert_eq!(fetched["image"], url);
    assert_eq!(fetched["title"], "Harbour Coffee");
}

#[tokio::test]
async fn test_team_and_testimonial_uploads_use_their_folders() {
    let app = test_app();
    let token = app.admin_token().await;

    let (_, member) = app
        .send(post(
            "/api/team",
            Some(&token),
            json!({ "name": "Omar", "role": "Founder" }),
        ))
        .await;
    let (status, body) = app
        .send(multipart(
            &format!("/api/team/{}/image", member["id"].as_str().unwrap()),
            Some(&token),
            "image",
            "omar.jpeg",
            "image/jpeg",
            PNG_BYTES,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["image"].as_str().unwrap().contains("/team/"));

    let (_, testimonial) = app
        .send(post(
            "/api/testimonials",
            Some(&token),
            json!({ "client_name": "Maya", "content": "Great" }),
        ))
        .await;
    let (status, body) = app
        .send(multipart(
            &format!("/api/testimonials/{}/image", testimonial["id"].as_str().unwrap()),
            Some(&token),
            "image",
            "maya.webp",
            "image/webp",
            PNG_BYTES,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["image"].as_str().unwrap().contains("/testimonials/"));
}

#[tokio::test]
async fn test_non_image_upload_is_400() {
    let app = test_app();
    let token = app.admin_token().await;
    let id = create_portfolio_item(&app, &token).await;

    let (status, body) = app
        .send(multipart(
            &format!("/api/portfolio/{id}/image"),
            Some(&token),
            "image",
            "notes.pdf",
            "application/pdf",
            b"%PDF-1.7",
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Only image files are allowed");
}

#[tokio::test]
async fn test_missing_image_field_is_400() {
    let app = test_app();
    let token = app.admin_token().await;
    let id = create_portfolio_item(&app, &token).await;

    let (status, body) = app
        .send(multipart(
            &format!("/api/portfolio/{id}/image"),
            Some(&token),
            "file",
            "cover.png",
            "image/png",
            PNG_BYTES,
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_to_unknown_item_is_404() {
    let app = test_app();
    let token = app.admin_token().await;

    let (status, body) = app
        .send(multipart(
            &format!("/api/portfolio/{}/image", uuid::Uuid::new_v4()),
            Some(&token),
            "image",
            "cover.png",
            "image/png",
            PNG_BYTES,
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Portfolio item not found");
}

#[tokio::test]
async fn test_upload_requires_admin() {
    let app = test_app();
    let token = app.user_token().await;

    let (status, _) = app
        .send(multipart(
            &format!("/api/portfolio/{}/image", uuid::Uuid::new_v4()),
            Some(&token),
            "image",
            "cover.png",
            "image/png",
            PNG_BYTES,
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_storage_failure_is_masked_500() {
    let app = test_app_with(MockStorageService::new_failing(), AppConfig::default());
    let token = app.admin_token().await;
    let id = create_portfolio_item(&app, &token).await;

    let (status, body) = app
        .send(multipart(
            &format!("/api/portfolio/{id}/image"),
            Some(&token),
            "image",
            "cover.png",
            "image/png",
            PNG_BYTES,
        ))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["msg"], "Server Error");

    // The item keeps its previous image.
    let (_, fetched) = app.send(get(&format!("/api/portfolio/{id}"), None)).await;
    assert_eq!(fetched["image"], "");
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let config = AppConfig {
        max_upload_bytes: 1024,
        ..AppConfig::default()
    };
    let app = test_app_with(MockStorageService::new(), config);
    let token = app.admin_token().await;
    let id = create_portfolio_item(&app, &token).await;

    let big = vec![0u8; 4096];
    let (status, _) = app
        .send(multipart(
            &format!("/api/portfolio/{id}/image"),
            Some(&token),
            "image",
            "huge.png",
            "image/png",
            &big,
        ))
        .await;
    assert!(status.is_client_error());
    assert_ne!(status, StatusCode::OK);
}

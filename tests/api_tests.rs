use agency_site_api::{
    AppConfig, AppState, InMemoryRepository, MockStorageService, create_router,
    config::AdminSeed,
    repository::RepositoryState,
    seed,
    storage::StorageState,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

/// Boots the full router on an ephemeral port, over an in-memory store with a seeded admin.
async fn spawn_app() -> TestApp {
    let repo = Arc::new(InMemoryRepository::new()) as RepositoryState;
    let storage = Arc::new(MockStorageService::new()) as StorageState;
    let config = AppConfig::default();

    seed::bootstrap_admin(
        repo.as_ref(),
        &AdminSeed {
            name: "Owner".to_string(),
            email: "owner@agency.test".to_string(),
            password: "changeme".to_string(),
        },
    )
    .await
    .expect("admin bootstrap");

    let router = create_router(AppState {
        repo,
        storage,
        config,
    });

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

async fn login(client: &reqwest::Client, app: &TestApp, email: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/api/users/login", app.address))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = spawn_app().await;
    let response = reqwest::get(format!("{}/api/portfolio", app.address))
        .await
        .expect("req fail");
    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = spawn_app().await;
    let response = reqwest::get(format!("{}/api-docs/openapi.json", app.address))
        .await
        .expect("req fail");
    assert!(response.status().is_success());
    let doc: Value = response.json().await.unwrap();
    assert!(doc["paths"]["/api/consultations/{id}/status"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer"].is_object());
}

#[tokio::test]
async fn test_seeded_admin_manages_content() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &app, "owner@agency.test", "changeme").await;

    // Create
    let response = client
        .post(format!("{}/api/portfolio", app.address))
        .bearer_auth(&token)
        .json(&json!({ "title": "Harbour Coffee", "description": "d", "category": "Web" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let created: Value = response.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    // Public read
    let listed: Value = reqwest::get(format!("{}/api/portfolio", app.address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Delete
    let response = client
        .delete(format!("{}/api/portfolio/{}", app.address, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = reqwest::get(format!("{}/api/portfolio/{}", app.address, id))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_visitor_journey() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // A visitor registers, then books a consultation without needing a token.
    let response = client
        .post(format!("{}/api/users/register", app.address))
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "s3cret-pw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let visitor_token = body["token"].as_str().unwrap().to_string();

    let response = client
        .post(format!("{}/api/consultations", app.address))
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "service": "Web Development",
            "message": "New storefront"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // The visitor cannot read the back office...
    let response = client
        .get(format!("{}/api/consultations", app.address))
        .bearer_auth(&visitor_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 403);

    // ...but the admin sees the request on the dashboard.
    let admin_token = login(&client, &app, "owner@agency.test", "changeme").await;
    let stats: Value = client
        .get(format!("{}/api/dashboard/stats", app.address))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["pending_consultations"], 1);
    assert_eq!(stats["users"], 2);
}

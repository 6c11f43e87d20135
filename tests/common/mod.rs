#![allow(dead_code)]

use agency_site_api::{
    AppConfig, AppState, InMemoryRepository, MockStorageService, create_router,
    auth,
    models::{Role, User},
    repository::{Repository, RepositoryState},
    storage::StorageState,
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const BOUNDARY: &str = "agency-test-boundary";

/// A router over a fresh in-memory store, plus handles to seed it directly.
pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemoryRepository>,
    pub config: AppConfig,
}

pub fn test_app() -> TestApp {
    test_app_with(MockStorageService::new(), AppConfig::default())
}

pub fn test_app_with(storage: MockStorageService, config: AppConfig) -> TestApp {
    let repo = Arc::new(InMemoryRepository::new());
    let state = AppState {
        repo: repo.clone() as RepositoryState,
        storage: Arc::new(storage) as StorageState,
        config: config.clone(),
    };
    TestApp {
        router: create_router(state),
        repo,
        config,
    }
}

impl TestApp {
    /// Inserts an account directly and returns it with a valid bearer token.
    /// The stored hash is a placeholder: use the register endpoint when login matters.
    pub async fn seed_user(&self, name: &str, email: &str, role: Role) -> (User, String) {
        let user = User::new(name.to_string(), email, "unused".to_string(), role, Utc::now());
        let user = self.repo.insert_user(user).await.unwrap();
        let token = auth::issue_token(&user, &self.config).unwrap();
        (user, token)
    }

    pub async fn admin_token(&self) -> String {
        self.seed_user("Admin", "admin@agency.test", Role::Admin).await.1
    }

    pub async fn user_token(&self) -> String {
        self.seed_user("Visitor", "visitor@agency.test", Role::User).await.1
    }

    /// Sends a request through the router and returns the status and parsed JSON body
    /// (`Value::Null` for an empty or non-JSON body).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, token, None)
}

pub fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request(Method::POST, uri, token, Some(body))
}

pub fn put(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request(Method::PUT, uri, token, Some(body))
}

pub fn patch(uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    request(Method::PATCH, uri, token, body)
}

pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::DELETE, uri, token, None)
}

/// A multipart body with a single file field.
pub fn multipart(
    uri: &str,
    token: Option<&str>,
    field: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

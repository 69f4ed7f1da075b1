// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use saferay_ops_api::MediaUrls;
use saferay_ops_persistence::{InMemoryBlobStore, SqlitePersistence};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const TEST_EMAIL: &str = "ren@saferay.test";
pub const TEST_PASSWORD: &str = "Kumamoto2024";
pub const TEST_MEDIA_BASE: &str = "https://media.saferay.test";

/// A router over fresh in-memory state with one operator, plus the blob
/// store behind it.
pub fn create_test_app() -> (Router, Arc<InMemoryBlobStore>) {
    let mut persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
    persistence
        .create_operator(TEST_EMAIL, TEST_PASSWORD)
        .expect("Failed to create test operator");

    let blobs: Arc<InMemoryBlobStore> = Arc::new(InMemoryBlobStore::new());
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        blobs: blobs.clone(),
        media_urls: MediaUrls::new(TEST_MEDIA_BASE),
    };
    (build_router(app_state), blobs)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }
}

/// Sends one request, authenticated with `token` as a cookie when given.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("sb-access-token={token}"));
    }
    let request: Request<Body> = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let headers: HeaderMap = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: body.to_vec(),
    }
}

/// Signs the test operator in and returns the session token.
pub async fn login(app: &Router) -> String {
    let response: TestResponse = send(
        app,
        "POST",
        "/login",
        None,
        Some(serde_json::json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()["session_token"]
        .as_str()
        .unwrap()
        .to_string()
}

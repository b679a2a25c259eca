//! Shared helpers for handler tests.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::news_client::fake::FakeNewsService;
use crate::routes::build_router;
use crate::state::AppState;

pub fn test_app() -> (Router, Arc<FakeNewsService>) {
    let fake = Arc::new(FakeNewsService::new());
    let state = AppState::new(fake.clone(), Config::default());
    (build_router(state), fake)
}

/// Sends one request and returns the status plus the JSON body
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

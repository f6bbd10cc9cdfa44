//! Shared helpers for console integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use strata_console::{ApiError, AppState, QueryApi, Shell};
use strata_core::ConsoleConfig;

/// Backend that answers with fixed results and counts calls.
pub struct FakeBackend {
    pub sql: Result<Value, ApiError>,
    pub status: Result<Value, ApiError>,
    pub sql_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new(sql: Result<Value, ApiError>, status: Result<Value, ApiError>) -> Self {
        Self {
            sql,
            status,
            sql_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_sql() -> Self {
        Self::new(Ok(Value::Array(vec![])), Ok(Value::Null))
    }

    pub fn without_sql() -> Self {
        Self::new(Err(method_not_allowed()), Ok(Value::Null))
    }

    pub fn broken() -> Self {
        Self::new(
            Err(method_not_allowed()),
            Err(ApiError::Transport("connection refused".to_string())),
        )
    }

    pub fn sql_calls(&self) -> usize {
        self.sql_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryApi for FakeBackend {
    async fn post_sql(&self, _query: &str) -> Result<Value, ApiError> {
        self.sql_calls.fetch_add(1, Ordering::SeqCst);
        self.sql.clone()
    }

    async fn get_status(&self) -> Result<Value, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status.clone()
    }
}

pub fn method_not_allowed() -> ApiError {
    ApiError::Status {
        status: 405,
        status_text: "Method Not Allowed".to_string(),
    }
}

pub fn state_with(backend: Arc<FakeBackend>, config: ConsoleConfig) -> AppState {
    AppState::new(Shell::with_api(config, backend))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location_header(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

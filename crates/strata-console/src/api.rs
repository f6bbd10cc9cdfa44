//! HTTP client for the data system.
//!
//! The shell only needs two calls: a query through the SQL endpoint and a
//! liveness check against the status endpoint. [`QueryApi`] is the seam the
//! probe depends on; [`HttpApi`] is the reqwest-backed implementation that
//! applies the configured base URL and custom header to every request.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Value, json};
use strata_core::ConsoleConfig;
use thiserror::Error;

use crate::error::ConsoleError;

/// SQL query endpoint on the router.
pub const SQL_ENDPOINT: &str = "/druid/v2/sql";

/// Basic status endpoint served by every process.
pub const STATUS_ENDPOINT: &str = "/status";

/// Failure of a single backend call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("{status} {status_text}")]
    Status { status: u16, status_text: String },

    /// No usable response (connect failure, timeout, broken body).
    #[error("request failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// True for exactly `405 Method Not Allowed`.
    pub fn is_method_not_allowed(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status: 405, status_text } if status_text == "Method Not Allowed"
        )
    }

    /// Status code of the response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }
}

/// Backend calls the console shell depends on.
#[async_trait]
pub trait QueryApi: Send + Sync {
    /// POST a SQL query to [`SQL_ENDPOINT`].
    async fn post_sql(&self, query: &str) -> Result<Value, ApiError>;

    /// GET [`STATUS_ENDPOINT`].
    async fn get_status(&self) -> Result<Value, ApiError>;
}

/// reqwest-backed [`QueryApi`].
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client from the shell construction options.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let mut headers = HeaderMap::new();
        if let Some((name, value)) = config.custom_header() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ConsoleError::InvalidConfig(format!("custom header name '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ConsoleError::InvalidConfig(format!("custom header value: {}", e)))?;
            headers.insert(name, value);
        }

        let base_url = config.resolved_base_url().to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ConsoleError::InvalidConfig(format!("base URL '{}': {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConsoleError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// The base URL all requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        // Plain-text bodies still count as a successful call.
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[async_trait]
impl QueryApi for HttpApi {
    async fn post_sql(&self, query: &str) -> Result<Value, ApiError> {
        tracing::debug!(url = %self.url(SQL_ENDPOINT), "POST sql");
        self.send(
            self.client
                .post(self.url(SQL_ENDPOINT))
                .json(&json!({ "query": query })),
        )
        .await
    }

    async fn get_status(&self) -> Result<Value, ApiError> {
        tracing::debug!(url = %self.url(STATUS_ENDPOINT), "GET status");
        self.send(self.client.get(self.url(STATUS_ENDPOINT))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_not_allowed_needs_status_and_text() {
        let err = ApiError::Status {
            status: 405,
            status_text: "Method Not Allowed".to_string(),
        };
        assert!(err.is_method_not_allowed());

        let wrong_text = ApiError::Status {
            status: 405,
            status_text: "Nope".to_string(),
        };
        assert!(!wrong_text.is_method_not_allowed());

        let other = ApiError::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert!(!other.is_method_not_allowed());
        assert!(!ApiError::Transport("refused".to_string()).is_method_not_allowed());
    }

    #[test]
    fn test_new_rejects_invalid_header_name() {
        let config = ConsoleConfig {
            custom_header_name: Some("bad header".to_string()),
            custom_header_value: Some("v".to_string()),
            ..Default::default()
        };
        assert!(matches!(HttpApi::new(&config), Err(ConsoleError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_uses_default_base_url() {
        let api = HttpApi::new(&ConsoleConfig::default()).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8888");
        assert_eq!(api.url(SQL_ENDPOINT), "http://localhost:8888/druid/v2/sql");
    }
}

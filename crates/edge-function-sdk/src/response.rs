//! HTTP Response representation for handlers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents an outgoing HTTP response.
///
/// # Quick Reference
///
/// | Method | Status | Use Case |
/// |--------|--------|----------|
/// | `text(status, body)` | any | Fixed greeting or failure body |
/// | `json(status, body)` | any | Structured body |
/// | `internal_error(msg)` | 500 | Transport failure |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Response body
    #[serde(default)]
    pub body: Option<String>,
}

impl Response {
    /// Create a new response with the given status code (no body).
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Create a JSON response with a custom status code.
    ///
    /// # Example
    /// ```ignore
    /// Response::json(500, json!({"error": "IPC error"}))
    /// ```
    pub fn json<T: Serialize>(status: u16, body: T) -> Self {
        Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_optional_body(serde_json::to_string(&body).ok())
    }

    /// Create a plain text response.
    ///
    /// # Example
    /// ```ignore
    /// Response::text(200, "Hello World!")
    /// Response::text(400, "request failed")
    /// ```
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_optional_body(Some(body.into()))
    }

    /// Create a 500 Internal Server Error response.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::json(500, serde_json::json!({"error": message.into()}))
    }

    /// Add a header to the response (builder pattern).
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    fn with_optional_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }

    /// The body as a string slice, if any.
    pub fn body_str(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

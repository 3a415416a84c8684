//! HTTP Request representation for handlers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents an incoming HTTP request as delivered by the gateway.
///
/// Maps are ordered so that serializing the same request twice always
/// yields the same text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: String,

    /// Request path (e.g., "/hello")
    pub path: String,

    /// Query parameters
    #[serde(default)]
    pub query: BTreeMap<String, String>,

    /// HTTP headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Request body
    #[serde(default)]
    pub body: Option<String>,

    /// Path parameters extracted from route (e.g., {id} -> "123")
    #[serde(default)]
    pub params: BTreeMap<String, String>,

    /// Client IP address
    #[serde(default)]
    pub client_ip: Option<String>,

    /// Request ID for tracing
    #[serde(default)]
    pub request_id: String,
}

impl Request {
    /// Create a request with the given method and path and nothing else.
    ///
    /// # Example
    /// ```ignore
    /// let req = Request::new("GET", "/hello").with_body("");
    /// ```
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a header (builder pattern).
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter (builder pattern).
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            path: "/".to_string(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: None,
            params: BTreeMap::new(),
            client_ip: None,
            request_id: String::new(),
        }
    }
}

//! Handler trait and the configurable greeting function
//!
//! A [`Function`] maps one request to one response and keeps nothing between
//! invocations. Each call writes a greeting line to the diagnostic log,
//! optionally the injected configuration, and the whole request serialized
//! as JSON. The serialized text only ever reaches the log.
//!
//! # Example
//!
//! ```ignore
//! use edge_function_sdk::prelude::*;
//!
//! let function = Function::new("hello_world", "Hello World!")
//!     .with_configuration(Arc::new(FunctionConfig::from_env()));
//!
//! let (response, failure) = invoke(&function, &Request::new("GET", "/hello"));
//! assert_eq!(response.status, 200);
//! assert!(failure.is_none());
//! ```

use std::sync::Arc;

use serde::Serialize;

use crate::config::Configuration;
use crate::{HandlerError, Request, Response};

/// Anything the invocation loop can dispatch a request to.
///
/// Implementations must be safe to call concurrently and hold no mutable
/// state across calls.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &Request) -> Result<Response, HandlerError>;
}

/// A handler variant that answers every request with a fixed greeting.
#[derive(Clone)]
pub struct Function {
    name: String,
    greeting: String,
    greeting_only: bool,
    configuration: Option<Arc<dyn Configuration>>,
}

impl Function {
    /// Create a function named `name` that answers `200 <greeting>`.
    ///
    /// `greeting` must not be empty: it is the response body.
    pub fn new(name: impl Into<String>, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        debug_assert!(!greeting.is_empty(), "greeting is the response body and must not be empty");

        Self {
            name: name.into(),
            greeting,
            greeting_only: false,
            configuration: None,
        }
    }

    /// Inject the configuration whose description is logged on every call.
    pub fn with_configuration(mut self, configuration: Arc<dyn Configuration>) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Log only the greeting: neither the configuration nor the request.
    pub fn greeting_only(mut self) -> Self {
        self.greeting_only = true;
        self
    }

    /// Run the function against any serializable request shape.
    ///
    /// Fails with [`HandlerError::DiagnosticSerialization`] only when the
    /// function is not greeting-only and `req` cannot be encoded as JSON.
    pub fn respond<R: Serialize + ?Sized>(&self, req: &R) -> Result<Response, HandlerError> {
        tracing::info!(function = %self.name, "{}", self.greeting);

        if self.greeting_only {
            return Ok(Response::text(200, self.greeting.as_str()));
        }

        if let Some(configuration) = &self.configuration {
            tracing::info!(function = %self.name, "{}", configuration.describe());
        }

        let serialized = serde_json::to_string(req)?;
        tracing::info!(function = %self.name, "{}", serialized);

        Ok(Response::text(200, self.greeting.as_str()))
    }
}

impl Handler for Function {
    fn handle(&self, req: &Request) -> Result<Response, HandlerError> {
        self.respond(req)
    }
}

/// Invoke `handler`, turning a failure into its well-formed response.
///
/// The error is handed back next to the response so the caller can report it.
pub fn invoke<H: Handler + ?Sized>(handler: &H, req: &Request) -> (Response, Option<HandlerError>) {
    match handler.handle(req) {
        Ok(response) => (response, None),
        Err(err) => (err.to_response(), Some(err)),
    }
}

//! Edge Function SDK - Types and utilities for writing gateway-invoked functions
//!
//! This crate provides the request/response envelope, the handler trait and
//! the stdin/stdout invocation loop that function binaries are built on.

pub mod request;
pub mod response;
pub mod handler;
pub mod config;
pub mod ipc;
pub mod error;
pub mod logging;

pub mod prelude {
    //! Common imports for edge function handlers
    pub use crate::request::Request;
    pub use crate::response::Response;
    pub use crate::handler::{invoke, Function, Handler};
    pub use crate::config::{Configuration, FunctionConfig};
    pub use crate::error::HandlerError;
    pub use crate::handler_loop;
    pub use std::sync::Arc;
}

// Re-export key types at crate root
pub use request::Request;
pub use response::Response;
pub use handler::{Function, Handler};
pub use error::HandlerError;

#[doc(hidden)]
pub use tracing;

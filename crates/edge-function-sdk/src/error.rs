//! Error types for edge function handlers

use thiserror::Error;

/// Body returned when the request could not be serialized for diagnostics.
pub const REQUEST_FAILED: &str = "request failed";

/// Errors that can occur while serving an invocation
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("IPC error: {0}")]
    IpcError(String),

    #[error("Diagnostic serialization error: {0}")]
    DiagnosticSerialization(#[from] serde_json::Error),
}

impl HandlerError {
    /// Convert the error to an HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::DiagnosticSerialization(_) => 400,
            HandlerError::IpcError(_) => 500,
        }
    }

    /// Convert to a Response
    pub fn to_response(&self) -> crate::Response {
        match self {
            HandlerError::DiagnosticSerialization(_) => {
                crate::Response::text(self.status_code(), REQUEST_FAILED)
            }
            HandlerError::IpcError(_) => crate::Response::internal_error(self.to_string()),
        }
    }
}

impl From<HandlerError> for crate::Response {
    fn from(err: HandlerError) -> Self {
        err.to_response()
    }
}

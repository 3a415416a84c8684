//! Function configuration
//!
//! Handlers receive their configuration at setup time as an
//! `Arc<dyn Configuration>` rather than reading globals, so tests can pass
//! a stub.

use std::env;

/// Default frame size cap for a single request payload (6 MiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 6 * 1024 * 1024;

/// Read-only auxiliary values a handler logs but never branches on.
pub trait Configuration: Send + Sync {
    /// One-line description of the configuration for the diagnostic log.
    fn describe(&self) -> String;
}

/// Function configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    /// Deployed function name
    pub name: String,

    /// Deployment stage (dev, staging, prod, ...)
    pub stage: String,

    /// Region the function runs in, when the platform provides one
    pub region: Option<String>,

    /// Largest request frame accepted on the invocation channel
    pub max_payload_bytes: usize,
}

impl FunctionConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            name: lookup("EDGE_FUNCTION_NAME").unwrap_or_else(|| "edge-function".to_string()),

            stage: lookup("EDGE_FUNCTION_STAGE").unwrap_or_else(|| "dev".to_string()),

            region: lookup("EDGE_FUNCTION_REGION"),

            max_payload_bytes: lookup("EDGE_FUNCTION_MAX_PAYLOAD_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_PAYLOAD_BYTES),
        }
    }
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Configuration for FunctionConfig {
    fn describe(&self) -> String {
        match &self.region {
            Some(region) => format!("function={} stage={} region={}", self.name, self.stage, region),
            None => format!("function={} stage={}", self.name, self.stage),
        }
    }
}

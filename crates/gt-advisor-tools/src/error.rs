//! Capability tool error types.
//!
//! Typed variants instead of error prose: the boundary's classifier maps
//! these directly to response statuses without sniffing message text.

use thiserror::Error;

/// Errors that can occur while executing a capability tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("no user data found for user ID '{0}'")]
    UserNotFound(String),

    #[error("no plant data found for plant ID '{0}'")]
    PlantNotFound(String),

    #[error("datastore access denied: {0}")]
    AccessDenied(String),

    #[error("datastore throttled: {0}")]
    Throttled(String),

    #[error("datastore rejected request: {0}")]
    Validation(String),

    #[error("weather forecast fetch failed: {0}")]
    Forecast(String),

    #[error("datastore error: {0}")]
    Store(String),

    #[error("{0}")]
    Other(String),
}

/// Convenience alias for capability tool results.
pub type ToolResult<T> = Result<T, ToolError>;

//! Classified error taxonomy shared by the classifier and the renders.

use serde::{Deserialize, Serialize};

/// The four failure kinds the boundary reports to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    InternalError,
    ServiceUnavailable,
}

impl ErrorKind {
    /// HTTP status this kind always maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalError => 500,
            Self::ServiceUnavailable => 503,
        }
    }

    /// Fixed status-code-to-label mapping used in gateway error bodies.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::InternalError => "Internal Server Error",
            Self::ServiceUnavailable => "Service Unavailable",
        }
    }
}

/// A failure after classification, ready to render.
///
/// Built only through [`ClassifiedError::new`], so `status_code` can
/// never disagree with `kind`. `message` is already summarized — raw
/// lookup/engine internals never reach this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub status_code: u16,
    pub kind: ErrorKind,
    pub message: String,
}

impl ClassifiedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status_code: kind.status_code(),
            kind,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

impl std::fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.label(), self.status_code, self.message)
    }
}

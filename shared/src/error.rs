//! Error types for the shared crate

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing price range tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Token has no `low-high` separator
    #[error("Missing range separator in {0:?}")]
    MissingSeparator(String),

    /// A bound is not a non-negative integer
    #[error("Invalid price bound {bound:?} in {token:?}")]
    InvalidBound { token: String, bound: String },

    /// Lower bound exceeds upper bound
    #[error("Inverted price range {0:?}")]
    Inverted(String),
}

/// Single field-level validation error reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Error body returned by the catalog API
///
/// ```json
/// { "message": "Server error", "errors": [{ "msg": "Invalid id", "path": "category" }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Decode an error body, falling back to the status reason phrase
    pub fn from_response_text(status: StatusCode, text: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(text) {
            Ok(body) => body,
            Err(_) if !text.trim().is_empty() => Self::new(text.trim()),
            Err(_) => Self::new(status.canonical_reason().unwrap_or("Unknown error")),
        }
    }

    /// Message plus any field errors, joined for display
    pub fn full_message(&self) -> String {
        if self.errors.is_empty() {
            return self.message.clone();
        }
        let details: Vec<&str> = self.errors.iter().map(|e| e.msg.as_str()).collect();
        format!("{}: {}", self.message, details.join("; "))
    }
}

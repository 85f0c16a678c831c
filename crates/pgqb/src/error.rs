//! Error types for pgqb
//!
//! ## Error classification
//!
//! `QbError` variants fall into two categories:
//!
//! **Input errors** — raised eagerly at the call site that introduced the
//! defect: [`InvalidIdentifier`](QbError::InvalidIdentifier),
//! [`InvalidString`](QbError::InvalidString),
//! [`UnsupportedValue`](QbError::UnsupportedValue),
//! [`MissingBind`](QbError::MissingBind), [`LexError`](QbError::LexError).
//!
//! **Builder-state errors** — surface from `to_sql` when a statement is
//! compiled in an invalid shape: [`QueryShape`](QbError::QueryShape).

use thiserror::Error;

/// Result type alias for pgqb operations
pub type QbResult<T> = Result<T, QbError>;

/// Error types for statement building and compilation.
///
/// There is no silent fallback and no partial output: every failure path
/// returns one of these variants.
#[derive(Debug, Error)]
pub enum QbError {
    /// NUL byte or otherwise disallowed content in an identifier.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// NUL byte in a string value.
    #[error("Invalid string value: {0}")]
    InvalidString(String),

    /// A host value with no SQL textual form (e.g. binary blobs).
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Placeholder refers past the end of the supplied value list.
    #[error("Missing bind value: {0}")]
    MissingBind(String),

    /// Unterminated string or identifier literal in a template.
    #[error("Lex error: {0}")]
    LexError(String),

    /// Statement compiled in an invalid shape (no rows, no assignments, ...).
    #[error("Invalid query shape: {0}")]
    QueryShape(String),
}

impl QbError {
    /// Create an invalid-identifier error.
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Create an invalid-string error.
    pub fn invalid_string(message: impl Into<String>) -> Self {
        Self::InvalidString(message.into())
    }

    /// Create an unsupported-value error.
    pub fn unsupported_value(message: impl Into<String>) -> Self {
        Self::UnsupportedValue(message.into())
    }

    /// Create a missing-bind error.
    pub fn missing_bind(message: impl Into<String>) -> Self {
        Self::MissingBind(message.into())
    }

    /// Create a lex error.
    pub fn lex(message: impl Into<String>) -> Self {
        Self::LexError(message.into())
    }

    /// Create a query-shape error.
    pub fn query_shape(message: impl Into<String>) -> Self {
        Self::QueryShape(message.into())
    }

    /// Returns `true` if this error came from malformed input values
    /// (as opposed to a malformed statement shape).
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::QueryShape(_))
    }

    /// Check if this is a query-shape error.
    pub fn is_query_shape(&self) -> bool {
        matches!(self, Self::QueryShape(_))
    }

    /// Check if this is a missing-bind error.
    pub fn is_missing_bind(&self) -> bool {
        matches!(self, Self::MissingBind(_))
    }

    /// Check if this is a lex error.
    pub fn is_lex_error(&self) -> bool {
        matches!(self, Self::LexError(_))
    }
}

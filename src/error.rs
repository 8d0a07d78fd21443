//! Error types for the encoder.

use thiserror::Error;

/// The main error type for encoding operations.
///
/// Translation failures are raised synchronously at the point of detection
/// and unwind to the top-level call with no local recovery; the dispatch
/// boundary in [`crate::service`] is the only place that intercepts them.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A node or clause kind for which no translation case exists yet.
    /// This is intentional, incremental coverage, not an oversight.
    #[error("No encoding implemented for {0}")]
    UnsupportedConstruct(&'static str),

    /// An operator token absent from the verb table.
    #[error("No support for operator {0}")]
    UnsupportedOperator(String),

    /// A structurally-unsupported but kind-matched shape.
    #[error("{0}")]
    MalformedQuery(String),

    /// Caller-boundary misuse (malformed outer request). Surfaced only at
    /// the dispatch boundary, never inside the translator.
    #[error("Invalid request: {0}")]
    InvalidUsage(String),
}

impl EncodeError {
    /// Create a malformed-query error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedQuery(message.into())
    }

    /// Create an unsupported-operator error.
    pub fn operator(token: impl Into<String>) -> Self {
        Self::UnsupportedOperator(token.into())
    }
}

/// Result type alias for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EncodeError::UnsupportedConstruct("case expression");
        assert_eq!(err.to_string(), "No encoding implemented for case expression");

        let err = EncodeError::operator("BETWEEN");
        assert_eq!(err.to_string(), "No support for operator BETWEEN");

        let err = EncodeError::malformed("operator chain arity mismatch");
        assert_eq!(err.to_string(), "operator chain arity mismatch");

        let err = EncodeError::InvalidUsage("expected a JSON object".into());
        assert_eq!(err.to_string(), "Invalid request: expected a JSON object");
    }
}

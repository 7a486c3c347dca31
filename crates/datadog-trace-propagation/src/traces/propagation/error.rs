//! Error types for trace context extraction.
//!
//! Extraction errors never reach callers of a propagator. They describe why a
//! header was rejected, are logged at debug level, and the propagator then
//! reports "no context", which callers turn into the root context.
//!
//! # Error Scenarios
//!
//! - **Missing fields**: `Root` or `Parent` absent from an X-Ray header
//! - **Malformed identifiers**: wrong length, non-hex characters, all zeros
//! - **Ambiguous sampling**: a `Sampled` value other than `0` or `1`
//! - **Version mismatches**: unsupported `traceparent` versions

use thiserror::Error;

/// Error during trace context extraction.
///
/// # Display Format
///
/// Errors are formatted as: `"Cannot {operation} from {propagator_name}, {message}"`
///
/// Example: `"Cannot extract from xray, invalid `Parent` found"`
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Cannot {} from {}, {}", operation, propagator_name, message)]
pub struct Error {
    /// Description of what went wrong.
    message: &'static str,
    /// Name of the propagator that rejected the carrier (`"xray"`, `"traceparent"`).
    propagator_name: &'static str,
    /// Operation that failed.
    operation: &'static str,
}

impl Error {
    /// Creates an extraction error.
    ///
    /// # Example
    ///
    /// ```
    /// use datadog_trace_propagation::traces::propagation::error::Error;
    ///
    /// let err = Error::extract("`Root` not found", "xray");
    /// assert_eq!(err.to_string(), "Cannot extract from xray, `Root` not found");
    /// ```
    #[must_use]
    pub fn extract(message: &'static str, propagator_name: &'static str) -> Self {
        Self {
            message,
            propagator_name,
            operation: "extract",
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }
}

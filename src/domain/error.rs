//! Error types for the notepane plugin.
//!
//! This module defines the centralized error type [`NotepaneError`] and a type alias
//! [`Result`] used across the crate. Remote failures are intentionally coarse: the
//! notes service is only ever observed as "request succeeded" or "request failed".

use thiserror::Error;

/// The main error type for notepane operations.
///
/// # Examples
///
/// ```
/// use notepane::domain::NotepaneError;
///
/// let err = NotepaneError::Request { status: 401, message: "unauthorized".to_string() };
/// assert_eq!(err.to_string(), "Request failed with status 401: unauthorized");
/// ```
#[derive(Debug, Error)]
pub enum NotepaneError {
    /// The notes service answered with a non-success status, or the transport failed.
    ///
    /// Zellij reports transport failures as a non-2xx status with the error text
    /// as body, so both cases share this variant.
    #[error("Request failed with status {status}: {message}")]
    Request {
        /// HTTP status code reported for the request.
        status: u16,
        /// Response body or transport error text.
        message: String,
    },

    /// A response body or request context could not be (de)serialized.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A view name did not match any menu entry.
    #[error("Unknown view: '{0}'")]
    UnknownView(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for notepane operations.
pub type Result<T> = std::result::Result<T, NotepaneError>;

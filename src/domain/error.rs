//! Error types for Hire Box.
//!
//! This module defines the centralized error type [`HireBoxError`] and a type alias
//! [`Result`] used throughout the crate. Most of these errors never reach the view
//! layer: the data gateway converts transport and decode failures into fallback
//! data, and collaborator failures are logged and swallowed by the runtime.

use thiserror::Error;

/// The main error type for Hire Box operations.
///
/// # Examples
///
/// ```
/// use hirebox::HireBoxError;
///
/// fn validate_url(url: &str) -> Result<(), HireBoxError> {
///     if url.is_empty() {
///         return Err(HireBoxError::Config("store_url is empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_url("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum HireBoxError {
    /// The request to the posting store could not be completed.
    ///
    /// Covers connection failures, timeouts, and non-success HTTP statuses.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered, but the body could not be turned into postings.
    ///
    /// Raised for malformed JSON and for records whose timestamp does not parse.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The background fetch worker could not deliver a response.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A best-effort collaborator (analytics, metadata, link opener) failed.
    #[error("Collaborator error: {0}")]
    Collaborator(String),
}

impl From<reqwest::Error> for HireBoxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HireBoxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for Hire Box operations.
pub type Result<T> = std::result::Result<T, HireBoxError>;

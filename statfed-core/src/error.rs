//! Error types for statfed-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
///
/// The taxonomy callers dispatch on is three classes: `InvalidArgument`,
/// `NotFound`, and everything else (Internal-class: `Storage`, `Codec`,
/// `Json`, `Internal`). User-facing translation happens above this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed key-collection shape or missing required call parameter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No data located for a token/date after merge and rank
    ///
    /// Distinct from "present but empty": a store row with an absent payload
    /// is skipped during fetch, not reported here.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing-store read failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Payload decompression failure
    #[error("Codec error: {0}")]
    Codec(String),

    /// JSON parsing error (serde_json)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transform callback or other internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a codec error
    pub fn codec(msg: impl Into<String>) -> Self {
        Error::Codec(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Check whether this is a `NotFound` error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

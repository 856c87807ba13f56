//! Error types for the catalog API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the product does not exist" from other failures. Every status error
//! carries the message the server put in its `detail` field, or the generic
//! fallback when there was none.

use thiserror::Error;

/// Shown when a failed response carries no usable `detail`.
pub const GENERIC_ERROR_MESSAGE: &str = "Algo deu errado";

/// Errors returned by `CatalogClient` parse methods and `Transport`s.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// User-facing text for this error.
    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound { message } | ApiError::Http { message, .. } => message,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Deserialization(err.to_string())
    }
}

//! Error types for the token-store and message boundaries.
//!
//! The color pipeline itself has no error type: every input is normalized.

use thiserror::Error;

/// Failures reported by a [`TokenStore`](crate::store::TokenStore).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    #[error("token not found: {0}")]
    TokenNotFound(String),

    #[error("write rejected for {path}: {reason}")]
    Rejected { path: String, reason: String },

    #[error("token store unavailable: {0}")]
    Unavailable(String),
}

/// Failures decoding an inbound message.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("message has no type")]
    MissingType,
}

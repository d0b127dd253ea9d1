//! Delivery-service clients and their error type.

pub mod fcm;

use thiserror::Error;

/// Errors surfaced by a delivery call.
///
/// The dispatcher does not recover from these; they propagate to the hosting
/// platform's invocation result so its retry policy can act on them.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The delivery service answered with a non-success status.
    #[error("delivery rejected: status {status}, body: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request never completed (connect failure, timeout, malformed
    /// response body).
    #[error("delivery transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

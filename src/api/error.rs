//! Client error types

use thiserror::Error;

/// Booking API client error
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected by the backend (4xx)
    #[error("Rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// Backend failure (5xx)
    #[error("Upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

use thiserror::Error;

/// Failure writing a store's collection back to its storage slot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write storage slot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize collection: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure of a server-backed resource call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connect, timeout, or body decode.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the session token. The pipeline has already
    /// cleared the session and routed the application to login.
    #[error("session expired")]
    Unauthorized,

    /// Any other non-2xx response, with the server-supplied message.
    #[error("server error: {status} - {message}")]
    Api { status: u16, message: String },
}

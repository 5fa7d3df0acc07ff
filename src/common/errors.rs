//! Crate-wide error types.

use thiserror::Error;

/// Error surfaced by a caller-supplied callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by observer, settle, and batch callbacks.
pub type CallbackResult = Result<(), CallbackError>;

/// Failures of the persisted snapshot store.
///
/// Corrupt content is deliberately not represented here: an unparseable
/// snapshot file reads as an empty store, never as an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures while fetching a raw payload from the remote source.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered with status {code}")]
    Status { code: u16 },
    #[error("retrieval unavailable: {0}")]
    Unavailable(String),
}

/// Failures while decoding a visualization query response.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("response wrapper not found")]
    MissingWrapper,
    #[error("malformed table json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while interpreting serialized date cells.
#[derive(Debug, Error)]
pub enum DateError {
    #[error("not a serialized date: {0:?}")]
    UnrecognizedFormat(String),
    #[error("date component out of range: {0}")]
    OutOfRange(String),
}

/// Errors escaping the synchronization engine.
///
/// Internal fetch and parse failures are absorbed into an `Unavailable`
/// outcome; only failures raised by caller-supplied callbacks on the
/// revalidation and settle paths travel upward.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("callback failed: {0}")]
    Callback(#[source] CallbackError),
}

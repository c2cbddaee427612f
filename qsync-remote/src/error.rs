//! Error types for qsync-remote.

use thiserror::Error;

/// All errors that can arise talking to the remote service or converting its
/// payloads.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service answered with a non-2xx status.
    #[error("{method} {url} failed: {code} {text}")]
    Status {
        method: &'static str,
        url: String,
        code: u16,
        text: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// An item timestamp is not valid ISO-8601.
    #[error("item '{id}' has an invalid {field} timestamp '{value}': {source}")]
    Timestamp {
        id: String,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// An operation needs an item id but the item has none.
    #[error("item has no id")]
    MissingId,
}

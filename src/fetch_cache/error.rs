use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error from the underlying HTTP transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum FetchCacheError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] TransportError),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("Server answered 304 Not Modified for {0} but no cached response exists")]
    UnexpectedNotModified(String),

    #[error("Response from {url} is missing the '{header}' header")]
    MissingHeader { url: String, header: &'static str },

    #[error("Response from {url} has an invalid '{header}' header: {value:?}")]
    InvalidHeader {
        url: String,
        header: &'static str,
        value: String,
    },

    #[error("No User-Agent header configured for {0}; met.no rejects anonymous requests")]
    MissingUserAgent(String),

    #[error("Failed to decode JSON object from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write cache file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode cache entry for '{0}'")]
    CacheEncode(PathBuf, #[source] serde_json::Error),
}

use crate::types::endpoint::Endpoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unexpected {endpoint} response layout")]
    Json {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid UTC timestamp '{value}'")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

//! Error types for feed access

use thiserror::Error;

/// The feed could not be reached or answered with something unusable
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to build feed client")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("{endpoint} returned a body that is not JSON")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// The snapshot was valid JSON but lacked fields the poll loop relies on
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is missing {field}")]
    MissingField { field: &'static str },

    #[error("event {index} could not be decoded")]
    InvalidEvent {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("event {index} ({name}) is missing {field}")]
    MalformedEvent {
        index: usize,
        name: String,
        field: &'static str,
    },
}

//! Error types for cue lookup and playback

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading the category/key to filename table
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to read cue table {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cue table {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors starting playback of a resolved clip
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to open clip {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode clip {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("audio thread has exited")]
    OutputClosed,
}

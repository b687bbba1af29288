//! Error types for coalfoot-fetch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("network error fetching '{url}': {message}")]
    Network { url: String, message: String },

    #[error("HTTP status {status} fetching '{url}'")]
    Status { url: String, status: u16 },

    #[error("filesystem error at '{path}': {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure happened on the wire rather than on local disk.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

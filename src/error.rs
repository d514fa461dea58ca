//error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A bundled illustration is missing from the local image directory.
    #[error("Local image {path:?} could not be read: {source}")]
    LocalImage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image cache error at {path:?}: {source}")]
    Cache {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to write {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid plan: {0}")]
    Validation(String),
}

/// Failure of a single remote fetch. Never fatal: the resolver turns it into
/// an empty image list.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

//! Error types for font provisioning.

use std::{io, path::PathBuf, result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("font file not found: {}", .0.display())]
    FontFileNotFound(PathBuf),

    #[error("font family '{0}' is not registered")]
    FamilyNotRegistered(String),

    #[error("invalid font archive URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("font archive URI '{0}' has no file name")]
    MissingFileName(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch {uri}: {source}")]
    Http {
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {uri}")]
    HttpStatus { status: reqwest::StatusCode, uri: String },

    #[error("failed to read zip archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FontError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = result::Result<T, FontError>;

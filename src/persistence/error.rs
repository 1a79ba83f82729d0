//! Persistence error type

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the persistence layer
///
/// `load` only ever surfaces `InvalidConfiguration`; everything else is
/// logged there and treated as "no saved state".
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save path {path} exists but is not a directory")]
    InvalidConfiguration { path: PathBuf },

    #[error("no save directory configured")]
    NoSaveDirectory,

    #[error("failed to create save directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode player state: {0}")]
    Encode(#[from] serde_yaml::Error),
}

impl PersistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistError::Io {
            path: path.into(),
            source,
        }
    }
}

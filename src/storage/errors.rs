use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Local cache I/O error at [{path}]: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("Local cache slot [{key}] holds invalid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error
    },
    #[error("Could not encode slot [{key}] as JSON: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error
    },
    #[error("Invalid slot name [{0}]")]
    InvalidKey(String)
}

impl CacheError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

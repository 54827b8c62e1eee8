// File: src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures at the I/O edges of the crate. The matching engine itself is total.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid pool file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] bincode::Error),
    #[error("failed to parse toml config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to persist snapshot: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl Error {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to load font {path:?}: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("failed to encode {path:?}: {reason}")]
    Image { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;

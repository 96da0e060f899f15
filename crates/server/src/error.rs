use std::path::PathBuf;

use thiserror::Error;

/// Errors from the artwork catalog scan
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read artwork directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the default-layout store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error during {operation} on {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed defaults file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize defaults: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

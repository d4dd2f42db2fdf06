use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write '{path}': {source}")]
    Write {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("failed to allocate a unique file in '{dir}': {source}")]
    Allocate {
        dir:    PathBuf,
        source: std::io::Error,
    },

    #[error("failed to keep '{path}': {source}")]
    Keep {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("failed to set permissions on '{path}': {source}")]
    Permissions {
        path:   PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

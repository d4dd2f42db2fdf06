use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot export '{key}': {reason}")]
    InvalidEntry { key: String, reason: &'static str },

    #[error("failed to write environment file '{path}': {source}")]
    EnvFile {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

//! Error types for wrapper generation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("wrapper program must not be empty")]
    EmptyProgram,

    #[error("wrapper target must not be empty")]
    EmptyTarget,

    #[error("failed to create linker wrapper: {0}")]
    Create(#[from] crossenv_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

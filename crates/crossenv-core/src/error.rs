use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid target '{0}': expected a non-empty value made of [A-Za-z0-9_.-]")]
    InvalidTarget(String),

    #[error("invalid compiler program '{0}': must be a non-empty single-line command name or path")]
    InvalidCompiler(String),

    #[error(
        "unsupported host '{0}': only Linux and macOS runners are supported, \
         other hosts use path conventions and environment-file semantics the \
         generated wrapper scripts cannot rely on"
    )]
    UnsupportedHost(String),

    #[error(
        "musl conflict for rust target '{target}': zig's bundled musl and Rust's \
         self-contained musl CRT objects both define process startup symbols \
         (_start, _start_c), so linking them together fails or misbehaves. \
         Either switch to the gnu ABI (e.g. '{gnu_alternative}') or build with \
         cargo-zigbuild, which reconciles the two runtimes. Set musl-policy to \
         'warn' or 'allow' to proceed anyway"
    )]
    MuslConflict {
        target:          String,
        gnu_alternative: String,
    },

    #[error(transparent)]
    Wrapper(#[from] crossenv_shim::Error),
}

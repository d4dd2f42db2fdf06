//! Linker wrappers for toolchains that take a single linker path.
//!
//! # Architecture
//!
//! Cargo's `CARGO_TARGET_<TRIPLE>_LINKER` names one executable; it cannot
//! carry `zig cc -target <t>`. A wrapper is a tiny `/bin/sh` script that
//! `exec`s the full command and forwards `"$@"`, so the command can be
//! referenced by one path.
//!
//! Every call creates a new file with an exclusive, randomly named create.
//! Two jobs sharing a temp directory and targeting the same triple still get
//! two different wrappers. Wrappers are never removed here.
//!
//! # Example
//!
//! ```
//! use crossenv_shim::{ForwardScript, LinkerWrapper};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let script = ForwardScript::new("zig").args(["cc", "-target", "aarch64-linux-gnu"]);
//! let wrapper = LinkerWrapper::generate(dir.path(), "aarch64-linux-gnu", &script).unwrap();
//!
//! assert!(wrapper.path().starts_with(dir.path()));
//! ```

pub use error::{Error, Result};
pub use script::{ForwardScript, quote};
pub use wrapper::LinkerWrapper;

mod error;
mod script;
mod wrapper;

//! Target normalization and cross-compilation environment synthesis.
//!
//! One target string (a zig triple, a Rust triple or an alias such as
//! `linux-arm64`) and a project type go in; an ordered
//! [`EnvironmentPatch`](crossenv_platform::EnvironmentPatch) for C/C++, Go
//! or Cargo builds comes out.
//!
//! # Architecture
//!
//! - `target` - validation, triple rewriting, aliases, Go platform pair
//! - `project` - explicit or marker-file based project type
//! - `musl` - the Rust/zig musl conflict gate
//! - `triple` - canonical target → Rust triple and Cargo variable names
//! - `driver` - compiler driver command strings
//! - `synth` - orchestration
//!
//! # Example
//!
//! ```
//! use crossenv_core::{Request, synthesize};
//! use crossenv_platform::ExecutionContext;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let ctx = ExecutionContext::new(dir.path()).host(crossenv_platform::OS::Linux);
//! let synthesis = synthesize(&ctx, &Request::new("linux-arm64").project("go")).unwrap();
//!
//! assert_eq!(synthesis.patch.get("GOARCH"), Some("arm64"));
//! ```

pub use diag::{Diagnostic, Severity};
pub use driver::Driver;
pub use error::{Error, Result};
pub use musl::{GateOutcome, MuslPolicy};
pub use project::{ProjectType, RequestedProject};
pub use synth::{Request, RustSetup, Synthesis, ensure_supported_host, synthesize, vars};
pub use target::{Alias, CanonicalTarget, GoArch, GoOs, Platform, TripleSuffix};
pub use triple::RustTriple;

mod diag;
mod driver;
mod error;
pub mod musl;
mod project;
mod synth;
pub mod target;
mod triple;

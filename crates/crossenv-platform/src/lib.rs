pub use context::ExecutionContext;
pub use env::{EnvironmentPatch, ExportDestination};
pub use error::{Error, Result};
pub use os::OS;

pub mod context;
pub mod env;
mod error;
pub mod os;

//! Filesystem primitives shared by the crossenv crates.
//!
//! - `permissions` - portable permission modes
//! - `unique` - exclusive creation of uniquely named files that outlive the process

pub use error::{Error, Result};
pub use permissions::PermissionMode;
pub use unique::{UniqueFileOptions, create_unique};

mod error;
pub mod permissions;
pub mod unique;

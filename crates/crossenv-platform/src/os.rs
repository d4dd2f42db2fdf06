//! Host operating system detection.

use std::fmt;

/// Operating system types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OS {
    Linux,
    Macos,
    Windows,
    Unknown(String),
}

impl OS {
    /// Detect the operating system this binary runs on.
    pub fn detect() -> Self { Self::from_name(std::env::consts::OS) }

    /// Map an OS name as reported by `std::env::consts::OS` or a CI runner
    /// (`RUNNER_OS`) onto a variant.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "linux" => OS::Linux,
            "macos" | "darwin" => OS::Macos,
            "windows" => OS::Windows,
            other => OS::Unknown(other.to_string()),
        }
    }

    /// Hosts crossenv can configure. Windows runners use a different path
    /// syntax and env-file semantics that the generated shell wrapper cannot
    /// rely on.
    pub fn is_supported(&self) -> bool { matches!(self, OS::Linux | OS::Macos) }
}

impl fmt::Display for OS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OS::Linux => f.write_str("linux"),
            OS::Macos => f.write_str("macos"),
            OS::Windows => f.write_str("windows"),
            OS::Unknown(name) => f.write_str(name),
        }
    }
}

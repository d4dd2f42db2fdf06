//! Project type resolution.

use crate::diag::Diagnostic;
use serde::Serialize;
use std::fmt;
use std::path::Path;

const RUST_MARKER: &str = "Cargo.toml";
const GO_MARKER: &str = "go.mod";

/// Build ecosystem whose variable conventions get configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Go,
    Rust,
    C,
    Custom,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Go => "go",
            ProjectType::Rust => "rust",
            ProjectType::C => "c",
            ProjectType::Custom => "custom",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Project type as given by the caller, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestedProject {
    #[default]
    Auto,
    Known(ProjectType),
    Unrecognized(String),
}

impl RequestedProject {
    /// Case-insensitive. An empty value means `auto`, which is what CI
    /// runners pass for an unset input.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => RequestedProject::Auto,
            "go" => RequestedProject::Known(ProjectType::Go),
            "rust" => RequestedProject::Known(ProjectType::Rust),
            "c" => RequestedProject::Known(ProjectType::C),
            "custom" => RequestedProject::Known(ProjectType::Custom),
            _ => RequestedProject::Unrecognized(s.to_string()),
        }
    }

    /// Resolve to a concrete type. `auto` looks for `Cargo.toml`, then
    /// `go.mod`, in `work_dir` and settles on `c` when neither exists.
    /// Unrecognized values become `custom` with a warning.
    pub fn resolve(&self, work_dir: &Path, diagnostics: &mut Vec<Diagnostic>) -> ProjectType {
        let resolved = match self {
            RequestedProject::Auto => detect(work_dir),
            RequestedProject::Known(project) => *project,
            RequestedProject::Unrecognized(value) => {
                diagnostics.push(Diagnostic::warning(format!(
                    "unrecognized project-type '{value}', treating it as 'custom' and exporting only \
                     the common compiler variables; set project-type to one of auto, go, rust, c or \
                     custom explicitly"
                )));
                ProjectType::Custom
            }
        };

        tracing::debug!(requested = ?self, resolved = %resolved, "resolved project type");
        resolved
    }
}

impl From<&str> for RequestedProject {
    fn from(s: &str) -> Self { Self::parse(s) }
}

fn detect(work_dir: &Path) -> ProjectType {
    if work_dir.join(RUST_MARKER).is_file() {
        ProjectType::Rust
    } else if work_dir.join(GO_MARKER).is_file() {
        ProjectType::Go
    } else {
        ProjectType::C
    }
}

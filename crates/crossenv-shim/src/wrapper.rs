use crate::error::{Error, Result};
use crate::script::ForwardScript;
use crossenv_fs::{PermissionMode, UniqueFileOptions};
use std::path::{Path, PathBuf};

const PREFIX: &str = "crossenv-cc-";
const SUFFIX: &str = ".sh";

/// A generated executable that forwards to a fixed linker command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkerWrapper {
    path:  PathBuf,
    label: String,
}

impl LinkerWrapper {
    /// Write `script` to a fresh, uniquely named executable under `dir`.
    ///
    /// `label` only shapes the file name (`crossenv-cc-<label>-XXXXXXXX.sh`)
    /// so the file is recognizable; uniqueness comes from exclusive creation,
    /// never from the label.
    pub fn generate(dir: impl AsRef<Path>, label: &str, script: &ForwardScript) -> Result<Self> {
        if script.program().is_empty() {
            return Err(Error::EmptyProgram);
        }
        if label.is_empty() {
            return Err(Error::EmptyTarget);
        }

        let options = UniqueFileOptions::new()
            .prefix(format!("{PREFIX}{}-", file_safe(label)))
            .suffix(SUFFIX)
            .permissions(PermissionMode::Executable)
            .sync(true);
        let path = crossenv_fs::create_unique(dir, script.render().as_bytes(), &options)?;

        tracing::info!(path = %path.display(), label, "generated linker wrapper");
        Ok(Self {
            path,
            label: label.to_string(),
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn label(&self) -> &str { &self.label }

    pub fn into_path(self) -> PathBuf { self.path }
}

fn file_safe(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '.' | '_' | '-' => c,
            _ => '_',
        })
        .collect()
}

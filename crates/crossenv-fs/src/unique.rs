use crate::{Error, PermissionMode, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

const RAND_BYTES: usize = 8;

#[derive(Clone, Debug)]
pub struct UniqueFileOptions {
    prefix:      String,
    suffix:      String,
    permissions: PermissionMode,
    sync:        bool,
}

impl Default for UniqueFileOptions {
    fn default() -> Self { Self::new() }
}

impl UniqueFileOptions {
    pub fn new() -> Self {
        Self {
            prefix:      ".crossenv-".to_string(),
            suffix:      String::new(),
            permissions: PermissionMode::Inherit,
            sync:        false,
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn permissions(mut self, permissions: PermissionMode) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

/// Create a new file under `dir` with a name nobody else holds, write
/// `content` to it and keep it on disk.
///
/// The name is `prefix + random + suffix` and the file is opened with
/// `O_EXCL`, so concurrent callers sharing `dir` (even with identical
/// prefixes) can never receive the same path. The file is not removed on
/// drop; its lifetime belongs to whoever owns `dir`.
pub fn create_unique(dir: impl AsRef<Path>, content: &[u8], options: &UniqueFileOptions) -> Result<PathBuf> {
    let dir = dir.as_ref();

    std::fs::create_dir_all(dir).map_err(|source| Error::Allocate {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut file = tempfile::Builder::new()
        .prefix(&options.prefix)
        .suffix(&options.suffix)
        .rand_bytes(RAND_BYTES)
        .tempfile_in(dir)
        .map_err(|source| Error::Allocate {
            dir: dir.to_path_buf(),
            source,
        })?;

    let path = file.path().to_path_buf();
    let write_err = |source| Error::Write {
        path: path.clone(),
        source,
    };

    file.write_all(content).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    if options.sync {
        file.as_file().sync_all().map_err(write_err)?;
    }

    options.permissions.apply_to_path(&path)?;

    let (_, path) = file.keep().map_err(|e| Error::Keep {
        path: path.clone(),
        source: e.error,
    })?;

    tracing::debug!(path = %path.display(), "created unique file");
    Ok(path)
}

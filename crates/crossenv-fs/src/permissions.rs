use crate::{Error, Result};
use std::path::Path;

/// Permission mode applied to a freshly created file.
///
/// Unix receives the mode bits verbatim. Windows only has a read-only
/// attribute, which is cleared for executables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionMode {
    /// Keep whatever the creating call produced.
    #[default]
    Inherit,
    /// `0o755`, what generated scripts need.
    Executable,
}

impl PermissionMode {
    pub fn to_unix_mode(self) -> Option<u32> {
        match self {
            Self::Inherit => None,
            Self::Executable => Some(0o755),
        }
    }

    /// Apply the mode to an existing path.
    pub fn apply_to_path(self, path: &Path) -> Result<()> {
        let Some(mode) = self.to_unix_mode() else {
            return Ok(());
        };

        let map_err = |source| Error::Permissions {
            path: path.to_path_buf(),
            source,
        };

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(map_err)?;
        }

        #[cfg(not(unix))]
        {
            let mut perms = std::fs::metadata(path).map_err(map_err)?.permissions();
            perms.set_readonly(mode & 0o222 == 0);
            std::fs::set_permissions(path, perms).map_err(map_err)?;
        }

        Ok(())
    }
}

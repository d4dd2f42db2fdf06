//! Environment patches and where they get exported.
//!
//! Computing the variables and applying them are separate steps: the core
//! builds an [`EnvironmentPatch`] without touching the process, and the
//! caller applies it exactly once to an [`ExportDestination`].

use crate::error::{Error, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Where a patch ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    /// A CI propagation file (`GITHUB_ENV`), one `KEY=VALUE` line per entry.
    File(PathBuf),
    /// The environment of the current process.
    Process,
}

/// Ordered set of variables. Setting a key that is already present replaces
/// its value in place, so every key occurs once and the last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentPatch {
    entries: Vec<(String, String)>,
}

impl EnvironmentPatch {
    pub fn new() -> Self { Self::default() }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool { self.get(key).is_some() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> { self.entries.iter().map(|(k, _)| k.as_str()) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Check every entry can be written as a single `KEY=VALUE` line.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in &self.entries {
            let reason = if key.is_empty() {
                Some("empty key")
            } else if key.contains('=') {
                Some("key contains '='")
            } else if key.contains(['\n', '\r', '\0']) || value.contains(['\n', '\r', '\0']) {
                Some("line breaks and NUL are not allowed")
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(Error::InvalidEntry {
                    key: key.escape_debug().to_string(),
                    reason,
                });
            }
        }
        Ok(())
    }

    /// Export every entry. Nothing is written when any entry is invalid.
    ///
    /// # Safety
    ///
    /// [`ExportDestination::Process`] goes through `env::set_var`, which is
    /// only safe in single-threaded programs. On multi-threaded programs,
    /// other threads may read/write the environment simultaneously through
    /// libc functions, causing undefined behavior. File export has no such
    /// restriction.
    pub fn apply(&self, destination: &ExportDestination) -> Result<()> {
        self.validate()?;

        match destination {
            ExportDestination::File(path) => {
                let mut buf = String::new();
                for (key, value) in self.iter() {
                    buf.push_str(key);
                    buf.push('=');
                    buf.push_str(value);
                    buf.push('\n');
                }

                let file_err = |source| Error::EnvFile {
                    path: path.clone(),
                    source,
                };
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(file_err)?;
                file.write_all(buf.as_bytes()).map_err(file_err)?;
                tracing::debug!(path = %path.display(), count = self.len(), "appended environment file");
            }
            ExportDestination::Process => {
                for (key, value) in self.iter() {
                    // SAFETY: Only safe in single-threaded programs, see the method docs.
                    unsafe { std::env::set_var(key, value) };
                }
                tracing::debug!(count = self.len(), "updated process environment");
            }
        }

        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentPatch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut patch = Self::new();
        for (k, v) in iter {
            patch.set(k, v);
        }
        patch
    }
}

impl Serialize for EnvironmentPatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

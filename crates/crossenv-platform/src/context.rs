//! Ambient inputs of a single invocation.

use crate::env::ExportDestination;
use crate::error::{Error, Result};
use crate::os::OS;
use std::env;
use std::path::{Path, PathBuf};

/// Everything crossenv reads from its surroundings, gathered up front so the
/// core never consults globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    host:     OS,
    env_file: Option<PathBuf>,
    temp_dir: PathBuf,
    work_dir: PathBuf,
}

impl ExecutionContext {
    /// Context for the given working directory on the current host, using the
    /// platform temp dir and exporting into the process.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            host:     OS::detect(),
            env_file: None,
            temp_dir: env::temp_dir(),
            work_dir: work_dir.into(),
        }
    }

    /// Read the context from the process environment.
    ///
    /// - `GITHUB_ENV`: propagation file, switches export to file mode
    /// - `RUNNER_TEMP`: CI scratch space, falls back to the platform temp dir
    pub fn from_env() -> Result<Self> {
        let work_dir = env::current_dir().map_err(Error::CurrentDir)?;
        let env_file = non_empty_var("GITHUB_ENV").map(PathBuf::from);
        let temp_dir = non_empty_var("RUNNER_TEMP")
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);

        Ok(Self::new(work_dir).env_file(env_file).temp_dir(temp_dir))
    }

    pub fn host(mut self, host: OS) -> Self {
        self.host = host;
        self
    }

    pub fn env_file(mut self, env_file: Option<PathBuf>) -> Self {
        self.env_file = env_file;
        self
    }

    pub fn temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    pub fn host_os(&self) -> &OS { &self.host }

    pub fn env_file_path(&self) -> Option<&Path> { self.env_file.as_deref() }

    pub fn temp_dir_path(&self) -> &Path { &self.temp_dir }

    pub fn work_dir(&self) -> &Path { &self.work_dir }

    /// The propagation file wins when present, otherwise the process itself.
    pub fn destination(&self) -> ExportDestination {
        match &self.env_file {
            Some(path) => ExportDestination::File(path.clone()),
            None => ExportDestination::Process,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> { env::var(key).ok().filter(|v| !v.is_empty()) }

//! Command strings for the multi-call compiler driver.

use crate::error::{Error, Result};
use crate::target::CanonicalTarget;
use crossenv_shim::ForwardScript;

/// The cross compiler every ecosystem is pointed at. `zig` by default; the
/// program can be a bare name resolved through `PATH` or an absolute path
/// handed over by the installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    program: String,
}

impl Default for Driver {
    fn default() -> Self {
        Self {
            program: Self::DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl Driver {
    pub const DEFAULT_PROGRAM: &'static str = "zig";

    pub fn new(program: impl Into<String>) -> Result<Self> {
        let program = program.into();
        if program.trim().is_empty() || program.contains(['\n', '\r', '\0']) {
            return Err(Error::InvalidCompiler(program.escape_debug().to_string()));
        }
        Ok(Self { program })
    }

    pub fn program(&self) -> &str { &self.program }

    pub fn cc(&self, target: &CanonicalTarget) -> String { format!("{} cc -target {target}", self.program) }

    pub fn cxx(&self, target: &CanonicalTarget) -> String { format!("{} c++ -target {target}", self.program) }

    pub fn ar(&self) -> String { format!("{} ar", self.program) }

    pub fn ranlib(&self) -> String { format!("{} ranlib", self.program) }

    /// `cc` bound to `target` as a forwarding script, for linker wrappers.
    pub fn cc_script(&self, target: &CanonicalTarget) -> ForwardScript {
        ForwardScript::new(&self.program).args(["cc", "-target", target.as_str()])
    }
}

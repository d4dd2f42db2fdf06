//! Environment synthesis: one request in, one patch out.

use crate::diag::Diagnostic;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::musl::{self, GateOutcome, MuslPolicy};
use crate::project::{ProjectType, RequestedProject};
use crate::target::CanonicalTarget;
use crate::triple::RustTriple;
use crossenv_platform::{EnvironmentPatch, ExecutionContext};
use crossenv_shim::LinkerWrapper;
use serde::Serialize;
use std::path::PathBuf;

/// Fixed variable names.
pub mod vars {
    pub const CC: &str = "CC";
    pub const CXX: &str = "CXX";
    pub const AR: &str = "AR";
    pub const RANLIB: &str = "RANLIB";
    pub const ZIG_TARGET: &str = "ZIG_TARGET";
    pub const CGO_ENABLED: &str = "CGO_ENABLED";
    pub const GOOS: &str = "GOOS";
    pub const GOARCH: &str = "GOARCH";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub target:      String,
    pub project:     RequestedProject,
    pub musl_policy: MuslPolicy,
    pub driver:      Driver,
}

impl Request {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target:      target.into(),
            project:     RequestedProject::Auto,
            musl_policy: MuslPolicy::Deny,
            driver:      Driver::default(),
        }
    }

    pub fn project(mut self, project: impl Into<RequestedProject>) -> Self {
        self.project = project.into();
        self
    }

    pub fn musl_policy(mut self, policy: impl Into<MuslPolicy>) -> Self {
        self.musl_policy = policy.into();
        self
    }

    pub fn driver(mut self, driver: Driver) -> Self {
        self.driver = driver;
        self
    }
}

/// Cargo configuration produced when the Rust branch proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RustSetup {
    pub triple:  RustTriple,
    pub wrapper: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct Synthesis {
    pub target:      CanonicalTarget,
    pub project:     ProjectType,
    pub rust:        Option<RustSetup>,
    pub patch:       EnvironmentPatch,
    pub diagnostics: Vec<Diagnostic>,
}

/// Compute the environment for `request`.
///
/// Nothing is exported here. The only side effect is the linker wrapper
/// written into the context's temp dir when a Rust project passes the musl
/// gate. Any error means no patch; apply it with
/// [`EnvironmentPatch::apply`] on success.
pub fn synthesize(ctx: &ExecutionContext, request: &Request) -> Result<Synthesis> {
    ensure_supported_host(ctx)?;

    let target = CanonicalTarget::parse(&request.target)?;
    let mut diagnostics = Vec::new();
    let project = request.project.resolve(ctx.work_dir(), &mut diagnostics);
    let driver = &request.driver;

    let mut patch = EnvironmentPatch::new();
    patch
        .set(vars::CC, driver.cc(&target))
        .set(vars::CXX, driver.cxx(&target))
        .set(vars::AR, driver.ar())
        .set(vars::RANLIB, driver.ranlib())
        .set(vars::ZIG_TARGET, target.as_str());

    let mut rust = None;
    match project {
        ProjectType::Go => {
            patch.set(vars::CGO_ENABLED, "1");
            match target.platform() {
                Some(platform) => {
                    patch
                        .set(vars::GOOS, platform.os.as_str())
                        .set(vars::GOARCH, platform.arch.as_str());
                }
                None => tracing::debug!(%target, "no GOOS/GOARCH derivable, leaving them unset"),
            }
        }
        ProjectType::C => {
            patch.set(vars::CGO_ENABLED, "0");
        }
        ProjectType::Rust => {
            if musl::evaluate(&target, &request.musl_policy, &mut diagnostics)? == GateOutcome::Proceed {
                let setup = configure_rust(ctx, driver, &target, &mut patch)?;
                rust = Some(setup);
            }
        }
        ProjectType::Custom => {}
    }

    tracing::info!(%target, %project, vars = patch.len(), "synthesized environment");
    Ok(Synthesis {
        target,
        project,
        rust,
        patch,
        diagnostics,
    })
}

/// Fails on any host other than Linux or macOS. Callers that do more than
/// synthesize (loading configuration, say) run this first so the host
/// verdict never depends on anything else.
pub fn ensure_supported_host(ctx: &ExecutionContext) -> Result<()> {
    let host = ctx.host_os();
    if !host.is_supported() {
        return Err(Error::UnsupportedHost(host.to_string()));
    }
    Ok(())
}

fn configure_rust(
    ctx: &ExecutionContext,
    driver: &Driver,
    target: &CanonicalTarget,
    patch: &mut EnvironmentPatch,
) -> Result<RustSetup> {
    let triple = RustTriple::from_canonical(target);
    let wrapper = LinkerWrapper::generate(ctx.temp_dir_path(), target.as_str(), &driver.cc_script(target))?;
    let wrapper = wrapper.into_path();

    patch
        .set(triple.linker_var(), wrapper.to_string_lossy())
        .set(triple.cc_var(), driver.cc(target))
        .set(triple.cxx_var(), driver.cxx(target))
        .set(triple.ar_var(), driver.ar());

    tracing::debug!(%triple, wrapper = %wrapper.display(), "configured cargo linker");
    Ok(RustSetup { triple, wrapper })
}

//! Guard for Rust builds against zig's musl.
//!
//! Rust's `*-linux-musl` targets link their own self-contained CRT objects;
//! zig links its bundled musl as well. Both define the process startup
//! symbols, so the combination fails to link or produces broken binaries.

use crate::diag::Diagnostic;
use crate::error::{Error, Result};
use crate::target::CanonicalTarget;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MuslPolicy {
    /// Abort the invocation.
    #[default]
    Deny,
    /// Warn and continue.
    Warn,
    /// Continue with a notice.
    Allow,
    /// Any other value; behaves like `Warn`.
    Unrecognized(String),
}

impl MuslPolicy {
    /// Case-insensitive; an empty value is the default `deny`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "deny" => MuslPolicy::Deny,
            "warn" => MuslPolicy::Warn,
            "allow" => MuslPolicy::Allow,
            _ => MuslPolicy::Unrecognized(s.to_string()),
        }
    }
}

impl From<&str> for MuslPolicy {
    fn from(s: &str) -> Self { Self::parse(s) }
}

impl fmt::Display for MuslPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MuslPolicy::Deny => f.write_str("deny"),
            MuslPolicy::Warn => f.write_str("warn"),
            MuslPolicy::Allow => f.write_str("allow"),
            MuslPolicy::Unrecognized(value) => f.write_str(value),
        }
    }
}

/// Non-aborting results of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Versioned target, Rust configuration is left out entirely.
    Skip,
    /// Configure Cargo.
    Proceed,
}

/// Decide whether Rust configuration happens for `target`.
///
/// Only called for Rust projects. The version check comes first: a
/// versioned target never reaches the musl check.
pub fn evaluate(
    target: &CanonicalTarget,
    policy: &MuslPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<GateOutcome> {
    if target.is_versioned() {
        diagnostics.push(Diagnostic::warning(format!(
            "skipping Rust configuration for versioned target '{target}': the version suffix \
             cannot be part of a valid CARGO_TARGET_<TRIPLE>_LINKER name. CC, CXX, AR and RANLIB \
             are still exported; configure the Cargo linker manually or use cargo-zigbuild"
        )));
        tracing::debug!(%target, "gate: skip versioned target");
        return Ok(GateOutcome::Skip);
    }

    if !target.is_musl() {
        return Ok(GateOutcome::Proceed);
    }

    let risk = format!(
        "zig's musl and Rust's self-contained musl CRT both define startup symbols; linking \
         '{target}' may fail with duplicate symbols"
    );

    match policy {
        MuslPolicy::Deny => {
            tracing::debug!(%target, "gate: deny musl target");
            return Err(Error::MuslConflict {
                target:          target.to_string(),
                gnu_alternative: target.gnu_alternative().unwrap_or_else(|| "<arch>-linux-gnu".to_string()),
            });
        }
        MuslPolicy::Warn => {
            diagnostics.push(Diagnostic::warning(format!("{risk} (musl-policy=warn)")));
        }
        MuslPolicy::Allow => {
            diagnostics.push(Diagnostic::notice(format!(
                "configuring musl target '{target}' for Rust (musl-policy=allow)"
            )));
        }
        MuslPolicy::Unrecognized(value) => {
            diagnostics.push(Diagnostic::warning(format!(
                "unrecognized musl-policy '{value}', expected deny, warn or allow; treating it as 'warn'"
            )));
            diagnostics.push(Diagnostic::warning(format!("{risk} (musl-policy=warn)")));
        }
    }

    tracing::debug!(%target, %policy, "gate: proceed with musl target");
    Ok(GateOutcome::Proceed)
}

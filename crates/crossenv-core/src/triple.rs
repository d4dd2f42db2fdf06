//! Canonical target → Rust target triple.

use crate::target::{CanonicalTarget, TripleSuffix};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RustTriple(String);

impl RustTriple {
    /// Already-Rust spellings are kept; otherwise exactly one zig OS suffix
    /// is rewritten. Targets with no known suffix pass through verbatim.
    pub fn from_canonical(target: &CanonicalTarget) -> Self {
        let s = target.as_str();
        if TripleSuffix::find_foreign(s).is_some() {
            return Self(s.to_string());
        }

        let triple = TripleSuffix::find_canonical(s)
            .and_then(|suffix| suffix.to_foreign(s))
            .unwrap_or_else(|| s.to_string());
        Self(triple)
    }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Hyphens replaced by underscores, the form cc-rs and Cargo use in
    /// variable names.
    pub fn sanitized(&self) -> String { self.0.replace('-', "_") }

    /// `CARGO_TARGET_<TRIPLE>_LINKER`
    pub fn linker_var(&self) -> String { format!("CARGO_TARGET_{}_LINKER", self.sanitized().to_uppercase()) }

    /// `CC_<triple>`
    pub fn cc_var(&self) -> String { format!("CC_{}", self.sanitized()) }

    /// `CXX_<triple>`
    pub fn cxx_var(&self) -> String { format!("CXX_{}", self.sanitized()) }

    /// `AR_<triple>`
    pub fn ar_var(&self) -> String { format!("AR_{}", self.sanitized()) }
}

impl fmt::Display for RustTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

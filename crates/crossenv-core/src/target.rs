//! Target normalization.
//!
//! A raw target goes through three steps:
//!
//! 1. validation against `[A-Za-z0-9_.-]+` (values end up inside generated
//!    shell scripts, nothing else may get through)
//! 2. rewriting a Rust-style triple suffix into zig's OS naming
//! 3. alias lookup
//!
//! Anything not recognized along the way is kept verbatim, so full zig
//! triples such as `riscv64-linux-musl` or `x86_64-linux-gnu.2.31` pass
//! through untouched.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

static TARGET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

/// The four Rust triple suffixes with a canonical zig spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleSuffix {
    UnknownLinuxMusl,
    UnknownLinuxGnu,
    AppleDarwin,
    PcWindowsGnu,
}

impl TripleSuffix {
    pub const ALL: [TripleSuffix; 4] = [
        TripleSuffix::UnknownLinuxMusl,
        TripleSuffix::UnknownLinuxGnu,
        TripleSuffix::AppleDarwin,
        TripleSuffix::PcWindowsGnu,
    ];

    /// Rust spelling.
    pub fn foreign(self) -> &'static str {
        match self {
            TripleSuffix::UnknownLinuxMusl => "unknown-linux-musl",
            TripleSuffix::UnknownLinuxGnu => "unknown-linux-gnu",
            TripleSuffix::AppleDarwin => "apple-darwin",
            TripleSuffix::PcWindowsGnu => "pc-windows-gnu",
        }
    }

    /// Zig spelling.
    pub fn canonical(self) -> &'static str {
        match self {
            TripleSuffix::UnknownLinuxMusl => "linux-musl",
            TripleSuffix::UnknownLinuxGnu => "linux-gnu",
            TripleSuffix::AppleDarwin => "macos",
            TripleSuffix::PcWindowsGnu => "windows-gnu",
        }
    }

    /// The suffix `target` ends with in Rust spelling, if any.
    pub fn find_foreign(target: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| suffix_at(split_version(target).0, s.foreign()).is_some())
    }

    /// The suffix `target` ends with in zig spelling, if any.
    pub fn find_canonical(target: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| suffix_at(split_version(target).0, s.canonical()).is_some())
    }

    /// Rust spelling → zig spelling.
    pub fn to_canonical(self, target: &str) -> Option<String> {
        replace_suffix(target, self.foreign(), self.canonical())
    }

    /// Zig spelling → Rust spelling.
    pub fn to_foreign(self, target: &str) -> Option<String> {
        replace_suffix(target, self.canonical(), self.foreign())
    }
}

/// Human shorthands accepted in place of a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alias {
    LinuxArm64,
    LinuxX64,
    MacosArm64,
    MacosX64,
    WindowsX64,
}

impl Alias {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linux-arm64" | "linux-aarch64" => Some(Alias::LinuxArm64),
            "linux-x64" | "linux-amd64" => Some(Alias::LinuxX64),
            "macos-arm64" | "darwin-arm64" => Some(Alias::MacosArm64),
            "macos-x64" | "darwin-amd64" => Some(Alias::MacosX64),
            "windows-x64" | "windows-amd64" => Some(Alias::WindowsX64),
            _ => None,
        }
    }

    pub fn canonical(self) -> &'static str {
        match self {
            Alias::LinuxArm64 => "aarch64-linux-musl",
            Alias::LinuxX64 => "x86_64-linux-musl",
            Alias::MacosArm64 => "aarch64-macos",
            Alias::MacosX64 => "x86_64-macos",
            Alias::WindowsX64 => "x86_64-windows-gnu",
        }
    }
}

/// `GOOS` values crossenv can derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoOs {
    Linux,
    Darwin,
    Windows,
}

impl GoOs {
    pub fn as_str(self) -> &'static str {
        match self {
            GoOs::Linux => "linux",
            GoOs::Darwin => "darwin",
            GoOs::Windows => "windows",
        }
    }
}

/// `GOARCH` values crossenv can derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoArch {
    Arm64,
    Amd64,
}

impl GoArch {
    pub fn as_str(self) -> &'static str {
        match self {
            GoArch::Arm64 => "arm64",
            GoArch::Amd64 => "amd64",
        }
    }
}

/// Best-effort OS/arch pair for Go. Only exists when both halves are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os:   GoOs,
    pub arch: GoArch,
}

/// Normalized target, `arch-os[-abi][.version]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalTarget(String);

impl CanonicalTarget {
    /// Validate and normalize a raw target.
    pub fn parse(raw: &str) -> Result<Self> {
        if !TARGET_REGEX.is_match(raw) {
            return Err(Error::InvalidTarget(raw.escape_debug().to_string()));
        }

        // A well-formed triple carries one suffix. Rewriting until nothing
        // matches keeps the result a fixed point for odd inputs too; every
        // rewrite shortens the string so this terminates.
        let mut current = raw.to_string();
        while let Some(rewritten) = TripleSuffix::find_foreign(&current).and_then(|s| s.to_canonical(&current)) {
            current = rewritten;
        }

        let canonical = match Alias::from_name(&current) {
            Some(alias) => alias.canonical().to_string(),
            None => current,
        };

        tracing::debug!(raw, canonical = %canonical, "normalized target");
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Target without the version suffix.
    pub fn base(&self) -> &str { split_version(&self.0).0 }

    pub fn is_versioned(&self) -> bool { self.0.contains('.') }

    /// Last segment of a three-part target (`musl` in `aarch64-linux-musl`).
    pub fn abi(&self) -> Option<&str> {
        let base = self.base();
        if base.split('-').count() < 3 {
            return None;
        }
        base.rsplit('-').next()
    }

    pub fn is_musl(&self) -> bool { self.abi().is_some_and(|abi| abi.starts_with("musl")) }

    /// The same target with its musl ABI swapped for gnu.
    pub fn gnu_alternative(&self) -> Option<String> {
        let abi = self.abi().filter(|abi| abi.starts_with("musl"))?;
        let base = self.base();
        let prefix = &base[..base.len() - abi.len()];
        Some(format!("{prefix}gnu{}", &abi["musl".len()..]))
    }

    pub fn platform(&self) -> Option<Platform> {
        let s = self.0.as_str();
        let os = if s.contains("linux") {
            GoOs::Linux
        } else if s.contains("macos") {
            GoOs::Darwin
        } else if s.contains("windows") {
            GoOs::Windows
        } else {
            return None;
        };
        let arch = if s.contains("aarch64") {
            GoArch::Arm64
        } else if s.contains("x86_64") {
            GoArch::Amd64
        } else {
            return None;
        };
        Some(Platform { os, arch })
    }
}

impl fmt::Display for CanonicalTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for CanonicalTarget {
    fn as_ref(&self) -> &str { &self.0 }
}

impl FromStr for CanonicalTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

fn split_version(target: &str) -> (&str, Option<&str>) {
    match target.split_once('.') {
        Some((base, version)) => (base, Some(version)),
        None => (target, None),
    }
}

/// Position of `pattern` when it forms the tail of `base`: it starts a
/// `-`-separated segment and nothing after it contains another `-`
/// (`linux-gnu` matches in `armv7-linux-gnueabihf`).
fn suffix_at(base: &str, pattern: &str) -> Option<usize> {
    base.match_indices(pattern)
        .map(|(idx, _)| idx)
        .find(|&idx| {
            let at_boundary = idx == 0 || base[..idx].ends_with('-');
            at_boundary && !base[idx + pattern.len()..].contains('-')
        })
}

fn replace_suffix(target: &str, from: &str, to: &str) -> Option<String> {
    let (base, version) = split_version(target);
    let idx = suffix_at(base, from)?;

    let mut out = String::with_capacity(target.len() + to.len());
    out.push_str(&base[..idx]);
    out.push_str(to);
    out.push_str(&base[idx + from.len()..]);
    if let Some(version) = version {
        out.push('.');
        out.push_str(version);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(raw: &str) -> String { CanonicalTarget::parse(raw).unwrap().as_str().to_string() }

    #[test]
    fn rejects_invalid_characters() {
        for raw in ["", "aarch64 linux", "x86_64;rm", "a$b", "linux/arm64", "tab\t", "ünï"] {
            assert!(
                matches!(CanonicalTarget::parse(raw), Err(Error::InvalidTarget(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn rewrites_rust_triples() {
        assert_eq!(canon("aarch64-unknown-linux-musl"), "aarch64-linux-musl");
        assert_eq!(canon("x86_64-unknown-linux-gnu"), "x86_64-linux-gnu");
        assert_eq!(canon("aarch64-apple-darwin"), "aarch64-macos");
        assert_eq!(canon("x86_64-pc-windows-gnu"), "x86_64-windows-gnu");
    }

    #[test]
    fn rewrite_keeps_abi_tail_and_version() {
        assert_eq!(canon("armv7-unknown-linux-gnueabihf"), "armv7-linux-gnueabihf");
        assert_eq!(canon("x86_64-unknown-linux-gnu.2.31"), "x86_64-linux-gnu.2.31");
    }

    #[test]
    fn resolves_aliases() {
        let cases = [
            ("linux-arm64", "aarch64-linux-musl"),
            ("linux-aarch64", "aarch64-linux-musl"),
            ("linux-x64", "x86_64-linux-musl"),
            ("linux-amd64", "x86_64-linux-musl"),
            ("macos-arm64", "aarch64-macos"),
            ("darwin-arm64", "aarch64-macos"),
            ("macos-x64", "x86_64-macos"),
            ("darwin-amd64", "x86_64-macos"),
            ("windows-x64", "x86_64-windows-gnu"),
            ("windows-amd64", "x86_64-windows-gnu"),
        ];
        for (raw, expected) in cases {
            assert_eq!(canon(raw), expected, "alias {raw}");
        }
    }

    #[test]
    fn unknown_targets_pass_through() {
        assert_eq!(canon("riscv64-linux-musl"), "riscv64-linux-musl");
        assert_eq!(canon("wasm32-wasi"), "wasm32-wasi");
        assert_eq!(canon("x86_64-linux-gnu.2.31"), "x86_64-linux-gnu.2.31");
    }

    #[test]
    fn suffix_must_end_the_triple() {
        assert_eq!(canon("apple-darwin-x64"), "apple-darwin-x64");
        assert_eq!(canon("x-unknown-linux-gnu-foo"), "x-unknown-linux-gnu-foo");
    }

    #[test]
    fn version_and_abi() {
        let t = CanonicalTarget::parse("x86_64-linux-gnu.2.31").unwrap();
        assert!(t.is_versioned());
        assert_eq!(t.base(), "x86_64-linux-gnu");
        assert_eq!(t.abi(), Some("gnu"));
        assert!(!t.is_musl());

        let t = CanonicalTarget::parse("aarch64-macos").unwrap();
        assert_eq!(t.abi(), None);
        assert!(!t.is_versioned());
    }

    #[test]
    fn musl_detection() {
        assert!(CanonicalTarget::parse("aarch64-linux-musl").unwrap().is_musl());
        assert!(CanonicalTarget::parse("arm-linux-musleabihf").unwrap().is_musl());
        assert!(CanonicalTarget::parse("linux-x64").unwrap().is_musl());
        assert!(!CanonicalTarget::parse("aarch64-linux-gnu").unwrap().is_musl());
        assert!(!CanonicalTarget::parse("aarch64-macos").unwrap().is_musl());
    }

    #[test]
    fn gnu_alternative() {
        let t = CanonicalTarget::parse("aarch64-linux-musl").unwrap();
        assert_eq!(t.gnu_alternative().as_deref(), Some("aarch64-linux-gnu"));

        let t = CanonicalTarget::parse("arm-linux-musleabihf").unwrap();
        assert_eq!(t.gnu_alternative().as_deref(), Some("arm-linux-gnueabihf"));

        let t = CanonicalTarget::parse("aarch64-linux-gnu").unwrap();
        assert_eq!(t.gnu_alternative(), None);
    }

    #[test]
    fn platform_heuristic() {
        let p = CanonicalTarget::parse("linux-arm64").unwrap().platform().unwrap();
        assert_eq!((p.os.as_str(), p.arch.as_str()), ("linux", "arm64"));

        let p = CanonicalTarget::parse("x86_64-apple-darwin").unwrap().platform().unwrap();
        assert_eq!((p.os.as_str(), p.arch.as_str()), ("darwin", "amd64"));

        let p = CanonicalTarget::parse("windows-x64").unwrap().platform().unwrap();
        assert_eq!((p.os.as_str(), p.arch.as_str()), ("windows", "amd64"));
    }

    #[test]
    fn platform_requires_both_halves() {
        assert_eq!(CanonicalTarget::parse("riscv64-linux-musl").unwrap().platform(), None);
        assert_eq!(CanonicalTarget::parse("aarch64-freestanding").unwrap().platform(), None);
    }

    #[test]
    fn triple_suffix_lookup() {
        assert_eq!(
            TripleSuffix::find_foreign("aarch64-unknown-linux-gnu"),
            Some(TripleSuffix::UnknownLinuxGnu)
        );
        assert_eq!(
            TripleSuffix::find_canonical("x86_64-windows-gnu"),
            Some(TripleSuffix::PcWindowsGnu)
        );
        assert_eq!(TripleSuffix::find_foreign("aarch64-linux-gnu"), None);
        assert_eq!(TripleSuffix::find_canonical("wasm32-wasi"), None);
    }

    #[test]
    fn from_str_and_display() {
        let t: CanonicalTarget = "linux-x64".parse().unwrap();
        assert_eq!(t.to_string(), "x86_64-linux-musl");
    }
}

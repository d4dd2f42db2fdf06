use crate::render::Format;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "crossenv", version, about = "Export a zig cross-compilation environment for one target")]
pub struct Args {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Configuration file [default: crossenv.toml in the working directory]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where the environment goes; `auto` picks github when GITHUB_ENV is set
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    pub format: Format,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Flags that override every configuration layer. Unset flags are skipped
/// when merged so lower layers show through.
#[derive(Debug, Default, Clone, clap::Args, Serialize)]
pub struct Inputs {
    /// Target triple or alias, e.g. aarch64-unknown-linux-gnu or linux-arm64
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// go, rust, c, custom or auto
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,

    /// deny, warn or allow
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub musl_policy: Option<String>,

    /// Compiler driver program
    #[arg(long, value_name = "PROG")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,
}

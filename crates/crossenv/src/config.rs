//! Layered configuration.
//!
//! Lowest to highest priority:
//!
//! 1. built-in defaults
//! 2. `crossenv.toml`
//! 3. GitHub Actions inputs (`INPUT_TARGET`, `INPUT_PROJECT-TYPE`, `INPUT_MUSL-POLICY`)
//! 4. `CROSSENV_*` variables
//! 5. command line flags

use crate::cli::Inputs;
use anyhow::{Context, bail};
use crossenv_core::{Driver, Request};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE: &str = "crossenv.toml";

const ACTION_INPUTS: [(&str, &str); 3] = [
    ("INPUT_TARGET", "target"),
    ("INPUT_PROJECT-TYPE", "project_type"),
    ("INPUT_MUSL-POLICY", "musl_policy"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target:       String,
    pub project_type: String,
    pub musl_policy:  String,
    pub compiler:     String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target:       String::new(),
            project_type: "auto".to_string(),
            musl_policy:  "deny".to_string(),
            compiler:     Driver::DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl Config {
    /// Relative paths resolve against `work_dir`. An explicit file must exist;
    /// the default one is optional.
    pub fn load(work_dir: &Path, explicit: Option<&Path>, inputs: &Inputs) -> anyhow::Result<Self> {
        let file = match explicit {
            Some(path) => {
                let path = work_dir.join(path);
                if !path.is_file() {
                    bail!("configuration file {} does not exist", path.display());
                }
                path
            }
            None => work_dir.join(DEFAULT_FILE),
        };

        let config: Config = Self::figment(file.clone(), inputs)
            .extract()
            .with_context(|| format!("invalid configuration (file: {})", file.display()))?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    pub fn figment(file: PathBuf, inputs: &Inputs) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(action_inputs())
            .merge(Env::prefixed("CROSSENV_"))
            .merge(Serialized::globals(inputs))
    }

    pub fn request(&self) -> crossenv_core::Result<Request> {
        Ok(Request::new(self.target.trim())
            .project(self.project_type.as_str())
            .musl_policy(self.musl_policy.as_str())
            .driver(Driver::new(self.compiler.trim())?))
    }
}

fn action_inputs() -> Env {
    Env::raw().filter_map(|key| {
        ACTION_INPUTS
            .iter()
            .find(|(input, _)| key.as_str().eq_ignore_ascii_case(input))
            .map(|(_, field)| (*field).into())
    })
}

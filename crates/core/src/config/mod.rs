//! Resolved tox configuration, as handed over by the host runner

mod settings;

pub use settings::{GITHUB_OUTPUT_VAR, Settings, TOX_SKIP_ENV_VAR};

use crate::error::{Error, Result};
use crate::version::DiscoveredVersion;
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// The parts of a resolved tox `Config` the export needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Environments tox would run, in order
    pub envlist: Vec<String>,

    /// Per-environment settings for every known environment
    pub envconfigs: HashMap<String, EnvConfig>,

    /// The basepython tox assigns when an environment doesn't request one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_basepython: Option<String>,
}

/// The parts of a tox `TestenvConfig` the export needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvConfig {
    pub basepython: String,

    /// Interpreter found for `basepython`, if any is installed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_info: Option<DiscoveredVersion>,

    #[serde(default)]
    pub ignore_outcome: bool,
}

/// One environment to turn into a matrix entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub name: String,
    pub basepython: String,
    pub discovered: Option<DiscoveredVersion>,
    pub ignore_outcome: bool,
}

impl HostConfig {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(host_error)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader).map_err(host_error)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Resolve the environments to export.
    ///
    /// `requested` (tox's `-e`) replaces `envlist` when given. Names without a
    /// matching config are dropped without error, as tox does for the matrix.
    pub fn environments(&self, requested: Option<&[String]>) -> Vec<Environment> {
        let names = requested.unwrap_or(self.envlist.as_slice());

        names
            .iter()
            .filter_map(|name| {
                let Some(env) = self.envconfigs.get(name) else {
                    tracing::debug!("Skipping unknown environment: {}", name);
                    return None;
                };
                Some(Environment {
                    name: name.clone(),
                    basepython: env.basepython.clone(),
                    discovered: env.python_info.clone(),
                    ignore_outcome: env.ignore_outcome,
                })
            })
            .collect()
    }
}

/// Split a tox `-e` value (`py38,py39`) into environment names
pub fn parse_envlist(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn host_error(err: serde_json::Error) -> Error {
    match err.classify() {
        // Well-formed JSON with the wrong shape means the host changed its model
        Category::Data => Error::IncompatibleHost(err.to_string()),
        Category::Syntax | Category::Eof => {
            Error::Parse(format!("Failed to parse host config: {err}"))
        }
        Category::Io => Error::SerializationError(err),
    }
}

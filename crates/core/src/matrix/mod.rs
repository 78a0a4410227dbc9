//! Workflow matrix construction
//!
//! Each tox environment becomes one matrix entry, in envlist order:
//!
//! ```json
//! {
//!   "name": "django32-py38",
//!   "factors": ["django32", "py38"],
//!   "python": {"version": "3.8", "spec": "3.8.0-alpha - 3.8", "installed": "3.8.10"},
//!   "ignore_outcome": true
//! }
//! ```

mod filter;

pub use filter::SkipPattern;

use crate::config::Environment;
use crate::error::Result;
use crate::version::{parse_specifier, specifier_to_version, version_to_prerelease_range};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Separator between the factors of an environment name
pub const FACTOR_SEPARATOR: char = '-';

/// One row of the exported workflow matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub name: String,

    /// `name` split on `-`, in order
    pub factors: Vec<String>,

    /// Runtime for setup-python; absent when the environment uses tox's default
    #[serde(rename = "python", default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeInfo>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignore_outcome: bool,
}

/// The `python` block of a matrix entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeInfo {
    /// `python-version` value, e.g. `3.10` or `pypy-3.8`
    pub version: String,

    /// `version` widened to include prereleases, e.g. `3.10.0-alpha - 3.10`
    pub spec: String,

    /// Version of a matching interpreter installed on this machine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed: Option<String>,
}

/// Split an environment name into its factors
pub fn split_factors(name: &str) -> Vec<String> {
    name.split(FACTOR_SEPARATOR).map(str::to_string).collect()
}

/// Builds matrix entries from resolved environments
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    host_default: Option<String>,
    skip: Option<SkipPattern>,
}

impl MatrixBuilder {
    /// `host_default` is the basepython tox uses for environments that don't
    /// name an interpreter; those get no `python` block. Without one, every
    /// environment's basepython must be an explicit specifier.
    pub fn new(host_default: Option<&str>) -> Self {
        Self {
            host_default: host_default.map(str::to_string),
            skip: None,
        }
    }

    pub fn with_skip_pattern(mut self, skip: Option<SkipPattern>) -> Self {
        self.skip = skip;
        self
    }

    /// Build one entry per environment, in order, leaving out skipped names.
    ///
    /// The first malformed basepython aborts the whole build.
    pub fn build(&self, environments: &[Environment]) -> Result<Vec<MatrixEntry>> {
        environments
            .iter()
            .filter(|env| !self.is_skipped(&env.name))
            .map(|env| self.entry(env))
            .collect()
    }

    fn is_skipped(&self, name: &str) -> bool {
        match &self.skip {
            Some(skip) if skip.skips(name) => {
                debug!("Skipping {} (matches '{}')", name, skip.as_str());
                true
            }
            _ => false,
        }
    }

    fn entry(&self, env: &Environment) -> Result<MatrixEntry> {
        let version = match &self.host_default {
            Some(host_default) => specifier_to_version(&env.basepython, host_default)?,
            None => parse_specifier(&env.basepython)?,
        };

        let runtime = (!version.is_empty()).then(|| RuntimeInfo {
            spec: version_to_prerelease_range(&version),
            installed: env.discovered.as_ref().map(|found| found.label()),
            version,
        });

        Ok(MatrixEntry {
            name: env.name.clone(),
            factors: split_factors(&env.name),
            runtime,
            ignore_outcome: env.ignore_outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::version::{DiscoveredVersion, VersionInfo};

    const HOST_DEFAULT: &str = "/usr/bin/python3";

    fn env(name: &str, basepython: &str) -> Environment {
        Environment {
            name: name.to_string(),
            basepython: basepython.to_string(),
            discovered: None,
            ignore_outcome: false,
        }
    }

    #[test]
    fn test_split_factors() {
        assert_eq!(split_factors("django32-py38"), ["django32", "py38"]);
        assert_eq!(split_factors("docs"), ["docs"]);
        assert_eq!(split_factors("py38-").join("-"), "py38-");
    }

    #[test]
    fn test_build_entries() {
        let envs = [
            env("django32-py38", "python3.8"),
            env("django32-py39", "python3.9"),
            env("docs", HOST_DEFAULT),
        ];

        let entries = MatrixBuilder::new(Some(HOST_DEFAULT)).build(&envs).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].factors, ["django32", "py38"]);
        assert_eq!(
            entries[0].runtime,
            Some(RuntimeInfo {
                version: "3.8".to_string(),
                spec: "3.8.0-alpha - 3.8".to_string(),
                installed: None,
            })
        );
        assert_eq!(entries[1].runtime.as_ref().unwrap().version, "3.9");
        assert_eq!(entries[2].runtime, None);
    }

    #[test]
    fn test_installed_versions() {
        let mut py35 = env("py35", "python3.5");
        py35.discovered = Some(DiscoveredVersion::new(
            "CPython",
            VersionInfo::final_release(3, 5, 6),
        ));
        let mut pypy38 = env("pypy38", "pypy3.8");
        pypy38.discovered = Some(
            DiscoveredVersion::new("PyPy", VersionInfo::final_release(3, 8, 0))
                .with_extra(VersionInfo::final_release(3, 7, 0)),
        );

        let entries = MatrixBuilder::new(Some(HOST_DEFAULT))
            .build(&[py35, pypy38])
            .unwrap();

        let py35 = entries[0].runtime.as_ref().unwrap();
        assert_eq!(py35.installed.as_deref(), Some("3.5.6"));

        let pypy38 = entries[1].runtime.as_ref().unwrap();
        assert_eq!(pypy38.version, "pypy-3.8");
        assert_eq!(pypy38.spec, "pypy-3.8");
        assert_eq!(pypy38.installed.as_deref(), Some("pypy-3.8.0-3.7.0"));
    }

    #[test]
    fn test_discovered_version_needs_runtime() {
        // A default-interpreter env never reports `installed`
        let mut docs = env("docs", HOST_DEFAULT);
        docs.discovered = Some(DiscoveredVersion::new(
            "CPython",
            VersionInfo::final_release(3, 11, 4),
        ));

        let entries = MatrixBuilder::new(Some(HOST_DEFAULT)).build(&[docs]).unwrap();
        assert_eq!(entries[0].runtime, None);
    }

    #[test]
    fn test_skip_pattern() {
        let envs = [
            env("py38-unix", "python3.8"),
            env("py38-win", "python3.8"),
            env("py39-mac", "python3.9"),
        ];
        let skip = SkipPattern::new(".*-(unix|mac)").unwrap();

        let entries = MatrixBuilder::new(Some(HOST_DEFAULT))
            .with_skip_pattern(Some(skip))
            .build(&envs)
            .unwrap();

        let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["py38-win"]);
    }

    #[test]
    fn test_invalid_basepython_aborts_build() {
        let envs = [env("py38", "python3.8"), env("custom", "/my/custom/python")];

        let err = MatrixBuilder::new(Some(HOST_DEFAULT)).build(&envs).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }

    #[test]
    fn test_skipped_envs_are_not_validated() {
        let envs = [env("custom", "/my/custom/python"), env("py38", "python3.8")];
        let skip = SkipPattern::new("custom").unwrap();

        let entries = MatrixBuilder::new(Some(HOST_DEFAULT))
            .with_skip_pattern(Some(skip))
            .build(&envs)
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_without_host_default() {
        let envs = [env("py38", "python3.8"), env("pypy3", "pypy3")];

        let entries = MatrixBuilder::new(None).build(&envs).unwrap();
        assert_eq!(entries[0].runtime.as_ref().unwrap().version, "3.8");
        assert_eq!(entries[1].runtime.as_ref().unwrap().version, "pypy-3");

        let err = MatrixBuilder::new(None)
            .build(&[env("docs", HOST_DEFAULT)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }

    #[test]
    fn test_serialized_shape() {
        let mut dev = env("dev", HOST_DEFAULT);
        dev.ignore_outcome = true;
        let envs = [env("py310", "python3.10"), dev];

        let entries = MatrixBuilder::new(Some(HOST_DEFAULT)).build(&envs).unwrap();
        let json = serde_json::to_string(&entries).unwrap();

        assert_eq!(
            json,
            r#"[{"name":"py310","factors":["py310"],"python":{"version":"3.10","spec":"3.10.0-alpha - 3.10"}},{"name":"dev","factors":["dev"],"ignore_outcome":true}]"#
        );
    }
}

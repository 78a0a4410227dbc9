//! Runtime version normalization
//!
//! Maps tox `basepython` specifiers to the `python-version` strings understood
//! by `actions/setup-python`, and formats discovered interpreter versions.

mod discovered;

pub use discovered::{DiscoveredVersion, VersionInfo};

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static SPECIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(python|pypy|jython)(\d+(?:\.\d+)?)?$").expect("Invalid regex pattern")
});
static MINOR_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(|pypy-|jython-)(\d+\.\d+)$").expect("Invalid regex pattern"));

/// Map a basepython specifier to a setup-python version string.
///
/// `host_default` is the specifier tox assigns when an environment doesn't ask
/// for anything more specific (the runner's own interpreter). It maps to an
/// empty string, meaning "no explicit version".
///
/// ```
/// use tox_gh_matrix_core::version::specifier_to_version;
///
/// assert_eq!(specifier_to_version("python3.10", "/usr/bin/python3").unwrap(), "3.10");
/// assert_eq!(specifier_to_version("pypy3.8", "/usr/bin/python3").unwrap(), "pypy-3.8");
/// ```
pub fn specifier_to_version(specifier: &str, host_default: &str) -> Result<String> {
    if specifier == host_default {
        return Ok(String::new());
    }
    parse_specifier(specifier)
}

/// Map an explicit basepython specifier (`python3.10`, `pypy3`, ...) to a
/// setup-python version string, with no host default to compare against.
pub fn parse_specifier(specifier: &str) -> Result<String> {
    let captures = SPECIFIER_PATTERN
        .captures(specifier)
        .ok_or_else(|| Error::InvalidFormat {
            specifier: specifier.to_string(),
        })?;

    let implementation = &captures[1];
    let version = captures.get(2).map_or("", |m| m.as_str());

    Ok(match (implementation, version) {
        ("python", version) => version.to_string(),
        (implementation, "") => implementation.to_string(),
        (implementation, version) => format!("{implementation}-{version}"),
    })
}

/// Expand an `N.M` version to a SemVer range that also matches its prereleases.
///
/// Only plain CPython `N.M` versions are expanded; there is no agreed range
/// syntax for pypy or jython, and `N` or `N.M.P` are passed through as-is.
pub fn version_to_prerelease_range(version: &str) -> String {
    match MINOR_VERSION_PATTERN.captures(version) {
        Some(captures) if captures[1].is_empty() => {
            let minor = &captures[2];
            format!("{minor}.0-alpha - {minor}")
        }
        _ => version.to_string(),
    }
}

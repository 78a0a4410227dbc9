use serde::{Deserialize, Serialize};
use std::fmt;

/// A `sys.version_info`-style version tuple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "(u32, u32, u32, String, u32)",
    into = "(u32, u32, u32, String, u32)"
)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    pub release_level: String,
    pub serial: u32,
}

impl VersionInfo {
    pub fn new(major: u32, minor: u32, micro: u32, release_level: &str, serial: u32) -> Self {
        Self {
            major,
            minor,
            micro,
            release_level: release_level.to_string(),
            serial,
        }
    }

    /// A final release with serial 0
    pub fn final_release(major: u32, minor: u32, micro: u32) -> Self {
        Self::new(major, minor, micro, "final", 0)
    }
}

impl From<(u32, u32, u32, String, u32)> for VersionInfo {
    fn from((major, minor, micro, release_level, serial): (u32, u32, u32, String, u32)) -> Self {
        Self {
            major,
            minor,
            micro,
            release_level,
            serial,
        }
    }
}

impl From<VersionInfo> for (u32, u32, u32, String, u32) {
    fn from(info: VersionInfo) -> Self {
        (
            info.major,
            info.minor,
            info.micro,
            info.release_level,
            info.serial,
        )
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if self.release_level != "final" || self.serial != 0 {
            write!(f, "-{}.{}", self.release_level, self.serial)?;
        }
        Ok(())
    }
}

/// An interpreter tox found on this machine for an environment's basepython
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredVersion {
    /// Implementation name as reported by the interpreter ("CPython", "PyPy", ...)
    pub implementation: String,
    pub version_info: VersionInfo,
    /// Language version emulated by alternate implementations (PyPy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_version_info: Option<VersionInfo>,
}

impl DiscoveredVersion {
    pub fn new(implementation: &str, version_info: VersionInfo) -> Self {
        Self {
            implementation: implementation.to_string(),
            version_info,
            extra_version_info: None,
        }
    }

    pub fn with_extra(mut self, extra_version_info: VersionInfo) -> Self {
        self.extra_version_info = Some(extra_version_info);
        self
    }

    /// Format as a setup-python style version, e.g. `3.11.0-alpha.0` or `pypy-3.8.6-3.7.0`
    pub fn label(&self) -> String {
        let mut label = self.version_info.to_string();
        if let Some(extra) = &self.extra_version_info {
            label = format!("{label}-{extra}");
        }

        let implementation = self.implementation.to_lowercase();
        if implementation != "cpython" {
            label = format!("{implementation}-{label}");
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_display() {
        assert_eq!(VersionInfo::final_release(2, 7, 12).to_string(), "2.7.12");
        assert_eq!(VersionInfo::new(3, 10, 4, "alpha", 0).to_string(), "3.10.4-alpha.0");
        assert_eq!(VersionInfo::new(3, 10, 4, "final", 3).to_string(), "3.10.4-final.3");
        assert_eq!(VersionInfo::final_release(3, 11, 0).to_string(), "3.11.0");
    }

    #[test]
    fn test_discovered_label() {
        let cpython = DiscoveredVersion::new("CPython", VersionInfo::final_release(2, 7, 12));
        assert_eq!(cpython.label(), "2.7.12");

        let alpha = DiscoveredVersion::new("CPython", VersionInfo::new(3, 11, 0, "alpha", 0));
        assert_eq!(alpha.label(), "3.11.0-alpha.0");

        let pypy = DiscoveredVersion::new("PyPy", VersionInfo::final_release(3, 8, 6))
            .with_extra(VersionInfo::final_release(3, 7, 0));
        assert_eq!(pypy.label(), "pypy-3.8.6-3.7.0");

        let jython = DiscoveredVersion::new("Jython", VersionInfo::final_release(3, 4, 8));
        assert_eq!(jython.label(), "jython-3.4.8");
    }

    #[test]
    fn test_implementation_is_case_insensitive() {
        let info = DiscoveredVersion::new("cpython", VersionInfo::final_release(3, 9, 1));
        assert_eq!(info.label(), "3.9.1");
    }

    #[test]
    fn test_deserialize_from_tuple() {
        let info: DiscoveredVersion = serde_json::from_str(
            r#"{
                "implementation": "PyPy",
                "version_info": [3, 8, 6, "final", 0],
                "extra_version_info": [3, 7, 0, "final", 0]
            }"#,
        )
        .unwrap();

        assert_eq!(info.version_info, VersionInfo::final_release(3, 8, 6));
        assert_eq!(info.label(), "pypy-3.8.6-3.7.0");
    }
}

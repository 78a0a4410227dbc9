use std::env;
use std::path::PathBuf;

/// Environment variable naming the workflow output file
pub const GITHUB_OUTPUT_VAR: &str = "GITHUB_OUTPUT";

/// Environment variable holding tox's environment skip pattern
pub const TOX_SKIP_ENV_VAR: &str = "TOX_SKIP_ENV";

/// Process settings the export reads from its environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Workflow output file (`GITHUB_OUTPUT`)
    pub github_output: Option<PathBuf>,
    /// Regular expression of environment names to leave out (`TOX_SKIP_ENV`)
    pub skip_env: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // GitHub treats an empty GITHUB_OUTPUT the same as an unset one
        let github_output = lookup(GITHUB_OUTPUT_VAR)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self {
            github_output,
            skip_env: lookup(TOX_SKIP_ENV_VAR),
        }
    }
}

//! Matrix export hook
//!
//! Runs after tox has resolved its configuration and before any test
//! environment is created. The caller exits once this returns.

use crate::config::{HostConfig, Settings};
use crate::error::Result;
use crate::matrix::{MatrixBuilder, MatrixEntry, SkipPattern};
use crate::output::{DelimiterSource, GithubOutput};
use std::io::Write;
use tracing::info;

/// Default workflow output name for `--gh-matrix`
pub const DEFAULT_OUTPUT_NAME: &str = "toxenvs";

/// What to export, mirroring the `--gh-matrix` and `--gh-matrix-dump` flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Workflow output variable to set
    pub gh_matrix: Option<String>,
    /// Print the matrix as formatted JSON
    pub dump: bool,
    /// Explicit environment selection (`-e`), replacing the configured envlist
    pub requested: Option<Vec<String>>,
    /// Overrides the host config's `default_basepython`
    pub host_default: Option<String>,
}

impl ExportOptions {
    pub fn is_requested(&self) -> bool {
        self.gh_matrix.is_some() || self.dump
    }
}

/// Result of running the export hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Neither output was requested; nothing was built or written
    Skipped,
    /// The matrix was built and written to every requested destination
    Exported(Vec<MatrixEntry>),
}

/// Build the matrix for `config` and write it where `options` asks.
///
/// The matrix is built and every destination resolved before anything is
/// written, so a failure never leaves partial output behind.
pub fn export<D: DelimiterSource>(
    config: &HostConfig,
    options: &ExportOptions,
    settings: &Settings,
    stdout: &mut dyn Write,
    delimiters: D,
) -> Result<ExportOutcome> {
    if !options.is_requested() {
        return Ok(ExportOutcome::Skipped);
    }

    let entries = build_matrix(config, options, settings)?;

    let target = match &options.gh_matrix {
        Some(name) => Some((
            name.as_str(),
            GithubOutput::from_settings_with(settings, delimiters)?,
            serde_json::to_string(&entries)?,
        )),
        None => None,
    };

    if options.dump {
        let formatted = serde_json::to_string_pretty(&entries)?;
        writeln!(stdout, "{formatted}")?;
    }

    if let Some((name, mut output, value)) = target {
        output.append(name, &value)?;
        info!(
            "Set workflow output '{}' to {} environments in {}",
            name,
            entries.len(),
            output.path().display()
        );
    }

    Ok(ExportOutcome::Exported(entries))
}

/// Build the matrix entries for `config` without writing them anywhere
pub fn build_matrix(
    config: &HostConfig,
    options: &ExportOptions,
    settings: &Settings,
) -> Result<Vec<MatrixEntry>> {
    let host_default = options
        .host_default
        .as_deref()
        .or(config.default_basepython.as_deref());

    let skip = settings
        .skip_env
        .as_deref()
        .map(SkipPattern::new)
        .transpose()?;

    let environments = config.environments(options.requested.as_deref());
    MatrixBuilder::new(host_default)
        .with_skip_pattern(skip)
        .build(&environments)
}

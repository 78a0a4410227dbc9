//! GitHub workflow output file support
//!
//! Workflow steps publish outputs by appending `name=value` lines to the file
//! named by `GITHUB_OUTPUT`. Values spanning several lines use the heredoc form
//! `name<<DELIM`, terminated by a line holding only `DELIM`.
//!
//! The file is append-only: records are never rewritten, and a name appended
//! twice yields two records (the runner resolves them last-wins).

mod delimiter;
mod parse;

pub use delimiter::{DelimiterSource, SequenceDelimiters, UuidDelimiters};
pub use parse::{OutputRecord, parse_records};

use crate::config::Settings;
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Encode a single output record.
///
/// Multi-line values take a fresh delimiter from `delimiters`. A value that
/// contains a line equal to that delimiter would make the record ambiguous;
/// random delimiters make that practically impossible, and it is not checked.
pub fn encode_record(name: &str, value: &str, delimiters: &mut dyn DelimiterSource) -> String {
    if value.contains('\n') {
        let delimiter = delimiters.next_delimiter();
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

/// Appends output parameters to a workflow output file
#[derive(Debug)]
pub struct GithubOutput<D: DelimiterSource = UuidDelimiters> {
    path: PathBuf,
    delimiters: D,
}

impl GithubOutput<UuidDelimiters> {
    /// Target the file configured in `settings`, with random delimiters
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::from_settings_with(settings, UuidDelimiters::new())
    }
}

impl<D: DelimiterSource> GithubOutput<D> {
    pub fn new(path: impl Into<PathBuf>, delimiters: D) -> Self {
        Self {
            path: path.into(),
            delimiters,
        }
    }

    /// Target the file configured in `settings`, failing if none is set
    pub fn from_settings_with(settings: &Settings, delimiters: D) -> Result<Self> {
        let path = settings.github_output.as_ref().ok_or_else(|| {
            Error::MissingTarget("GITHUB_OUTPUT environment variable not set".to_string())
        })?;
        Ok(Self::new(path, delimiters))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one output parameter
    pub fn append(&mut self, name: &str, value: &str) -> Result<()> {
        let encoded = encode_record(name, value, &mut self.delimiters);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(encoded.as_bytes())?;
        file.flush()?;

        debug!(
            "Appended output '{}' ({} bytes) to {}",
            name,
            encoded.len(),
            self.path.display()
        );
        Ok(())
    }
}

//! tox-gh-matrix - export tox environments as a GitHub Actions workflow matrix
//!
//! This crate provides functionality to:
//! - Normalize tox basepython specifiers into `actions/setup-python` versions
//! - Build one matrix entry per tox environment
//! - Append outputs to the workflow output file (`GITHUB_OUTPUT`)
pub mod config;
pub mod error;
pub mod export;
pub mod matrix;
pub mod output;
pub mod version;

// Re-export commonly used types
pub use error::{Error, Result};

pub use config::{EnvConfig, Environment, HostConfig, Settings};
pub use export::{DEFAULT_OUTPUT_NAME, ExportOptions, ExportOutcome, export};
pub use matrix::{MatrixBuilder, MatrixEntry, RuntimeInfo, SkipPattern};
pub use output::{DelimiterSource, GithubOutput, OutputRecord, UuidDelimiters, parse_records};
pub use version::{
    DiscoveredVersion, VersionInfo, parse_specifier, specifier_to_version, version_to_prerelease_range,
};

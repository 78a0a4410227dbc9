use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tox_gh_matrix_core::DEFAULT_OUTPUT_NAME;
use tox_gh_matrix_core::config::parse_envlist;
use tox_gh_matrix_core::export::ExportOptions;

use crate::commands::matrix_command;

#[derive(Parser, Debug)]
#[command(name = "tox-gh-matrix")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    \
    GITHUB_OUTPUT     Workflow output file written by --gh-matrix\n    \
    TOX_SKIP_ENV      Regular expression of environment names to leave out\n    \
    RUST_LOG=debug    Enable debug logging")]
#[command(group(
    ArgGroup::new("output")
        .required(true)
        .multiple(true)
        .args(["gh_matrix", "gh_matrix_dump"])
))]
pub struct Cli {
    /// Set GitHub workflow output VAR to the workflow matrix
    #[arg(
        long,
        value_name = "VAR",
        num_args = 0..=1,
        default_missing_value = DEFAULT_OUTPUT_NAME
    )]
    pub gh_matrix: Option<String>,

    /// Output the workflow matrix as formatted JSON
    #[arg(long)]
    pub gh_matrix_dump: bool,

    /// Resolved tox configuration as JSON ("-" reads stdin)
    #[arg(short, long, value_name = "PATH", default_value = "-")]
    pub config: PathBuf,

    /// Work on these environments instead of the envlist (comma separated)
    #[arg(short = 'e', long = "envlist", value_name = "ENVS")]
    pub envlist: Option<String>,

    /// Basepython tox uses for environments that don't request one
    #[arg(long, value_name = "BASEPYTHON")]
    pub host_default: Option<String>,
}

impl Cli {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            gh_matrix: self.gh_matrix.clone(),
            dump: self.gh_matrix_dump,
            requested: self.envlist.as_deref().map(parse_envlist),
            host_default: self.host_default.clone(),
        }
    }

    /// Execute the export
    pub fn execute(self) -> Result<()> {
        let options = self.export_options();
        matrix_command(&self.config, &options)
    }
}

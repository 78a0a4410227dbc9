use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

use tox_gh_matrix_core::export::{ExportOptions, ExportOutcome, export};
use tox_gh_matrix_core::{HostConfig, Settings, UuidDelimiters};

pub fn matrix_command(config_path: &Path, options: &ExportOptions) -> Result<()> {
    let config = load_host_config(config_path)?;
    let settings = Settings::from_env();
    debug!("Settings: {:?}", settings);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let outcome = export(&config, options, &settings, &mut stdout, UuidDelimiters::new())
        .context("Failed to export workflow matrix")?;
    stdout.flush()?;

    match outcome {
        ExportOutcome::Exported(entries) => {
            info!("Exported {} tox environments", entries.len());
        }
        ExportOutcome::Skipped => debug!("No matrix output requested"),
    }

    Ok(())
}

fn load_host_config(path: &Path) -> Result<HostConfig> {
    if path.as_os_str() == "-" {
        debug!("Reading host config from stdin");
        return HostConfig::from_reader(io::stdin().lock())
            .context("Failed to read host config from stdin");
    }

    debug!("Reading host config from {}", path.display());
    HostConfig::load_from_file(path)
        .with_context(|| format!("Failed to load host config from {}", path.display()))
}

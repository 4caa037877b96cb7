//! Implementation of the `stepwise init` command.
//!
//! Writes the default configuration as YAML so it can be edited. An existing
//! file is left alone unless `--force` is given.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::error::{Result, StepwiseError};
use crate::fs::atomic_write_file;
use std::path::{Path, PathBuf};

const CONFIG_HEADER: &str = "# stepwise configuration\n\
# Reference steps are 1-based: step N of a problem is read from\n\
# <reference_dir>/<problem_id>.<N>.txt instead of being generated.\n";

/// Execute the `stepwise init` command.
pub fn cmd_init(config_path: &Path, args: InitArgs) -> Result<()> {
    let path = write_default_config(config_path, args.force)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Write the default configuration to `path`.
///
/// # Errors
///
/// * `StepwiseError::UserError` - the file exists and `force` is not set, or
///   the write fails
pub fn write_default_config(path: &Path, force: bool) -> Result<PathBuf> {
    if path.exists() && !force {
        return Err(StepwiseError::UserError(format!(
            "config file '{}' already exists.\n\n\
             Pass --force to overwrite it.",
            path.display()
        )));
    }

    let yaml = Config::default().to_yaml()?;
    atomic_write_file(path, &format!("{}{}", CONFIG_HEADER, yaml))?;
    tracing::info!(path = %path.display(), "wrote default configuration");
    Ok(path.to_path_buf())
}

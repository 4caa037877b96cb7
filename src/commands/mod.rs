//! Command implementations for stepwise.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command starts from the configuration file named
//! by `--config` (defaults when it is missing) and applies its flags on top.

mod init;
mod prompt;
mod run;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::Result;
use std::path::Path;

pub use init::write_default_config;
pub use prompt::render_step_prompt;
pub use run::run_task;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init(args) => init::cmd_init(&cli.config, args),
        Command::Run(args) => run::cmd_run(&cli.config, args),
        Command::Prompt(args) => prompt::cmd_prompt(&cli.config, args),
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path)?;
    tracing::debug!(
        config = %path.display(),
        dataset = %config.dataset_path,
        temp_dir = %config.temp_dir,
        "configuration loaded"
    );
    Ok(config)
}

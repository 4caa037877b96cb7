//! CLI argument parsing for stepwise.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// Stepwise: multi-step prompt assembly for scientific code generation.
///
/// Each problem is split into ordered sub-steps. The prompt for a step
/// carries the descriptions and code of every earlier step, and each
/// step's response is written out as a runnable Python file.
#[derive(Parser, Debug)]
#[command(name = "stepwise")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file. Defaults apply when it does not exist.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for stepwise.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the default configuration file.
    Init(InitArgs),

    /// Run the benchmark task over the dataset.
    ///
    /// Every sub-step of every selected problem is prompted, answered by the
    /// stand-in generator and recorded. Prints a summary and writes an eval
    /// report under the temp directory.
    Run(RunArgs),

    /// Render the prompt for a single step and print it.
    ///
    /// Earlier steps are loaded from previously generated files or from the
    /// bundled reference files.
    Prompt(PromptArgs),
}

/// Arguments for the `init` command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Dataset file (overrides `dataset_path`).
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Include step background text in prompts.
    #[arg(long)]
    pub with_background: bool,

    /// Process at most this many samples.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Only process these problem ids (repeatable).
    #[arg(long = "sample-id")]
    pub sample_ids: Vec<String>,

    /// Do not write rendered prompts to disk.
    #[arg(long)]
    pub no_save: bool,

    /// Record failing samples and keep going instead of aborting.
    #[arg(long)]
    pub continue_on_error: bool,
}

/// Arguments for the `prompt` command.
#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Problem id as it appears in the dataset.
    pub problem_id: String,

    /// Step number (1-based).
    pub step: usize,

    /// Dataset file (overrides `dataset_path`).
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Include step background text in the prompt.
    #[arg(long)]
    pub with_background: bool,

    /// Do not write the rendered prompt to disk.
    #[arg(long)]
    pub no_save: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

//! Implementation of the `stepwise prompt` command.
//!
//! Renders the prompt for one step of one problem, the way the run would
//! produce it. Earlier steps are loaded from disk, so they must already have
//! been generated (or be reference steps with a bundled file).

use super::load_config;
use crate::cli::PromptArgs;
use crate::config::Config;
use crate::error::{Result, StepwiseError};
use crate::events::EventLog;
use crate::harness::Dataset;
use crate::prompt::{PreparedPrompt, PromptAssembler};
use crate::steps::StepAccumulator;
use std::path::Path;

/// Execute the `stepwise prompt` command.
pub fn cmd_prompt(config_path: &Path, args: PromptArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(dataset) = &args.dataset {
        config.dataset_path = dataset.to_string_lossy().to_string();
    }
    if args.with_background {
        config.with_background = true;
    }
    if args.no_save {
        config.save_prompts = false;
    }

    let prepared = render_step_prompt(&config, &args.problem_id, args.step)?;
    print!("{}", prepared.prompt);
    Ok(())
}

/// Prepare the prompt for `step` of `problem_id` with a fresh accumulator.
///
/// # Errors
///
/// * `StepwiseError::DatasetError` - the problem is not in the dataset
/// * `StepwiseError::StepOrder` - an earlier step has no file on disk
pub fn render_step_prompt(config: &Config, problem_id: &str, step: usize) -> Result<PreparedPrompt> {
    let dataset = Dataset::from_json(&config.dataset_path)?;
    let sample = dataset.get(problem_id).ok_or_else(|| {
        StepwiseError::DatasetError(format!(
            "problem '{}' not found in '{}'",
            problem_id, config.dataset_path
        ))
    })?;

    let assembler = PromptAssembler::from_config(config, EventLog::at(config.events_path()))?;
    let mut acc = StepAccumulator::default();
    assembler.prepare_prompt(&sample.metadata, step, &mut acc)
}

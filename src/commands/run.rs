//! Implementation of the `stepwise run` command.
//!
//! Loads the dataset, runs the benchmark task with the stand-in generator,
//! writes the eval report and prints a short summary.

use super::load_config;
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::events::EventLog;
use crate::harness::{Dataset, DummyGenerator, EvalReport, RunOptions, dummy_task};
use std::path::{Path, PathBuf};

/// Execute the `stepwise run` command.
pub fn cmd_run(config_path: &Path, args: RunArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, &args);

    let (report, report_path) = run_task(&config, &args.sample_ids, args.limit)?;
    print_summary(&report, &report_path);
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(dataset) = &args.dataset {
        config.dataset_path = dataset.to_string_lossy().to_string();
    }
    if args.with_background {
        config.with_background = true;
    }
    if args.no_save {
        config.save_prompts = false;
    }
    if args.continue_on_error {
        config.fail_on_error = false;
    }
}

/// Run the configured task over the selected samples and write its report.
///
/// Returns the report and the path it was written to.
pub fn run_task(
    config: &Config,
    sample_ids: &[String],
    limit: Option<usize>,
) -> Result<(EvalReport, PathBuf)> {
    let dataset = Dataset::from_json(&config.dataset_path)?
        .select(sample_ids)?
        .limit(limit);
    let events = EventLog::at(config.events_path());

    tracing::info!(
        task = %config.task_name,
        dataset = %dataset.name(),
        samples = dataset.len(),
        with_background = config.with_background,
        "starting run"
    );

    let task = dummy_task(config, dataset, events.clone())?;
    let generator = DummyGenerator::from_config(config);
    let report = task.run(
        &generator,
        &RunOptions {
            model_name: config.model_name.clone(),
            fail_on_error: config.fail_on_error,
            events,
        },
    )?;

    let path = report.write(&config.logs_dir())?;
    tracing::info!(report = %path.display(), "run complete");
    Ok((report, path))
}

fn print_summary(report: &EvalReport, report_path: &Path) {
    println!("Task:     {}", report.task);
    println!("Model:    {}", report.model);
    println!("Dataset:  {}", report.dataset);
    println!(
        "Samples:  {} ({} scored, {} errored)",
        report.samples.len(),
        report.scored(),
        report.errored()
    );
    println!();
    println!("accuracy  {:.3}", report.metrics.accuracy);
    println!("stderr    {:.3}", report.metrics.stderr);
    println!();
    println!("Report:   {}", report_path.display());
}

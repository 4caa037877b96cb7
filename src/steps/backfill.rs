//! Reconstruct missing prior-step code from disk.

use super::{StepAccumulator, StepFiles};
use crate::config::ReferenceSteps;
use crate::error::{Result, StepwiseError};
use crate::events::{Event, EventAction};
use crate::parse::{extract_function_name, get_function_from_code};
use crate::problem::Problem;
use serde_json::json;
use std::path::PathBuf;

/// Fill every empty slot before `step` from previously written files.
///
/// Reference steps are read from `<reference_dir>/<id>.<step>.txt`, every
/// other step from its generated `.py` file. Only the definition named by the
/// step's function header is kept.
///
/// # Errors
///
/// * `StepwiseError::StepOrder` - a prerequisite file does not exist yet
/// * `StepwiseError::ExtractionError` - the header names no function, or the
///   file does not define it
///
/// Returns the steps that were loaded.
pub fn backfill(
    files: &StepFiles,
    problem: &Problem,
    step: usize,
    acc: &mut StepAccumulator,
) -> Result<Vec<usize>> {
    let mut loaded = Vec::new();

    for prev in acc.missing_before(step) {
        let path = source_path(files, &problem.problem_id, prev);
        if !path.is_file() {
            return Err(StepwiseError::StepOrder {
                problem_id: problem.problem_id.clone(),
                step,
                missing_step: prev,
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            StepwiseError::UserError(format!(
                "failed to read previous code '{}': {}",
                path.display(),
                e
            ))
        })?;

        let header = problem
            .step(prev)
            .map(|s| s.function_header.as_str())
            .unwrap_or_default();
        let name = extract_function_name(header)?;
        let code = get_function_from_code(&content, &name).ok_or_else(|| {
            StepwiseError::ExtractionError(format!(
                "'{}' is not defined in '{}'",
                name,
                path.display()
            ))
        })?;

        acc.set(prev, code)?;
        loaded.push(prev);

        tracing::info!(
            "Loaded previous code for problem {} step {}",
            problem.problem_id,
            prev
        );
        files.events.record(
            Event::new(EventAction::StepBackfilled)
                .at_step(&problem.problem_id, prev)
                .with_details(json!({
                    "source": path.display().to_string(),
                    "function": name,
                    "requested_step": step,
                })),
        );
    }

    Ok(loaded)
}

fn source_path(files: &StepFiles, problem_id: &str, step: usize) -> PathBuf {
    if files.reference_steps.contains(problem_id, step) {
        ReferenceSteps::reference_path(&files.reference_dir, problem_id, step)
    } else {
        files.layout.code_path(problem_id, step)
    }
}

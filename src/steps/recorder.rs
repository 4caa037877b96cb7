//! Store a model response as the code for a step.

use super::{StepAccumulator, StepFiles};
use crate::error::Result;
use crate::events::{Event, EventAction};
use crate::fs::atomic_write_file;
use crate::parse::extract_code_block;
use crate::problem::Problem;
use serde_json::json;
use std::path::PathBuf;

/// Extract the code from `response`, store it in the step's slot and write
/// `previous_code + "\n" + code` to the step's `.py` file.
///
/// `previous_code` is the dependency-plus-prior-code text produced alongside
/// the step's prompt. Returns the written path.
pub fn record_response(
    files: &StepFiles,
    problem: &Problem,
    response: &str,
    previous_code: &str,
    step: usize,
    acc: &mut StepAccumulator,
) -> Result<PathBuf> {
    let code = extract_code_block(response);
    acc.set(step, code.as_str())?;

    let path = files.layout.code_path(&problem.problem_id, step);
    atomic_write_file(&path, &format!("{}\n{}", previous_code, code))?;

    tracing::debug!(
        problem = %problem.problem_id,
        step,
        path = %path.display(),
        "recorded step code"
    );
    files.events.record(
        Event::new(EventAction::StepRecorded)
            .at_step(&problem.problem_id, step)
            .with_details(json!({
                "path": path.display().to_string(),
                "code_bytes": code.len(),
            })),
    );

    Ok(path)
}

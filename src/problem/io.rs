//! Dataset loading.

use super::Problem;
use crate::error::{Result, StepwiseError};
use std::path::Path;

/// Load every problem record from a JSON array on disk.
pub fn load_problems<P: AsRef<Path>>(path: P) -> Result<Vec<Problem>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        StepwiseError::UserError(format!(
            "failed to read dataset '{}': {}",
            path.display(),
            e
        ))
    })?;

    let problems = parse_problems(&content).map_err(|e| match e {
        StepwiseError::DatasetError(msg) => {
            StepwiseError::DatasetError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    tracing::debug!(
        path = %path.display(),
        problems = problems.len(),
        "loaded dataset"
    );
    Ok(problems)
}

/// Parse problem records from a JSON array string.
///
/// Problem ids must be unique and every problem needs at least one sub-step.
pub fn parse_problems(json: &str) -> Result<Vec<Problem>> {
    let problems: Vec<Problem> = serde_json::from_str(json)
        .map_err(|e| StepwiseError::DatasetError(format!("invalid problem JSON: {}", e)))?;

    let mut seen = std::collections::HashSet::new();
    for problem in &problems {
        if problem.sub_steps.is_empty() {
            return Err(StepwiseError::DatasetError(format!(
                "problem '{}' has no sub_steps",
                problem.problem_id
            )));
        }
        if !seen.insert(problem.problem_id.as_str()) {
            return Err(StepwiseError::DatasetError(format!(
                "duplicate problem_id '{}'",
                problem.problem_id
            )));
        }
    }

    Ok(problems)
}

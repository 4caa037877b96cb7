//! Configuration types and defaults for stepwise.
//!
//! This module defines the reference-step table, constants, and default value
//! functions used by the Config struct.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A `(problem, step)` pair whose code comes from a bundled reference file.
///
/// These sub-steps are skipped by the generation loop. When a later step needs
/// their code, backfill reads `<reference_dir>/<problem_id>.<step>.txt` instead
/// of a generated file, so those files must stay available.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceStep {
    /// Problem identifier as it appears in the dataset.
    pub problem_id: String,
    /// 1-based step number.
    pub step: usize,
}

impl ReferenceStep {
    pub fn new(problem_id: impl Into<String>, step: usize) -> Self {
        Self {
            problem_id: problem_id.into(),
            step,
        }
    }
}

/// Lookup table of reference steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceSteps(Vec<ReferenceStep>);

impl ReferenceSteps {
    pub fn new(steps: Vec<ReferenceStep>) -> Self {
        Self(steps)
    }

    /// Whether `step` of `problem_id` is served from a reference file.
    pub fn contains(&self, problem_id: &str, step: usize) -> bool {
        self.0
            .iter()
            .any(|r| r.problem_id == problem_id && r.step == step)
    }

    /// Path of the bundled reference file for a step.
    pub fn reference_path(reference_dir: &Path, problem_id: &str, step: usize) -> PathBuf {
        reference_dir.join(format!("{}.{}.txt", problem_id, step))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceStep> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Template file used when background text is excluded.
pub const PLAIN_TEMPLATE_FILE: &str = "background_comment_template.txt";

/// Template file used when background text is included.
pub const BACKGROUND_TEMPLATE_FILE: &str = "multistep_template.txt";

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stepwise.yaml";

/// Default reference steps: sub-steps the dataset ships code for.
pub fn default_reference_steps() -> ReferenceSteps {
    ReferenceSteps(vec![
        ReferenceStep::new("13", 6),
        ReferenceStep::new("62", 1),
        ReferenceStep::new("76", 3),
    ])
}

// Default value functions for serde
pub(crate) fn default_dataset_path() -> String {
    "data/problems_all.json".to_string()
}
pub(crate) fn default_temp_dir() -> String {
    "./tmp".to_string()
}
pub(crate) fn default_data_dir() -> String {
    "data".to_string()
}
pub(crate) fn default_model_name() -> String {
    "gpt-4o".to_string()
}
pub(crate) fn default_task_name() -> String {
    "dummy_task".to_string()
}
pub(crate) fn default_dummy_response() -> String {
    "Blah blah\n```python\nprint('Hello, World!')\n```\n".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}

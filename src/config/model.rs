//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a stepwise run.
///
/// This struct represents the contents of `stepwise.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Inputs
    // =========================================================================
    /// Path to the JSON array of problem records.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Directory holding the prompt templates.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory holding the bundled reference step files.
    #[serde(default = "default_data_dir")]
    pub reference_dir: String,

    /// Steps whose code is read from `reference_dir` instead of generated.
    #[serde(default = "default_reference_steps")]
    pub reference_steps: ReferenceSteps,

    // =========================================================================
    // Outputs
    // =========================================================================
    /// Root for generated code, prompts, events and reports.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,

    /// Whether rendered prompts are written to disk.
    #[serde(default = "default_true")]
    pub save_prompts: bool,

    // =========================================================================
    // Prompting
    // =========================================================================
    /// Include step background text in prompts (run-wide).
    #[serde(default)]
    pub with_background: bool,

    // =========================================================================
    // Harness
    // =========================================================================
    /// Name recorded in eval reports.
    #[serde(default = "default_task_name")]
    pub task_name: String,

    /// Model name recorded in eval reports. No model is called.
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Canned response returned by the stand-in generator.
    #[serde(default = "default_dummy_response")]
    pub dummy_response: String,

    /// Abort the whole run on the first failing sample.
    #[serde(default = "default_true")]
    pub fail_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            data_dir: default_data_dir(),
            reference_dir: default_data_dir(),
            reference_steps: default_reference_steps(),
            temp_dir: default_temp_dir(),
            save_prompts: default_true(),
            with_background: false,
            task_name: default_task_name(),
            model_name: default_model_name(),
            dummy_response: default_dummy_response(),
            fail_on_error: default_true(),
        }
    }
}

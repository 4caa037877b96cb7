//! File naming for generated code and rendered prompts.

use crate::config::Config;
use std::path::{Path, PathBuf};

/// Where per-step files live for one run.
///
/// Files are grouped under `with_background/` or `without_background/` so runs
/// with and without background text never overwrite each other:
///
/// ```text
/// <output_dir>/without_background/13.2.py
/// <prompt_dir>/without_background/13.2.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    output_dir: PathBuf,
    prompt_dir: PathBuf,
    with_background: bool,
}

impl OutputLayout {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        prompt_dir: impl Into<PathBuf>,
        with_background: bool,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            prompt_dir: prompt_dir.into(),
            with_background,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.output_dir(),
            config.prompt_dir(),
            config.with_background,
        )
    }

    pub fn with_background(&self) -> bool {
        self.with_background
    }

    /// Subdirectory name for the background flag.
    pub fn background_dir(&self) -> &'static str {
        if self.with_background {
            "with_background"
        } else {
            "without_background"
        }
    }

    /// Accumulated code file for a step.
    pub fn code_path(&self, problem_id: &str, step: usize) -> PathBuf {
        self.code_dir().join(format!("{}.{}.py", problem_id, step))
    }

    /// Rendered prompt file for a step.
    pub fn prompt_path(&self, problem_id: &str, step: usize) -> PathBuf {
        self.prompt_dir
            .join(self.background_dir())
            .join(format!("{}.{}.txt", problem_id, step))
    }

    pub fn code_dir(&self) -> PathBuf {
        self.output_dir.join(self.background_dir())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

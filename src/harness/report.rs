//! Eval report written at the end of a run.

use super::scorer::{Metrics, ScoreValue};
use crate::error::{Result, StepwiseError};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    Success,
    Error,
}

/// What happened to one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleOutcome {
    pub id: String,
    pub status: SampleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreValue>,
    pub completed_steps: Vec<usize>,
    pub skipped_steps: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub task: String,
    pub model: String,
    pub dataset: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub samples: Vec<SampleOutcome>,
    /// Computed over successfully scored samples only.
    pub metrics: Metrics,
}

impl EvalReport {
    pub fn scored(&self) -> usize {
        self.samples.iter().filter(|s| s.score.is_some()).count()
    }

    pub fn errored(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.status == SampleStatus::Error)
            .count()
    }

    /// File name: `<started_at>_<task>.json`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.json",
            self.started_at.format("%Y-%m-%dT%H-%M-%S"),
            self.task
        )
    }

    /// Write the report as pretty JSON into `logs_dir`.
    pub fn write(&self, logs_dir: &Path) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            StepwiseError::UserError(format!("failed to serialize eval report: {}", e))
        })?;
        let path = logs_dir.join(self.file_name());
        atomic_write_file(&path, &json)?;
        Ok(path)
    }
}

//! Append-only run event log.
//!
//! Every prompt saved, step recorded, step backfilled or skipped is appended to
//! `<temp_dir>/events.ndjson` as one JSON object per line, so a run can be
//! audited (or a resumed run explained) after the fact.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (`prompt_saved`, `step_recorded`, ...)
//! - `actor`: `user@HOST`
//! - `problem` / `step`: optional problem id and 1-based step
//! - `details`: action-specific object
//!
//! Logging is best-effort: a failed append is reported with `tracing::warn!`
//! and never aborts a run.

use crate::error::{Result, StepwiseError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Solver started a problem
    ProblemStart,
    /// Rendered prompt written to disk
    PromptSaved,
    /// Response code stored and written to disk
    StepRecorded,
    /// Prior step code reloaded from disk
    StepBackfilled,
    /// Reference step skipped by the generation loop
    StepSkipped,
    /// Solver finished every step of a problem
    ProblemComplete,
    /// Task finished scoring every sample
    RunComplete,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventAction::ProblemStart => "problem_start",
            EventAction::PromptSaved => "prompt_saved",
            EventAction::StepRecorded => "step_recorded",
            EventAction::StepBackfilled => "step_backfilled",
            EventAction::StepSkipped => "step_skipped",
            EventAction::ProblemComplete => "problem_complete",
            EventAction::RunComplete => "run_complete",
        };
        write!(f, "{}", name)
    }
}

/// An event record for the run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            problem: None,
            step: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Attach a problem id and step number.
    pub fn at_step(mut self, problem_id: impl Into<String>, step: usize) -> Self {
        self.problem = Some(problem_id.into());
        self.step = Some(step);
        self
    }

    /// Attach a problem id.
    pub fn for_problem(mut self, problem_id: impl Into<String>) -> Self {
        self.problem = Some(problem_id.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            StepwiseError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Destination for run events. A disabled log drops everything.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an event, warning instead of failing when the write fails.
    pub fn record(&self, event: Event) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = append_event(path, &event) {
            tracing::warn!(action = %event.action, "failed to log event: {}", e);
        }
    }
}

/// Append an event as one JSON line, creating the file and its directory.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            StepwiseError::UserError(format!(
                "failed to create events directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            StepwiseError::UserError(format!(
                "failed to open events file '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        StepwiseError::UserError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Read every event back from a log file.
#[cfg(test)]
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    let content = fs::read_to_string(path).map_err(|e| {
        StepwiseError::UserError(format!(
            "failed to read events file '{}': {}",
            path.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                StepwiseError::UserError(format!("malformed event line '{}': {}", line, e))
            })
        })
        .collect()
}

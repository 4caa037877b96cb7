//! A task bundles a dataset with the solver and scorer that evaluate it.

use super::dataset::Dataset;
use super::generate::Generator;
use super::report::{EvalReport, SampleOutcome, SampleStatus};
use super::scorer::{Metrics, Scorer};
use super::solver::{Solver, TaskState};
use crate::error::Result;
use crate::events::{Event, EventAction, EventLog};
use chrono::Utc;
use serde_json::json;

/// Run-level settings that are not part of the task itself.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub model_name: String,
    /// Stop at the first failing sample instead of recording it.
    pub fail_on_error: bool,
    pub events: EventLog,
}

pub struct Task {
    pub name: String,
    pub dataset: Dataset,
    pub solver: Box<dyn Solver>,
    pub scorer: Box<dyn Scorer>,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        dataset: Dataset,
        solver: Box<dyn Solver>,
        scorer: Box<dyn Scorer>,
    ) -> Self {
        Self {
            name: name.into(),
            dataset,
            solver,
            scorer,
        }
    }

    /// Solve and score every sample in dataset order.
    ///
    /// A failing sample aborts the run when `fail_on_error` is set; otherwise it
    /// is recorded with status `error` and left out of the metrics.
    pub fn run(&self, generator: &dyn Generator, options: &RunOptions) -> Result<EvalReport> {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(self.dataset.len());

        for sample in self.dataset.samples() {
            let state = TaskState::new(sample);
            let solved = self
                .solver
                .solve(state, generator)
                .and_then(|state| {
                    let score = self.scorer.score(&state, &sample.target)?;
                    Ok((state, score))
                });

            let outcome = match solved {
                Ok((state, score)) => SampleOutcome {
                    id: sample.id.clone(),
                    status: SampleStatus::Success,
                    score: Some(score.value),
                    completed_steps: state.completed_steps,
                    skipped_steps: state.skipped_steps,
                    error: None,
                },
                Err(e) if options.fail_on_error => return Err(e),
                Err(e) => {
                    tracing::warn!(sample = %sample.id, "sample failed: {}", e);
                    SampleOutcome {
                        id: sample.id.clone(),
                        status: SampleStatus::Error,
                        score: None,
                        completed_steps: Vec::new(),
                        skipped_steps: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        let scores: Vec<_> = outcomes.iter().filter_map(|o| o.score).collect();
        let report = EvalReport {
            task: self.name.clone(),
            model: options.model_name.clone(),
            dataset: self.dataset.name().to_string(),
            started_at,
            completed_at: Utc::now(),
            metrics: Metrics::from_scores(&scores),
            samples: outcomes,
        };

        options.events.record(Event::new(EventAction::RunComplete).with_details(json!({
            "task": report.task,
            "samples": report.samples.len(),
            "errored": report.errored(),
            "accuracy": report.metrics.accuracy,
        })));
        Ok(report)
    }
}

//! Solvers drive a sample through its sub-steps.

use super::dataset::Sample;
use super::generate::Generator;
use crate::error::Result;
use crate::events::{Event, EventAction};
use crate::problem::Problem;
use crate::prompt::PromptAssembler;
use crate::steps::StepAccumulator;
use serde_json::json;

/// Per-sample state handed from solver to scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskState {
    pub sample_id: String,
    pub input: String,
    pub metadata: Problem,
    /// Steps generated, in order.
    pub completed_steps: Vec<usize>,
    /// Reference steps the generation loop skipped.
    pub skipped_steps: Vec<usize>,
}

impl TaskState {
    pub fn new(sample: &Sample) -> Self {
        Self {
            sample_id: sample.id.clone(),
            input: sample.input.clone(),
            metadata: sample.metadata.clone(),
            completed_steps: Vec::new(),
            skipped_steps: Vec::new(),
        }
    }
}

pub trait Solver {
    fn solve(&self, state: TaskState, generator: &dyn Generator) -> Result<TaskState>;
}

/// Generates every sub-step of a problem in order, carrying prior code forward.
///
/// Reference steps are skipped; later steps read their code from the bundled
/// reference files during backfill. Each sample gets its own accumulator.
#[derive(Debug, Clone)]
pub struct StepSolver {
    assembler: PromptAssembler,
}

impl StepSolver {
    pub fn new(assembler: PromptAssembler) -> Self {
        Self { assembler }
    }

    #[cfg(test)]
    pub fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }
}

impl Solver for StepSolver {
    fn solve(&self, mut state: TaskState, generator: &dyn Generator) -> Result<TaskState> {
        let files = self.assembler.files();
        let problem_id = state.metadata.problem_id.clone();
        let total = state.metadata.total_steps();

        tracing::info!("Processing problem {}", state.sample_id);
        files
            .events
            .record(Event::new(EventAction::ProblemStart).for_problem(&problem_id));

        let mut acc = StepAccumulator::for_problem(&problem_id, total);
        for step in 1..=total {
            if files.reference_steps.contains(&problem_id, step) {
                tracing::debug!(problem = %problem_id, step, "skipping reference step");
                files
                    .events
                    .record(Event::new(EventAction::StepSkipped).at_step(&problem_id, step));
                state.skipped_steps.push(step);
                continue;
            }

            let prepared = self
                .assembler
                .prepare_prompt(&state.metadata, step, &mut acc)?;
            let response = generator.generate(&prepared.prompt)?;
            self.assembler.record_response(
                &state.metadata,
                &response,
                &prepared.previous_code,
                step,
                &mut acc,
            )?;
            state.completed_steps.push(step);
        }

        files.events.record(
            Event::new(EventAction::ProblemComplete)
                .for_problem(&problem_id)
                .with_details(json!({
                    "completed_steps": state.completed_steps,
                    "skipped_steps": state.skipped_steps,
                })),
        );
        Ok(state)
    }
}

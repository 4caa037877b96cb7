//! Evaluation harness adapters.
//!
//! - **Dataset**: one sample per problem record, the record as metadata
//! - **Generator**: response source; [`DummyGenerator`] stands in for a model
//! - **Solver**: [`StepSolver`] walks every sub-step through prompt, generate
//!   and record
//! - **Scorer**: [`ConstantScorer`] reports every sample correct
//! - **Task**: bundles the three and produces an [`EvalReport`]

mod dataset;
mod generate;
mod report;
mod scorer;
mod solver;
mod task;

pub use dataset::{Dataset, Sample, record_to_sample};
pub use generate::{DummyGenerator, Generator};
pub use report::{EvalReport, SampleOutcome, SampleStatus};
pub use scorer::{ConstantScorer, Metrics, Score, ScoreValue, Scorer, accuracy, stderr};
pub use solver::{Solver, StepSolver, TaskState};
pub use task::{RunOptions, Task};

use crate::config::Config;
use crate::error::Result;
use crate::events::EventLog;
use crate::prompt::PromptAssembler;

/// The benchmark task as configured: dataset, step solver and constant scorer.
pub fn dummy_task(config: &Config, dataset: Dataset, events: EventLog) -> Result<Task> {
    let assembler = PromptAssembler::from_config(config, events)?;
    Ok(Task::new(
        config.task_name.clone(),
        dataset,
        Box::new(StepSolver::new(assembler)),
        Box::new(ConstantScorer),
    ))
}

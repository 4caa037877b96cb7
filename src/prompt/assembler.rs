//! Multi-step prompt assembly.

use super::template::{PROMPT_SLOTS, PromptTemplate, vars};
use crate::config::Config;
use crate::error::{Result, StepwiseError};
use crate::events::{Event, EventAction, EventLog};
use crate::fs::atomic_write_file;
use crate::problem::{Problem, SubStep};
use crate::steps::{self, StepAccumulator, StepFiles};
use serde_json::json;
use std::path::PathBuf;

/// Block placed between consecutive prior steps in the prompt.
pub const STEP_MARKER: &str = "------";

/// Text pieces that fill a prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTexts {
    /// Prior step descriptions and code, separated by [`STEP_MARKER`].
    pub problem_steps: String,
    /// Target step description, function header and return line.
    pub next_step: String,
    /// Prior step code joined by newlines.
    pub previous_code: String,
}

/// A rendered prompt and the code context it was built on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPrompt {
    pub prompt: String,
    /// Dependencies followed by all prior step code. Prefixes the step's
    /// own code in its `.py` file.
    pub previous_code: String,
}

fn target_step(problem: &Problem, step: usize) -> Result<&SubStep> {
    problem.step(step).ok_or_else(|| {
        StepwiseError::UserError(format!(
            "problem {} has {} steps; step {} requested",
            problem.problem_id,
            problem.total_steps(),
            step
        ))
    })
}

/// Build the prior-steps, next-step and prior-code texts for `step`.
///
/// Every slot before `step` must already be filled.
pub fn process_problem_steps(
    problem: &Problem,
    step: usize,
    acc: &StepAccumulator,
    with_background: bool,
) -> Result<StepTexts> {
    let target = target_step(problem, step)?;

    let mut blocks: Vec<String> = Vec::new();
    let mut prior_code: Vec<&str> = Vec::new();
    for (idx, sub) in problem.sub_steps[..step - 1].iter().enumerate() {
        let prev = idx + 1;
        let code = acc.get(prev).ok_or_else(|| StepwiseError::StepOrder {
            problem_id: problem.problem_id.clone(),
            step,
            missing_step: prev,
        })?;
        if prev > 1 {
            blocks.push(STEP_MARKER.to_string());
        }
        blocks.push(sub.description(with_background));
        blocks.push(code.to_string());
        prior_code.push(code);
    }

    if target.step_description_prompt.trim().is_empty() {
        return Err(StepwiseError::DatasetError(format!(
            "problem {} step {} has an empty description",
            problem.problem_id, step
        )));
    }
    let next_step = [target.description(with_background), target.code_skeleton()].join("\n\n");

    Ok(StepTexts {
        problem_steps: blocks.join("\n\n"),
        next_step,
        previous_code: prior_code.join("\n"),
    })
}

/// Renders step prompts from a template and keeps per-step files in sync.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    template: PromptTemplate,
    files: StepFiles,
    save_prompts: bool,
}

impl PromptAssembler {
    pub fn new(template: PromptTemplate, files: StepFiles, save_prompts: bool) -> Self {
        Self {
            template,
            files,
            save_prompts,
        }
    }

    /// Assembler using the template selected by the config's background flag.
    ///
    /// The template must parse and use only the known prompt slots.
    pub fn from_config(config: &Config, events: EventLog) -> Result<Self> {
        let template = PromptTemplate::parse(&config.load_template()?)?;
        template.check_slots(&PROMPT_SLOTS)?;
        for slot in PROMPT_SLOTS {
            if !template.slots().any(|used| used == slot) {
                tracing::warn!(
                    template = %config.template_path().display(),
                    "prompt template never uses slot '{}'",
                    slot
                );
            }
        }
        Ok(Self::new(
            template,
            StepFiles::from_config(config, events),
            config.save_prompts,
        ))
    }

    pub fn files(&self) -> &StepFiles {
        &self.files
    }

    pub fn with_background(&self) -> bool {
        self.files.layout.with_background()
    }

    /// Prompt for `step`, backfilling missing prior steps from disk first.
    ///
    /// The accumulator is reset when starting at step 1 or when it does not
    /// fit this problem (see [`StepAccumulator::prepare`]). The prompt is
    /// written to the step's `.txt` file when saving is enabled.
    pub fn prepare_prompt(
        &self,
        problem: &Problem,
        step: usize,
        acc: &mut StepAccumulator,
    ) -> Result<PreparedPrompt> {
        target_step(problem, step)?;
        acc.prepare(&problem.problem_id, step, problem.total_steps());
        if step > 1 {
            steps::backfill(&self.files, problem, step, acc)?;
        }

        let prepared = self.render(problem, step, acc)?;
        if self.save_prompts {
            self.save_prompt(problem, step, &prepared.prompt)?;
        }
        Ok(prepared)
    }

    /// Render the prompt for `step` from the accumulator as it stands.
    pub fn render(
        &self,
        problem: &Problem,
        step: usize,
        acc: &StepAccumulator,
    ) -> Result<PreparedPrompt> {
        let texts = process_problem_steps(problem, step, acc, self.with_background())?;
        let dependencies = problem.required_dependencies.as_str();

        let prompt = self.template.render(&vars([
            ("problem_steps_str", texts.problem_steps.as_str()),
            ("next_step_str", texts.next_step.as_str()),
            ("dependencies", dependencies),
        ]))?;

        Ok(PreparedPrompt {
            prompt,
            previous_code: format!("{}\n{}\n", dependencies, texts.previous_code),
        })
    }

    /// Write a rendered prompt to its `.txt` file.
    pub fn save_prompt(&self, problem: &Problem, step: usize, prompt: &str) -> Result<PathBuf> {
        let path = self.files.layout.prompt_path(&problem.problem_id, step);
        atomic_write_file(&path, prompt)?;

        self.files.events.record(
            Event::new(EventAction::PromptSaved)
                .at_step(&problem.problem_id, step)
                .with_details(json!({ "path": path.display().to_string() })),
        );
        Ok(path)
    }

    /// Store a model response as the code for `step`.
    pub fn record_response(
        &self,
        problem: &Problem,
        response: &str,
        previous_code: &str,
        step: usize,
        acc: &mut StepAccumulator,
    ) -> Result<PathBuf> {
        steps::record_response(&self.files, problem, response, previous_code, step, acc)
    }
}

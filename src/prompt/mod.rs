//! Prompt generation for multi-step problems.
//!
//! This module provides:
//!
//! - **Template**: slot substitution engine for prompt template files
//! - **Assembler**: builds the prior-steps and next-step texts for a step,
//!   backfills missing prior code and saves rendered prompts
//!
//! # Template Slots
//!
//! ```text
//! Previous steps:
//! {problem_steps_str}
//!
//! Next step:
//! {next_step_str}
//!
//! Dependencies:
//! {dependencies}
//! ```
//!
//! Use `{{` to escape and render a literal `{`.

mod assembler;
mod template;

pub use assembler::{
    PreparedPrompt, PromptAssembler, STEP_MARKER, StepTexts, process_problem_steps,
};
pub use template::{PROMPT_SLOTS, PromptTemplate, TemplateError, vars};
#[cfg(test)]
pub use template::render_template;

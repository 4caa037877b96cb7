//! Error types for the stepwise CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::prompt::TemplateError;
use thiserror::Error;

/// Main error type for stepwise operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum StepwiseError {
    /// User provided invalid arguments, config, or a required file is unusable.
    #[error("{0}")]
    UserError(String),

    /// The dataset could not be read or does not contain what was asked for.
    #[error("Dataset error: {0}")]
    DatasetError(String),

    /// A step was requested before one of its prerequisites was generated.
    #[error("Generating problem {problem_id} step {step} ahead of step {missing_step}.")]
    StepOrder {
        problem_id: String,
        step: usize,
        missing_step: usize,
    },

    /// Code or a named definition could not be extracted.
    #[error("Extraction failed: {0}")]
    ExtractionError(String),

    /// A prompt template could not be rendered.
    #[error("Template rendering failed: {0}")]
    Template(#[from] TemplateError),
}

impl StepwiseError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            StepwiseError::UserError(_) => exit_codes::USER_ERROR,
            StepwiseError::DatasetError(_) => exit_codes::DATASET_ERROR,
            StepwiseError::StepOrder { .. } => exit_codes::STEP_ORDER_VIOLATION,
            StepwiseError::ExtractionError(_) => exit_codes::EXTRACTION_FAILURE,
            StepwiseError::Template(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for stepwise operations.
pub type Result<T> = std::result::Result<T, StepwiseError>;

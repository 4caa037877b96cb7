//! Problem records for the benchmark dataset.
//!
//! A problem is an ordered list of sub-steps plus the dependency lines every
//! step's code may assume. Records are loaded once from a JSON array and are
//! immutable for the rest of the run.
//!
//! # Record Format
//!
//! ```text
//! [
//!   {
//!     "problem_id": "13",
//!     "required_dependencies": "import numpy as np",
//!     "sub_steps": [
//!       {
//!         "step_description_prompt": "Compute ...",
//!         "step_background": "Background: ...",
//!         "function_header": "def f(x):\n    '''doc'''",
//!         "return_line": "    return y"
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! Fields not listed above are kept in `extra` and written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

mod io;

pub use io::{load_problems, parse_problems};

/// One multi-step benchmark problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Problem identifier (string in the dataset, e.g. "13").
    pub problem_id: String,

    /// Ordered sub-steps. Step numbers are 1-based positions in this list.
    pub sub_steps: Vec<SubStep>,

    /// Import lines prepended to every step's accumulated code.
    #[serde(default)]
    pub required_dependencies: String,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One incremental coding task within a problem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubStep {
    /// Natural-language description of what to implement.
    #[serde(default)]
    pub step_description_prompt: String,

    /// Optional explanatory text, included only when background is enabled.
    #[serde(default)]
    pub step_background: String,

    /// Function (or class) signature and docstring.
    #[serde(default)]
    pub function_header: String,

    /// Expected return statement.
    #[serde(default)]
    pub return_line: String,

    /// Unknown fields (test cases, reference code, ...) preserved.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Problem {
    /// Number of sub-steps.
    pub fn total_steps(&self) -> usize {
        self.sub_steps.len()
    }

    /// Sub-step for a 1-based step number.
    pub fn step(&self, step: usize) -> Option<&SubStep> {
        step.checked_sub(1).and_then(|idx| self.sub_steps.get(idx))
    }
}

impl SubStep {
    /// Description text, with background appended when requested.
    pub fn description(&self, with_background: bool) -> String {
        if with_background {
            format!("{}\n{}", self.step_description_prompt, self.step_background)
        } else {
            self.step_description_prompt.clone()
        }
    }

    /// Function header and return line, as shown for the step being asked for.
    pub fn code_skeleton(&self) -> String {
        format!("{}\n\n{}", self.function_header, self.return_line)
    }
}

//! Caller-owned store of code generated for each step of one problem.

use crate::error::{Result, StepwiseError};

/// Ordered code slots, one per sub-step of a single problem.
///
/// The accumulator is passed explicitly through every prompt and record call
/// and is owned by whoever drives the problem, so nothing leaks between
/// problems. Slots are 1-based to match step numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepAccumulator {
    problem_id: Option<String>,
    slots: Vec<Option<String>>,
}

impl StepAccumulator {
    /// Empty accumulator sized for `total_steps` of `problem_id`.
    pub fn for_problem(problem_id: impl Into<String>, total_steps: usize) -> Self {
        Self {
            problem_id: Some(problem_id.into()),
            slots: vec![None; total_steps],
        }
    }

    /// Get the accumulator ready for preparing `step` of a problem.
    ///
    /// Slots are cleared when processing starts over at step 1, when the slot
    /// count no longer matches `total_steps`, or when the accumulator last
    /// served a different problem. Otherwise existing slots are kept.
    ///
    /// Returns `true` when the slots were cleared.
    pub fn prepare(&mut self, problem_id: &str, step: usize, total_steps: usize) -> bool {
        let other_problem = self.problem_id.as_deref() != Some(problem_id);
        if step == 1 || self.slots.len() != total_steps || other_problem {
            *self = Self::for_problem(problem_id, total_steps);
            return true;
        }
        false
    }

    /// Problem these slots belong to, if any.
    pub fn problem_id(&self) -> Option<&str> {
        self.problem_id.as_deref()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Code stored for a 1-based step.
    pub fn get(&self, step: usize) -> Option<&str> {
        step.checked_sub(1)
            .and_then(|idx| self.slots.get(idx))
            .and_then(|slot| slot.as_deref())
    }

    /// Store the code for a 1-based step.
    pub fn set(&mut self, step: usize, code: impl Into<String>) -> Result<()> {
        let len = self.slots.len();
        let slot = step
            .checked_sub(1)
            .and_then(|idx| self.slots.get_mut(idx))
            .ok_or_else(|| {
                StepwiseError::UserError(format!(
                    "step {} is outside the accumulator's {} slots",
                    step, len
                ))
            })?;
        *slot = Some(code.into());
        Ok(())
    }

    /// Steps before `step` that have no code yet, in order.
    pub fn missing_before(&self, step: usize) -> Vec<usize> {
        (1..step).filter(|&s| self.get(s).is_none()).collect()
    }
}

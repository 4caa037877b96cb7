//! Per-problem step state and its files on disk.
//!
//! - **Accumulator**: code generated so far for each step of one problem
//! - **Layout**: where step code and prompts are written
//! - **Recorder**: turns a model response into a step's code
//! - **Backfill**: reloads missing prior steps from disk, or from bundled
//!   reference files for steps the generation loop skips
//!
//! Steps of a problem are processed strictly in increasing order. Asking for
//! step `k` before steps `1..k` exist on disk is an ordering error.

mod accumulator;
mod backfill;
mod layout;
mod recorder;

pub use accumulator::StepAccumulator;
pub use backfill::backfill;
pub use layout::OutputLayout;
pub use recorder::record_response;

use crate::config::{Config, ReferenceSteps};
use crate::events::EventLog;
use std::path::PathBuf;

/// Everything needed to find, read and write per-step files.
#[derive(Debug, Clone)]
pub struct StepFiles {
    pub layout: OutputLayout,
    pub reference_dir: PathBuf,
    pub reference_steps: ReferenceSteps,
    pub events: EventLog,
}

impl StepFiles {
    pub fn from_config(config: &Config, events: EventLog) -> Self {
        Self {
            layout: OutputLayout::from_config(config),
            reference_dir: config.reference_dir(),
            reference_steps: config.reference_steps.clone(),
            events,
        }
    }
}

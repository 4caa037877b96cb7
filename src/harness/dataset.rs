//! Benchmark samples built from problem records.

use crate::error::{Result, StepwiseError};
use crate::problem::{Problem, load_problems};
use std::path::Path;

/// One benchmark item. The whole problem record travels as metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: String,
    pub input: String,
    pub target: String,
    pub metadata: Problem,
}

/// Map a problem record to a sample keyed by its problem id.
pub fn record_to_sample(problem: Problem) -> Sample {
    Sample {
        id: problem.problem_id.clone(),
        input: problem.problem_id.clone(),
        target: problem.problem_id.clone(),
        metadata: problem,
    }
}

/// Ordered collection of samples.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    name: String,
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn from_problems(name: impl Into<String>, problems: Vec<Problem>) -> Self {
        Self {
            name: name.into(),
            samples: problems.into_iter().map(record_to_sample).collect(),
        }
    }

    /// Load a JSON array of problem records as a dataset named after the file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "dataset".to_string());
        Ok(Self::from_problems(name, load_problems(path)?))
    }

    /// Keep only the given sample ids, in dataset order.
    ///
    /// An empty list keeps everything. Unknown ids are an error.
    pub fn select(self, ids: &[String]) -> Result<Self> {
        if ids.is_empty() {
            return Ok(self);
        }
        if let Some(missing) = ids
            .iter()
            .find(|id| !self.samples.iter().any(|s| &s.id == *id))
        {
            return Err(StepwiseError::DatasetError(format!(
                "sample id '{}' not found in dataset '{}'",
                missing, self.name
            )));
        }

        let samples = self
            .samples
            .into_iter()
            .filter(|s| ids.contains(&s.id))
            .collect();
        Ok(Self {
            name: self.name,
            samples,
        })
    }

    /// Keep at most the first `limit` samples.
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        if let Some(limit) = limit {
            self.samples.truncate(limit);
        }
        self
    }

    /// Sample with the given id.
    pub fn get(&self, id: &str) -> Option<&Sample> {
        self.samples.iter().find(|s| s.id == id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

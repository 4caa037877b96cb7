//! Scoring and aggregate metrics.

use super::solver::TaskState;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Outcome of scoring one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreValue {
    #[serde(rename = "C")]
    Correct,
    #[serde(rename = "I")]
    Incorrect,
}

impl ScoreValue {
    /// Numeric value used by metrics.
    pub fn as_f64(self) -> f64 {
        match self {
            ScoreValue::Correct => 1.0,
            ScoreValue::Incorrect => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub value: ScoreValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Score {
    pub fn new(value: ScoreValue) -> Self {
        Self {
            value,
            explanation: None,
        }
    }
}

pub trait Scorer {
    fn score(&self, state: &TaskState, target: &str) -> Result<Score>;
}

/// Reports every sample as correct. Generated code is not evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantScorer;

impl Scorer for ConstantScorer {
    fn score(&self, _state: &TaskState, _target: &str) -> Result<Score> {
        Ok(Score::new(ScoreValue::Correct))
    }
}

/// Aggregate metrics over scored samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub stderr: f64,
}

impl Metrics {
    pub fn from_scores(scores: &[ScoreValue]) -> Self {
        Self {
            accuracy: accuracy(scores),
            stderr: stderr(scores),
        }
    }
}

/// Mean score; 0 for no samples.
pub fn accuracy(scores: &[ScoreValue]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|s| s.as_f64()).sum::<f64>() / scores.len() as f64
}

/// Standard error of the mean, using the sample variance; 0 below two samples.
pub fn stderr(scores: &[ScoreValue]) -> f64 {
    let n = scores.len();
    if n < 2 {
        return 0.0;
    }
    let mean = accuracy(scores);
    let variance = scores
        .iter()
        .map(|s| (s.as_f64() - mean).powi(2))
        .sum::<f64>()
        / (n - 1) as f64;
    (variance / n as f64).sqrt()
}

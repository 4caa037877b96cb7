//! Response sources for the solver.

use crate::config::Config;
use crate::error::Result;

/// Produces a model response for a prompt.
pub trait Generator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Stand-in for a model: returns the same canned response for every prompt.
#[derive(Debug, Clone)]
pub struct DummyGenerator {
    response: String,
}

impl DummyGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.dummy_response.clone())
    }
}

impl Default for DummyGenerator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Generator for DummyGenerator {
    fn generate(&self, prompt: &str) -> Result<String> {
        tracing::trace!(prompt_bytes = prompt.len(), "dummy generation");
        Ok(self.response.clone())
    }
}

//! Config loading, validation, and path resolution.

use super::model::Config;
use super::types::{BACKGROUND_TEMPLATE_FILE, PLAIN_TEMPLATE_FILE};
use crate::error::{Result, StepwiseError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(StepwiseError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            StepwiseError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, or use defaults when the file does not exist.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            StepwiseError::UserError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            StepwiseError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `temp_dir`, `data_dir` and `reference_dir` must be non-empty
    /// - reference steps must have a non-empty problem id and a step of at least 1
    /// - reference steps must not repeat
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("temp_dir", &self.temp_dir),
            ("data_dir", &self.data_dir),
            ("reference_dir", &self.reference_dir),
        ] {
            if value.trim().is_empty() {
                return Err(StepwiseError::UserError(format!(
                    "config validation failed: {} must be non-empty",
                    name
                )));
            }
        }

        let mut seen = HashSet::new();
        for reference in self.reference_steps.iter() {
            if reference.problem_id.trim().is_empty() {
                return Err(StepwiseError::UserError(
                    "config validation failed: reference_steps entries need a problem_id"
                        .to_string(),
                ));
            }
            if reference.step == 0 {
                return Err(StepwiseError::UserError(format!(
                    "config validation failed: reference step for problem '{}' must be 1 or greater (steps are 1-based)",
                    reference.problem_id
                )));
            }
            if !seen.insert((reference.problem_id.as_str(), reference.step)) {
                return Err(StepwiseError::UserError(format!(
                    "config validation failed: duplicate reference step {}.{}",
                    reference.problem_id, reference.step
                )));
            }
        }

        Ok(())
    }

    /// Directory that receives generated code files.
    pub fn output_dir(&self) -> PathBuf {
        Path::new(&self.temp_dir).join("generated_code")
    }

    /// Directory that receives rendered prompt files.
    pub fn prompt_dir(&self) -> PathBuf {
        Path::new(&self.temp_dir).join("prompt")
    }

    /// Directory that receives eval reports.
    pub fn logs_dir(&self) -> PathBuf {
        Path::new(&self.temp_dir).join("logs")
    }

    /// Path of the run event log.
    pub fn events_path(&self) -> PathBuf {
        Path::new(&self.temp_dir).join("events.ndjson")
    }

    pub fn reference_dir(&self) -> PathBuf {
        PathBuf::from(&self.reference_dir)
    }

    /// Template file matching the background flag.
    pub fn template_path(&self) -> PathBuf {
        let file = if self.with_background {
            BACKGROUND_TEMPLATE_FILE
        } else {
            PLAIN_TEMPLATE_FILE
        };
        Path::new(&self.data_dir).join(file)
    }

    /// Read the prompt template matching the background flag.
    pub fn load_template(&self) -> Result<String> {
        let path = self.template_path();
        std::fs::read_to_string(&path).map_err(|e| {
            StepwiseError::UserError(format!(
                "failed to read prompt template '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

//! Tests for config functionality.

use crate::config::types::default_reference_steps;
use crate::config::{Config, ReferenceStep, ReferenceSteps};
use std::path::{Path, PathBuf};

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.dataset_path, "data/problems_all.json");
    assert_eq!(config.temp_dir, "./tmp");
    assert_eq!(config.data_dir, "data");
    assert_eq!(config.reference_dir, "data");
    assert!(!config.with_background);
    assert!(config.save_prompts);
    assert_eq!(config.model_name, "gpt-4o");
    assert_eq!(config.task_name, "dummy_task");
    assert!(config.dummy_response.contains("```python"));
    assert!(config.fail_on_error);
    assert_eq!(config.reference_steps.len(), 3);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();

    // Should use all defaults
    assert_eq!(config.temp_dir, "./tmp");
    assert_eq!(config.reference_steps, default_reference_steps());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
temp_dir: /scratch/run1
with_background: true
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.temp_dir, "/scratch/run1");
    assert!(config.with_background);

    // Unspecified values should use defaults
    assert_eq!(config.model_name, "gpt-4o");
    assert!(config.save_prompts);
}

#[test]
fn test_parse_reference_steps() {
    let yaml = r#"
reference_steps:
  - problem_id: "7"
    step: 2
  - problem_id: "abc"
    step: 1
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.reference_steps.len(), 2);
    assert!(config.reference_steps.contains("7", 2));
    assert!(config.reference_steps.contains("abc", 1));
    // Replaces the defaults rather than extending them
    assert!(!config.reference_steps.contains("13", 6));
}

#[test]
fn test_empty_reference_steps_allowed() {
    let config = Config::from_yaml("reference_steps: []").unwrap();
    assert!(config.reference_steps.is_empty());
}

#[test]
fn test_parse_yaml_with_unknown_fields() {
    let yaml = r#"
model_name: claude
unknown_field: "some value"
nested_unknown:
  inner: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.model_name, "claude");
    assert_eq!(config.temp_dir, "./tmp");
}

#[test]
fn test_validate_empty_temp_dir() {
    let result = Config::from_yaml("temp_dir: \"\"");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("temp_dir"));
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn test_validate_zero_reference_step() {
    let yaml = r#"
reference_steps:
  - problem_id: "13"
    step: 0
"#;
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("1-based"));
}

#[test]
fn test_validate_blank_reference_problem_id() {
    let yaml = r#"
reference_steps:
  - problem_id: " "
    step: 2
"#;
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("problem_id"));
}

#[test]
fn test_validate_duplicate_reference_step() {
    let yaml = r#"
reference_steps:
  - problem_id: "13"
    step: 6
  - problem_id: "13"
    step: 6
"#;
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("duplicate reference step 13.6"));
}

#[test]
fn test_default_reference_steps() {
    let steps = default_reference_steps();
    assert!(steps.contains("13", 6));
    assert!(steps.contains("62", 1));
    assert!(steps.contains("76", 3));
    assert!(!steps.contains("13", 5));
    assert!(!steps.contains("62", 6));
}

#[test]
fn test_reference_path() {
    let path = ReferenceSteps::reference_path(Path::new("data"), "76", 3);
    assert_eq!(path, PathBuf::from("data/76.3.txt"));
}

#[test]
fn test_reference_steps_new() {
    let steps = ReferenceSteps::new(vec![ReferenceStep::new("1", 1)]);
    assert!(steps.contains("1", 1));
    assert!(!steps.contains("1", 2));
}

#[test]
fn test_derived_paths() {
    let config = Config::from_yaml("temp_dir: out").unwrap();
    assert_eq!(config.output_dir(), PathBuf::from("out/generated_code"));
    assert_eq!(config.prompt_dir(), PathBuf::from("out/prompt"));
    assert_eq!(config.logs_dir(), PathBuf::from("out/logs"));
    assert_eq!(config.events_path(), PathBuf::from("out/events.ndjson"));
}

#[test]
fn test_template_path_follows_background_flag() {
    let mut config = Config::default();
    assert_eq!(
        config.template_path(),
        PathBuf::from("data/background_comment_template.txt")
    );

    config.with_background = true;
    assert_eq!(
        config.template_path(),
        PathBuf::from("data/multistep_template.txt")
    );
}

#[test]
fn test_load_template_missing_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = Config {
        data_dir: temp_dir.path().to_string_lossy().to_string(),
        ..Config::default()
    };
    let err = config.load_template().unwrap_err();
    assert!(err.to_string().contains("failed to read prompt template"));
}

#[test]
fn test_to_yaml_round_trip() {
    let config = Config::default();
    let yaml = config.to_yaml().unwrap();

    let parsed = Config::from_yaml(&yaml).unwrap();
    assert_eq!(parsed.temp_dir, config.temp_dir);
    assert_eq!(parsed.reference_steps, config.reference_steps);
    assert_eq!(parsed.dummy_response, config.dummy_response);
}

#[test]
fn test_config_load_from_file() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "model_name: local-model").unwrap();
    writeln!(file, "fail_on_error: false").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.model_name, "local-model");
    assert!(!config.fail_on_error);
}

#[test]
fn test_config_load_missing_file() {
    let err = Config::load("/nonexistent/path/stepwise.yaml").unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_load_or_default_missing_file() {
    let config = Config::load_or_default("/nonexistent/path/stepwise.yaml").unwrap();
    assert_eq!(config.temp_dir, "./tmp");
}

#[test]
fn test_load_or_default_invalid_file_is_error() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("stepwise.yaml");
    std::fs::write(&path, "temp_dir: \"\"\n").unwrap();

    assert!(Config::load_or_default(&path).is_err());
}

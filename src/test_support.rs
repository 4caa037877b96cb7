use crate::config::{Config, ReferenceSteps};
use crate::events::EventLog;
use crate::problem::{Problem, SubStep, parse_problems};
use crate::prompt::PromptAssembler;
use crate::steps::{OutputLayout, StepFiles};
use std::path::Path;
use tempfile::TempDir;

/// Template with every slot, in the shape of the bundled templates.
pub(crate) const TEST_TEMPLATE: &str =
    "PREVIOUS STEPS:\n{problem_steps_str}\n\nNEXT STEP:\n{next_step_str}\n\nDEPENDENCIES:\n{dependencies}\n";

pub(crate) fn sub_step(n: usize, name: &str) -> SubStep {
    SubStep {
        step_description_prompt: format!("Step {} description.", n),
        step_background: format!("Step {} background.", n),
        function_header: format!("def {}(x):\n    '''Step {} docstring.'''", name, n),
        return_line: format!("    return r{}", n),
        ..SubStep::default()
    }
}

/// Problem with one sub-step per function name.
pub(crate) fn problem(id: &str, names: &[&str]) -> Problem {
    Problem {
        problem_id: id.to_string(),
        sub_steps: names
            .iter()
            .enumerate()
            .map(|(i, name)| sub_step(i + 1, name))
            .collect(),
        required_dependencies: "import numpy as np".to_string(),
        extra: Default::default(),
    }
}

pub(crate) fn three_step_problem() -> Problem {
    problem("7", &["alpha", "beta", "gamma"])
}

/// Response a model might give for a step: a fenced function plus chatter.
pub(crate) fn function_response(name: &str, body: &str) -> String {
    format!(
        "Here is the implementation.\n```python\nimport numpy as np\n\ndef {}(x):\n    {}\n```\nLet me know.",
        name, body
    )
}

pub(crate) fn step_files(root: &Path, with_background: bool, refs: ReferenceSteps) -> StepFiles {
    StepFiles {
        layout: OutputLayout::new(
            root.join("generated_code"),
            root.join("prompt"),
            with_background,
        ),
        reference_dir: root.join("data"),
        reference_steps: refs,
        events: EventLog::at(root.join("events.ndjson")),
    }
}

pub(crate) fn assembler(root: &Path, with_background: bool) -> PromptAssembler {
    PromptAssembler::new(
        TEST_TEMPLATE.parse().unwrap(),
        step_files(root, with_background, ReferenceSteps::default()),
        true,
    )
}

/// Config rooted in a temp dir with templates and a dataset written out.
pub(crate) fn workspace(problems: &[Problem]) -> (TempDir, Config) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let data = root.join("data");
    std::fs::create_dir_all(&data).unwrap();

    std::fs::write(data.join("background_comment_template.txt"), TEST_TEMPLATE).unwrap();
    std::fs::write(data.join("multistep_template.txt"), TEST_TEMPLATE).unwrap();

    let dataset = data.join("problems.json");
    std::fs::write(&dataset, serde_json::to_string_pretty(problems).unwrap()).unwrap();
    // Catch fixture drift early: what we write must load back.
    parse_problems(&std::fs::read_to_string(&dataset).unwrap()).unwrap();

    let config = Config {
        dataset_path: dataset.to_string_lossy().to_string(),
        data_dir: data.to_string_lossy().to_string(),
        reference_dir: data.to_string_lossy().to_string(),
        temp_dir: root.join("tmp").to_string_lossy().to_string(),
        ..Config::default()
    };

    (temp_dir, config)
}

//! Code block extraction from model responses.

use regex::Regex;
use std::sync::LazyLock;

const PYTHON_FENCE: &str = "```python";
const FENCE: &str = "```";

/// `import x` and `from x import y` lines, at any indentation.
static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(import\s+\S.*|from\s+\S+\s+import\s+.*)$").expect("valid import regex")
});

/// Extract the code fragment embedded in a model response.
///
/// - Text after the first ```` ```python ```` up to the next fence, if present
/// - Otherwise the text between the first two ```` ``` ```` fences
/// - Otherwise the whole response
///
/// Import lines are dropped since dependencies are carried separately. Leading
/// blank lines and trailing whitespace are trimmed.
pub fn extract_code_block(response: &str) -> String {
    let block = if let Some(start) = response.find(PYTHON_FENCE) {
        let rest = &response[start + PYTHON_FENCE.len()..];
        rest.split(FENCE).next().unwrap_or_default()
    } else if response.contains(FENCE) {
        response.split(FENCE).nth(1).unwrap_or_default()
    } else {
        tracing::warn!("no fenced code block in response, using the full text");
        response
    };

    let kept: Vec<&str> = block
        .lines()
        .filter(|line| !IMPORT_LINE.is_match(line))
        .skip_while(|line| line.trim().is_empty())
        .collect();

    kept.join("\n").trim_end().to_string()
}

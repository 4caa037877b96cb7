//! Prompt template files.
//!
//! A template is plain text with named slots:
//!
//! - `{name}` - replaced by the value of slot `name`
//! - `{{` / `}}` - a literal brace
//!
//! The rules follow Python's `str.format` with keyword fields: a single `}`
//! is an error and slot names are taken verbatim, whitespace included.
//!
//! Templates are parsed once when the assembler is built, so a broken or
//! misspelled slot fails the run before any prompt is written.

use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Slots every prompt template may use.
pub const PROMPT_SLOTS: [&str; 3] = ["problem_steps_str", "next_step_str", "dependencies"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A slot has no value to fill it.
    #[error("undefined slot '{name}' at position {position} in template")]
    UndefinedSlot { name: String, position: usize },

    /// A `{` was found without a matching `}`.
    #[error("unmatched '{{' at position {position} in template")]
    UnmatchedBrace { position: usize },

    /// A slot with no name, such as `{}`.
    #[error("empty slot name at position {position} in template")]
    EmptySlotName { position: usize },

    /// A `}` that neither closes a slot nor is doubled.
    #[error("single '}}' at position {position} in template")]
    StrayClosingBrace { position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    /// `position` is the byte offset of the opening `{` in the source.
    Slot { name: String, position: usize },
}

/// A parsed prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(idx) = rest.find(['{', '}']) {
            text.push_str(&rest[..idx]);
            let position = offset + idx;
            let tail = &rest[idx..];

            let consumed = if tail.starts_with("{{") {
                text.push('{');
                2
            } else if tail.starts_with("}}") {
                text.push('}');
                2
            } else if tail.starts_with('}') {
                return Err(TemplateError::StrayClosingBrace { position });
            } else {
                let close = tail
                    .find('}')
                    .ok_or(TemplateError::UnmatchedBrace { position })?;
                let name = &tail[1..close];
                if name.is_empty() {
                    return Err(TemplateError::EmptySlotName { position });
                }
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Slot {
                    name: name.to_string(),
                    position,
                });
                close + 1
            };

            rest = &tail[consumed..];
            offset = position + consumed;
        }

        text.push_str(rest);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }

    /// Slot names in order of appearance, repeats included.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot { name, .. } => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Fail on the first slot not listed in `known`.
    pub fn check_slots(&self, known: &[&str]) -> Result<(), TemplateError> {
        for segment in &self.segments {
            if let Segment::Slot { name, position } = segment
                && !known.contains(&name.as_str())
            {
                return Err(TemplateError::UndefinedSlot {
                    name: name.clone(),
                    position: *position,
                });
            }
        }
        Ok(())
    }

    /// Fill every slot from `values`. Values are inserted verbatim.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot { name, position } => {
                    let value = values.get(name).ok_or_else(|| TemplateError::UndefinedSlot {
                        name: name.clone(),
                        position: *position,
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl FromStr for PromptTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse and render in one go.
#[cfg(test)]
pub fn render_template(
    template: &str,
    values: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    PromptTemplate::parse(template)?.render(values)
}

/// Build a slot map from key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_slots_substituted() {
        let values = vars([
            ("problem_steps_str", "step one"),
            ("next_step_str", "step two"),
            ("dependencies", "import numpy as np"),
        ]);
        let template = "PREVIOUS:\n{problem_steps_str}\nNEXT:\n{next_step_str}\nDEPS:\n{dependencies}";
        assert_eq!(
            render_template(template, &values).unwrap(),
            "PREVIOUS:\nstep one\nNEXT:\nstep two\nDEPS:\nimport numpy as np"
        );
    }

    #[test]
    fn test_escaped_braces() {
        let values = vars([("dependencies", "import scipy")]);
        let rendered = render_template("d = {{'a': 1}}\n{dependencies}", &values).unwrap();
        assert_eq!(rendered, "d = {'a': 1}\nimport scipy");
    }

    #[test]
    fn test_braces_in_values_pass_through() {
        let values = vars([("next_step_str", "x = {'k': {y}}")]);
        assert_eq!(
            render_template("{next_step_str}", &values).unwrap(),
            "x = {'k': {y}}"
        );
    }

    #[test]
    fn test_single_closing_brace_rejected() {
        assert_eq!(
            PromptTemplate::parse("a } b").unwrap_err(),
            TemplateError::StrayClosingBrace { position: 2 }
        );
        assert_eq!(
            PromptTemplate::parse("{{x}}}").unwrap_err(),
            TemplateError::StrayClosingBrace { position: 5 }
        );
    }

    #[test]
    fn test_slot_names_not_trimmed() {
        let template = PromptTemplate::parse("{ dependencies }").unwrap();
        assert_eq!(template.slots().collect::<Vec<_>>(), vec![" dependencies "]);
        assert_eq!(
            template.check_slots(&PROMPT_SLOTS).unwrap_err(),
            TemplateError::UndefinedSlot {
                name: " dependencies ".to_string(),
                position: 0,
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            PromptTemplate::parse("Steps: {problem_steps_str").unwrap_err(),
            TemplateError::UnmatchedBrace { position: 7 }
        );
        assert_eq!(
            PromptTemplate::parse("Hello {}").unwrap_err(),
            TemplateError::EmptySlotName { position: 6 }
        );
    }

    #[test]
    fn test_missing_value() {
        let err = render_template("Steps: {problem_steps}", &HashMap::new()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UndefinedSlot {
                name: "problem_steps".to_string(),
                position: 7,
            }
        );
    }

    #[test]
    fn test_slots_listed_in_order() {
        let template: PromptTemplate = "{a} {{b}} {c} {a}".parse().unwrap();
        assert_eq!(template.slots().collect::<Vec<_>>(), vec!["a", "c", "a"]);
    }

    #[test]
    fn test_check_slots() {
        let template = PromptTemplate::parse("{next_step_str}\n\n{dependencies}").unwrap();
        assert!(template.check_slots(&PROMPT_SLOTS).is_ok());

        let typo = PromptTemplate::parse("{dependencies}\n{next_step}").unwrap();
        assert_eq!(
            typo.check_slots(&PROMPT_SLOTS).unwrap_err(),
            TemplateError::UndefinedSlot {
                name: "next_step".to_string(),
                position: 15,
            }
        );
    }

    #[test]
    fn test_multibyte_positions() {
        let values = vars([("next_step_str", "∇²φ = ρ")]);
        assert_eq!(
            render_template("Équation: {next_step_str}", &values).unwrap(),
            "Équation: ∇²φ = ρ"
        );
        assert_eq!(
            PromptTemplate::parse("é {").unwrap_err(),
            TemplateError::UnmatchedBrace { position: 3 }
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TemplateError::UnmatchedBrace { position: 5 }.to_string(),
            "unmatched '{' at position 5 in template"
        );
        assert_eq!(
            TemplateError::EmptySlotName { position: 3 }.to_string(),
            "empty slot name at position 3 in template"
        );
        assert_eq!(
            TemplateError::StrayClosingBrace { position: 2 }.to_string(),
            "single '}' at position 2 in template"
        );
    }
}

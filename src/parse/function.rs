//! Function name and definition extraction from Python source text.
//!
//! Definitions are located with a line scan rather than a parser: a
//! definition spans its decorators, its (possibly multi-line) signature and
//! every following line that is more indented than the `def` or inside a
//! triple-quoted string. Blank lines and comments at the `def` column do not
//! end it. Quotes and comments are tokenized so brackets and triple quotes
//! inside ordinary strings are not mistaken for code.

use crate::error::{Result, StepwiseError};
use regex::Regex;
use std::sync::LazyLock;

static DEF_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdef\s+(\w+)\s*\(").expect("valid def regex"));

static CLASS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+(\w+)\s*[(:]").expect("valid class regex"));

/// Name declared by a function header (or a class header when no `def` exists).
pub fn extract_function_name(header: &str) -> Result<String> {
    DEF_NAME
        .captures(header)
        .or_else(|| CLASS_NAME.captures(header))
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| {
            StepwiseError::ExtractionError(format!(
                "function or class name not found in header '{}'",
                header.lines().next().unwrap_or_default()
            ))
        })
}

/// Source text of the definition of `name` in `code`.
///
/// When `name` is defined several times, the least-indented definition wins and,
/// among those, the last one: later definitions shadow earlier ones.
pub fn get_function_from_code(code: &str, name: &str) -> Option<String> {
    let pattern = format!(
        r"^(\s*)(?:async\s+)?(?:def|class)\s+{}\b",
        regex::escape(name)
    );
    let def_line = Regex::new(&pattern).ok()?;

    let lines: Vec<&str> = code.lines().collect();
    let (start, indent) = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| def_line.is_match(line))
        .map(|(idx, line)| (idx, indent_of(line)))
        .min_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))?;

    let mut first = start;
    while first > 0 {
        let prev = lines[first - 1];
        if prev.trim_start().starts_with('@') && indent_of(prev) == indent {
            first -= 1;
        } else {
            break;
        }
    }

    // Signature may span several lines until its brackets close.
    let mut open_triple = None;
    let mut depth = 0i32;
    let mut idx = start;
    loop {
        let scan = scan_line(lines[idx], open_triple);
        open_triple = scan.open_triple;
        depth += scan.depth_delta;
        if (depth <= 0 && open_triple.is_none()) || idx + 1 == lines.len() {
            break;
        }
        idx += 1;
    }

    // Shallow comments neither end the body nor extend it.
    let mut last = idx;
    for (line_idx, line) in lines.iter().enumerate().skip(idx + 1) {
        let inside = open_triple.is_some();
        open_triple = scan_line(line, open_triple).open_triple;

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if inside || indent_of(line) > indent {
            last = line_idx;
        } else if !text.starts_with('#') {
            break;
        }
    }

    Some(lines[first..=last].join("\n"))
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Lexical facts about one source line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LineScan {
    /// Net bracket depth change outside strings and comments.
    depth_delta: i32,
    /// Triple-quote delimiter still open at the end of the line.
    open_triple: Option<&'static str>,
}

/// Tokenize `line` far enough to count brackets and follow triple-quoted
/// strings, starting inside `open_triple` when a string carries over.
fn scan_line(line: &str, open_triple: Option<&'static str>) -> LineScan {
    let mut depth_delta = 0;
    let mut open = open_triple;
    let mut rest = line;

    loop {
        if let Some(delim) = open {
            match closing_end(rest, delim) {
                Some(end) => {
                    rest = &rest[end..];
                    open = None;
                }
                None => break,
            }
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        match ch {
            '#' => break,
            '"' | '\'' => {
                let (single, triple) = if ch == '"' {
                    ("\"", "\"\"\"")
                } else {
                    ("'", "'''")
                };
                if rest.starts_with(triple) {
                    rest = &rest[triple.len()..];
                    open = Some(triple);
                } else {
                    // An unterminated quote runs to the end of the line.
                    let body = &rest[1..];
                    rest = closing_end(body, single).map_or("", |end| &body[end..]);
                }
                continue;
            }
            '(' | '[' | '{' => depth_delta += 1,
            ')' | ']' | '}' => depth_delta -= 1,
            _ => {}
        }
        rest = &rest[ch.len_utf8()..];
    }

    LineScan {
        depth_delta,
        open_triple: open,
    }
}

/// Byte offset just past the first unescaped `delim` in `text`.
fn closing_end(text: &str, delim: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    while let Some((pos, ch)) = chars.next() {
        if ch == '\\' {
            chars.next();
        } else if text[pos..].starts_with(delim) {
            return Some(pos + delim.len());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_function_name() {
        let header = "def partial_derivs_vec(fct, delta):\n    '''Compute derivatives.'''";
        assert_eq!(extract_function_name(header).unwrap(), "partial_derivs_vec");
    }

    #[test]
    fn test_extract_function_name_with_spacing() {
        assert_eq!(extract_function_name("def  f_2 (x):").unwrap(), "f_2");
    }

    #[test]
    fn test_extract_class_name() {
        assert_eq!(
            extract_function_name("class Maxwell(object):\n    pass").unwrap(),
            "Maxwell"
        );
        assert_eq!(extract_function_name("class Grid:").unwrap(), "Grid");
    }

    #[test]
    fn test_def_preferred_over_class() {
        let header = "class Solver:\n    def step(self, dt):";
        assert_eq!(extract_function_name(header).unwrap(), "step");
    }

    #[test]
    fn test_extract_function_name_missing() {
        let err = extract_function_name("x = 1").unwrap_err();
        assert!(matches!(err, StepwiseError::ExtractionError(_)));
    }

    #[test]
    fn test_get_simple_function() {
        let code = "import numpy as np\n\ndef f(x):\n    y = x + 1\n    return y\n\nprint(f(1))\n";
        assert_eq!(
            get_function_from_code(code, "f").unwrap(),
            "def f(x):\n    y = x + 1\n    return y"
        );
    }

    #[test]
    fn test_name_prefix_does_not_match() {
        let code = "def foo_bar():\n    return 1\n\ndef foo():\n    return 2\n";
        assert_eq!(
            get_function_from_code(code, "foo").unwrap(),
            "def foo():\n    return 2"
        );
    }

    #[test]
    fn test_missing_function() {
        assert!(get_function_from_code("print('Hello, World!')", "f").is_none());
    }

    #[test]
    fn test_multiline_signature() {
        let code = "def g(a,\n      b,\n  c):\n    return a + b + c\nz = 0\n";
        assert_eq!(
            get_function_from_code(code, "g").unwrap(),
            "def g(a,\n      b,\n  c):\n    return a + b + c"
        );
    }

    #[test]
    fn test_docstring_at_column_zero() {
        let code = "def h():\n    \"\"\"Doc\nstill doc\n\"\"\"\n    return 1\n\nafter = 2\n";
        assert_eq!(
            get_function_from_code(code, "h").unwrap(),
            "def h():\n    \"\"\"Doc\nstill doc\n\"\"\"\n    return 1"
        );
    }

    #[test]
    fn test_decorators_included() {
        let code = "x = 1\n@cache\n@other(2)\ndef k(n):\n    return n\n";
        assert_eq!(
            get_function_from_code(code, "k").unwrap(),
            "@cache\n@other(2)\ndef k(n):\n    return n"
        );
    }

    #[test]
    fn test_class_definition() {
        let code = "class Grid:\n    def __init__(self):\n        self.n = 0\n\n    def size(self):\n        return self.n\n\ng = Grid()\n";
        assert_eq!(
            get_function_from_code(code, "Grid").unwrap(),
            "class Grid:\n    def __init__(self):\n        self.n = 0\n\n    def size(self):\n        return self.n"
        );
    }

    #[test]
    fn test_last_top_level_definition_wins() {
        let code = "def f():\n    return 1\n\ndef f():\n    return 2\n";
        assert_eq!(
            get_function_from_code(code, "f").unwrap(),
            "def f():\n    return 2"
        );
    }

    #[test]
    fn test_nested_definition_found_when_no_top_level() {
        let code = "class A:\n    def m(self):\n        return 3\n    x = 1\n";
        assert_eq!(
            get_function_from_code(code, "m").unwrap(),
            "    def m(self):\n        return 3"
        );
    }

    #[test]
    fn test_one_line_function() {
        let code = "def one(): return 1\ntwo = 2\n";
        assert_eq!(get_function_from_code(code, "one").unwrap(), "def one(): return 1");
    }

    #[test]
    fn test_trailing_blank_lines_dropped() {
        let code = "def f():\n    return 1\n\n\n";
        assert_eq!(get_function_from_code(code, "f").unwrap(), "def f():\n    return 1");
    }

    #[test]
    fn test_scan_line_ignores_strings_and_comments() {
        assert_eq!(scan_line(r#"f(a, '(' , ")""#, None).depth_delta, 1);
        assert_eq!(scan_line("x = 1  # (unclosed", None).depth_delta, 0);
        assert_eq!(scan_line("])", None).depth_delta, -2);
        assert_eq!(scan_line(r"s = 'it\'s ('", None).depth_delta, 0);
    }

    #[test]
    fn test_scan_line_tracks_triple_quotes() {
        let dq = Some(r#"""""#);
        assert_eq!(scan_line(r#"    """Doc"#, None).open_triple, dq);
        assert_eq!(scan_line(r#"still ''' inside"#, dq).open_triple, dq);

        let closed = scan_line(r#"end""" ("#, dq);
        assert_eq!(closed.open_triple, None);
        assert_eq!(closed.depth_delta, 1);

        assert_eq!(scan_line(r#"x = '"""'"#, None).open_triple, None);
        assert_eq!(scan_line(r#"x = "'''"  # """"#, None).open_triple, None);
    }

    #[test]
    fn test_comment_at_column_zero_inside_body() {
        let code = "def f(x):\n    y = x + 1\n# adjust\n    y = y * 2\n    return y\n";
        assert_eq!(
            get_function_from_code(code, "f").unwrap(),
            "def f(x):\n    y = x + 1\n# adjust\n    y = y * 2\n    return y"
        );
    }

    #[test]
    fn test_comment_after_body_not_included() {
        let code = "def f(x):\n    return x\n\n# helpers below\nz = 3\n";
        assert_eq!(get_function_from_code(code, "f").unwrap(), "def f(x):\n    return x");
    }

    #[test]
    fn test_indented_trailing_comment_kept() {
        let code = "def f(x):\n    return x\n    # done\n\ny = 1\n";
        assert_eq!(
            get_function_from_code(code, "f").unwrap(),
            "def f(x):\n    return x\n    # done"
        );
    }

    #[test]
    fn test_triple_quote_inside_plain_string() {
        let code = "def f(x):\n    sep = '\"\"\"'\n    return sep\n\nprint(f(1))\nother = 3\n";
        assert_eq!(
            get_function_from_code(code, "f").unwrap(),
            "def f(x):\n    sep = '\"\"\"'\n    return sep"
        );
    }

    #[test]
    fn test_docstring_opened_on_signature_line() {
        let code = "def f(x): \"\"\"Doc\nmore\"\"\"\n    return x\nz = 1\n";
        assert_eq!(
            get_function_from_code(code, "f").unwrap(),
            "def f(x): \"\"\"Doc\nmore\"\"\"\n    return x"
        );
    }
}

//! Detector: runs the rule catalog over one file's content.
//!
//! Output order within a file is category order (structural, deprecated,
//! sendable), not position order. Line numbers are 1-based and computed from
//! the number of newlines before each match.

use crate::models::{Category, Issue};
use crate::rules::{DEPRECATED_RULES, SENDABLE_RULE, STRUCTURAL_RULES};

/// Detect every cataloged issue in `content`.
///
/// An empty vector is the normal result for clean files.
pub fn detect(file: &str, content: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(detect_structural(file, content));
    issues.extend(detect_deprecated(file, content));
    issues.extend(detect_sendable(file, content));
    log::debug!("{}: {} issue(s)", file, issues.len());
    issues
}

/// 1-based line of a byte offset.
pub fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}

/// Line `n` (1-based) without its terminator, `\r` included. A trailing
/// newline does not start another line.
pub(crate) fn nth_line(content: &str, n: usize) -> Option<&str> {
    if n == 0 {
        return None;
    }
    content.split_inclusive('\n').nth(n - 1).map(|l| {
        let l = l.strip_suffix('\n').unwrap_or(l);
        l.strip_suffix('\r').unwrap_or(l)
    })
}

fn detect_structural(file: &str, content: &str) -> Vec<Issue> {
    let mut out = Vec::new();
    for rule in STRUCTURAL_RULES.iter() {
        for m in rule.pattern.find_iter(content) {
            out.push(Issue {
                file: file.to_string(),
                line: line_of(content, m.start()),
                category: Category::StructuralIdiom,
                message: rule.message.to_string(),
                suggestion: rule.suggestion.to_string(),
                idiom: Some(rule.idiom),
            });
        }
    }
    out
}

/// One issue per line, attributed to the first rule in catalog order that
/// matches it. Later rules on the same line surface after that fix and a
/// re-scan.
fn detect_deprecated(file: &str, content: &str) -> Vec<Issue> {
    let mut out = Vec::new();
    for (idx, line) in content.split('\n').enumerate() {
        let hit = DEPRECATED_RULES
            .iter()
            .find_map(|r| r.pattern.find(line).map(|m| (r, m.as_str())));
        if let Some((rule, matched)) = hit {
            out.push(Issue {
                file: file.to_string(),
                line: idx + 1,
                category: Category::DeprecatedApi,
                message: format!("Potential deprecated API usage: {}", matched),
                suggestion: format!("Consider using {} instead", rule.modern),
                idiom: None,
            });
        }
    }
    out
}

fn detect_sendable(file: &str, content: &str) -> Vec<Issue> {
    let rule = &*SENDABLE_RULE;
    if !rule.applies_to(content) {
        return Vec::new();
    }
    rule.declaration
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            if !rule.is_type_name(name) {
                return None;
            }
            Some(Issue {
                file: file.to_string(),
                line: line_of(content, whole.start()),
                category: Category::ConcurrencySafety,
                message: format!(
                    "Class {} might need Sendable conformance for use in async contexts",
                    name
                ),
                suggestion: "Add \": @unchecked Sendable\" to class definition or make class thread-safe"
                    .to_string(),
                idiom: None,
            })
        })
        .collect()
}

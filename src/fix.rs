//! Fix synthesizer.
//!
//! A fix is always derived from the file as it is *now*, not from the content
//! seen during the scan: earlier applies may have shifted lines. When the
//! re-read line no longer has the shape the issue was raised for, the result
//! is a manual fix (`replacement == None`) instead of a guess.

use crate::error::FixError;
use crate::detect::nth_line;
use crate::models::{Category, Fix, Issue};
use crate::rules::{first_deprecated_match, Idiom, SENDABLE_RULE, STRUCTURAL_RULES};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;

/// Fallback `Spacer` height when the spacing argument is not a literal number.
pub const DEFAULT_SPACING: &str = "20";
/// Binding introduced when a ternary is hoisted out of a `Text` interpolation.
pub const HOISTED_NAME: &str = "computed_value";

static STACK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)VStack\(\s*spacing:([^)]*)\)\s*\{\s*$").expect("valid regex"));
static SPACING_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*$").expect("valid regex"));
static TERNARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\\((.+?\?.+?:.+?)\)").expect("valid regex"));
static INDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*").expect("valid regex"));

/// Re-read the issue's file and synthesize a fix for its line.
///
/// Only read failures are errors; every "cannot fix" outcome is a manual
/// `Fix`.
pub fn synthesize(issue: &Issue) -> Result<Fix, FixError> {
    let content = fs::read_to_string(&issue.file).map_err(|source| FixError::Io {
        path: issue.file.clone().into(),
        source,
    })?;
    Ok(synthesize_from(issue, &content))
}

/// Pure half of [`synthesize`]: compute the fix against `content`.
pub fn synthesize_from(issue: &Issue, content: &str) -> Fix {
    let line = match nth_line(content, issue.line) {
        Some(l) => l,
        None => {
            return Fix::manual(
                &issue.file,
                issue.line,
                "",
                format!(
                    "Line {} no longer exists; manual fix required (re-scan the file)",
                    issue.line
                ),
            )
        }
    };
    match issue.category {
        Category::StructuralIdiom => fix_structural(issue, line),
        Category::DeprecatedApi => fix_deprecated(issue, line),
        Category::ConcurrencySafety => fix_sendable(issue, line),
    }
}

fn indent_of(line: &str) -> &str {
    INDENT_RE.find(line).map(|m| m.as_str()).unwrap_or("")
}

/// Dispatch on the idiom recorded at detection time. Issues built without
/// one fall back to the first structural rule matching the current line.
fn fix_structural(issue: &Issue, line: &str) -> Fix {
    let idiom = issue.idiom.or_else(|| {
        STRUCTURAL_RULES
            .iter()
            .find(|r| r.pattern.is_match(line))
            .map(|r| r.idiom)
    });
    match idiom {
        Some(Idiom::StackSpacing) => fix_stack_spacing(issue, line),
        Some(Idiom::TernaryInterpolation) => fix_ternary(issue, line),
        None => Fix::manual(
            &issue.file,
            issue.line,
            line,
            "Manual fix required for this buildExpression issue",
        ),
    }
}

/// `VStack(spacing: N) {` alone on its line becomes `VStack {` plus a
/// `Spacer`. Any other argument, or trailing content, would be lost by the
/// rewrite, so those shapes are manual.
fn fix_stack_spacing(issue: &Issue, line: &str) -> Fix {
    let arg = match STACK_LINE_RE.captures(line) {
        Some(c) => c.get(2).map(|m| m.as_str()).unwrap_or(""),
        None => {
            return Fix::manual(
                &issue.file,
                issue.line,
                line,
                "VStack(spacing:) is not alone on its line; manual fix required",
            )
        }
    };
    if arg.contains(',') {
        return Fix::manual(
            &issue.file,
            issue.line,
            line,
            "VStack takes arguments besides spacing:; manual fix required",
        );
    }
    let indent = indent_of(line);
    let spacing = SPACING_VALUE_RE
        .captures(arg)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_SPACING);
    Fix {
        file: issue.file.clone(),
        line: issue.line,
        original: line.to_string(),
        replacement: Some(format!(
            "{indent}VStack {{\n{indent}    Spacer().frame(height: {spacing})",
            indent = indent,
            spacing = spacing
        )),
        message: format!(
            "Replace VStack(spacing: {}) with VStack and explicit Spacer",
            spacing
        ),
    }
}

fn fix_ternary(issue: &Issue, line: &str) -> Fix {
    let caps = match TERNARY_RE.captures(line) {
        Some(c) if line.contains("Text(") => c,
        _ => {
            return Fix::manual(
                &issue.file,
                issue.line,
                line,
                "Manual fix required for this buildExpression issue",
            )
        }
    };
    let expr = &caps[1];
    let rewritten = line.replacen(
        &format!("\\({})", expr),
        &format!("\\({})", HOISTED_NAME),
        1,
    );
    Fix {
        file: issue.file.clone(),
        line: issue.line,
        original: line.to_string(),
        replacement: Some(format!(
            "{}let {} = {}\n{}",
            indent_of(line),
            HOISTED_NAME,
            expr,
            rewritten
        )),
        message: "Extract conditional expression to a variable before using in Text".to_string(),
    }
}

fn fix_deprecated(issue: &Issue, line: &str) -> Fix {
    let rule = match first_deprecated_match(line) {
        Some(r) => r,
        None => {
            return Fix::manual(
                &issue.file,
                issue.line,
                line,
                "Manual fix required for this deprecated API",
            )
        }
    };
    match rule.template {
        Some(template) => Fix {
            file: issue.file.clone(),
            line: issue.line,
            original: line.to_string(),
            replacement: Some(rule.pattern.replace_all(line, template).into_owned()),
            message: format!(
                "Replace deprecated API with modern equivalent ({})",
                rule.modern
            ),
        },
        None => Fix::manual(
            &issue.file,
            issue.line,
            line,
            format!(
                "Manual fix required for this deprecated API; consider {}",
                rule.modern
            ),
        ),
    }
}

fn fix_sendable(issue: &Issue, line: &str) -> Fix {
    let rule = &*SENDABLE_RULE;
    let name = rule
        .declaration
        .captures_iter(line)
        .filter_map(|c| c.get(1))
        .find(|m| rule.is_type_name(m.as_str()));
    let name = match name {
        Some(m) => m,
        None => {
            return Fix::manual(
                &issue.file,
                issue.line,
                line,
                "Manual fix required for Sendable conformance",
            )
        }
    };

    let after_name = skip_generic_clause(line, name.end());
    let new_line = match conformance_colon(line, after_name) {
        Some(colon) => format!(
            "{} @unchecked Sendable,{}",
            &line[..=colon],
            &line[colon + 1..]
        ),
        None => format!(
            "{}: @unchecked Sendable{}",
            &line[..after_name],
            &line[after_name..]
        ),
    };
    Fix {
        file: issue.file.clone(),
        line: issue.line,
        original: line.to_string(),
        replacement: Some(new_line),
        message: format!("Add @unchecked Sendable conformance to {}", name.as_str()),
    }
}

/// Byte offset just past a `<...>` clause starting at `pos`, or `pos` itself.
fn skip_generic_clause(line: &str, pos: usize) -> usize {
    let bytes = line.as_bytes();
    if bytes.get(pos) != Some(&b'<') {
        return pos;
    }
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate().skip(pos) {
        match b {
            b'<' => depth += 1,
            b'>' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
    }
    pos
}

/// Offset of the inheritance-list colon after the type name, if any.
///
/// Stops at the body brace or a `where` clause; colons nested in angle
/// brackets belong to generic constraints.
fn conformance_colon(line: &str, from: usize) -> Option<usize> {
    let mut depth = 0i32;
    let rest = &line[from..];
    for (i, ch) in rest.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth -= 1,
            '{' => return None,
            ':' if depth == 0 => return Some(from + i),
            _ => {}
        }
        if depth == 0 && rest[i..].starts_with(" where ") {
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(category: Category, line: usize) -> Issue {
        Issue {
            file: "mem.swift".into(),
            line,
            category,
            message: String::new(),
            suggestion: String::new(),
            idiom: None,
        }
    }

    #[test]
    fn test_vstack_spacing_becomes_stack_and_spacer() {
        let content = "struct V {\n    VStack(spacing: 12) {\n    }\n}\n";
        let fix = synthesize_from(&issue(Category::StructuralIdiom, 2), content);
        assert_eq!(fix.original, "    VStack(spacing: 12) {");
        let rep = fix.replacement.unwrap();
        let lines: Vec<&str> = rep.split('\n').collect();
        assert_eq!(lines, vec!["    VStack {", "        Spacer().frame(height: 12)"]);
        assert!(indent_of(lines[1]).len() > indent_of(lines[0]).len());
    }

    #[test]
    fn test_vstack_non_literal_spacing_falls_back() {
        let content = "VStack(spacing: theme.gap) {\n";
        let fix = synthesize_from(&issue(Category::StructuralIdiom, 1), content);
        assert!(fix
            .replacement
            .unwrap()
            .ends_with("Spacer().frame(height: 20)"));
    }

    #[test]
    fn test_vstack_sharing_line_with_content_is_manual() {
        let content = "VStack(spacing: 8) { Text(\"a\") }\n";
        let fix = synthesize_from(&issue(Category::StructuralIdiom, 1), content);
        assert!(fix.is_manual());
        assert_eq!(fix.original, "VStack(spacing: 8) { Text(\"a\") }");
    }

    #[test]
    fn test_vstack_spacing_only_accepts_a_literal() {
        for arg in ["Metrics.padding16", "theme.gap * 2", "k2"] {
            let content = format!("VStack(spacing: {}) {{\n", arg);
            let fix = synthesize_from(&issue(Category::StructuralIdiom, 1), &content);
            assert_eq!(
                fix.replacement.as_deref(),
                Some("VStack {\n    Spacer().frame(height: 20)"),
                "spacing argument {:?}",
                arg
            );
        }
        let fix = synthesize_from(&issue(Category::StructuralIdiom, 1), "VStack(spacing: 7.5) {\n");
        assert!(fix.replacement.unwrap().ends_with("height: 7.5)"));
    }

    #[test]
    fn test_vstack_with_extra_arguments_is_manual() {
        let content = "    VStack(spacing: 12, alignment: .leading) {\n";
        let fix = synthesize_from(&issue(Category::StructuralIdiom, 1), content);
        assert!(fix.is_manual());
        assert_eq!(fix.original, "    VStack(spacing: 12, alignment: .leading) {");
    }

    #[test]
    fn test_recorded_idiom_selects_the_rewrite() {
        let content = "VStack(spacing: 8) { Text(\"\\(a ? \"x\" : \"y\")\") }\n";
        let ternary = Issue {
            idiom: Some(Idiom::TernaryInterpolation),
            ..issue(Category::StructuralIdiom, 1)
        };
        let fix = synthesize_from(&ternary, content);
        let rep = fix.replacement.unwrap();
        let lines: Vec<&str> = rep.split('\n').collect();
        assert_eq!(lines[0], "let computed_value = a ? \"x\" : \"y\"");
        assert_eq!(lines[1], "VStack(spacing: 8) { Text(\"\\(computed_value)\") }");

        let stack = Issue {
            idiom: Some(Idiom::StackSpacing),
            ..issue(Category::StructuralIdiom, 1)
        };
        assert!(synthesize_from(&stack, content).is_manual());
    }

    #[test]
    fn test_detected_issues_carry_their_idiom() {
        let content = "VStack(spacing: 8) { Text(\"\\(a ? \"x\" : \"y\")\") }\n";
        let issues = crate::detect::detect("mem.swift", content);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].idiom, Some(Idiom::StackSpacing));
        assert_eq!(issues[1].idiom, Some(Idiom::TernaryInterpolation));
        assert!(synthesize_from(&issues[1], content)
            .replacement
            .unwrap()
            .starts_with("let computed_value"));
    }

    #[test]
    fn test_ternary_is_hoisted_into_binding() {
        let content = "        Text(\"Mode: \\(isOn ? \"On\" : \"Off\")\")\n";
        let fix = synthesize_from(&issue(Category::StructuralIdiom, 1), content);
        let rep = fix.replacement.unwrap();
        let lines: Vec<&str> = rep.split('\n').collect();
        assert_eq!(lines[0], "        let computed_value = isOn ? \"On\" : \"Off\"");
        assert_eq!(lines[1], "        Text(\"Mode: \\(computed_value)\")");
    }

    #[test]
    fn test_structural_drift_is_manual() {
        let content = "let x = 1\n";
        let fix = synthesize_from(&issue(Category::StructuralIdiom, 1), content);
        assert!(fix.is_manual());
    }

    #[test]
    fn test_deprecated_duration_rewrite_keeps_receiver() {
        let content = "let d = asset.duration\n";
        let fix = synthesize_from(&issue(Category::DeprecatedApi, 1), content);
        assert_eq!(
            fix.replacement.as_deref(),
            Some("let d = try await asset.load(.duration)")
        );
    }

    #[test]
    fn test_deprecated_tracks_and_cgimage_templates() {
        let content = "let ts = movie.tracks(withMediaType: .video)\nlet img = gen.copyCGImage(at: time, actualTime: nil)\n";
        let f1 = synthesize_from(&issue(Category::DeprecatedApi, 1), content);
        assert_eq!(
            f1.replacement.as_deref(),
            Some("let ts = try await movie.loadTracks(withMediaType: .video)")
        );
        let f2 = synthesize_from(&issue(Category::DeprecatedApi, 2), content);
        let rep = f2.replacement.unwrap();
        assert!(rep.contains("gen.generateCGImageAsynchronously(for: time)"));
    }

    #[test]
    fn test_deprecated_without_template_is_manual() {
        let content = "let a = AVAsset.init(url:)\n";
        let fix = synthesize_from(&issue(Category::DeprecatedApi, 1), content);
        assert!(fix.is_manual());
        assert!(fix.message.contains("AVURLAsset(url:)"));
    }

    #[test]
    fn test_stale_line_number_is_manual() {
        let content = "let d = asset.duration\n";
        let fix = synthesize_from(&issue(Category::DeprecatedApi, 40), content);
        assert!(fix.is_manual());
        assert_eq!(fix.original, "");
        let moved = synthesize_from(&issue(Category::DeprecatedApi, 2), "\nlet x = 1\n");
        assert!(moved.is_manual());
        assert_eq!(moved.original, "let x = 1");
    }

    #[test]
    fn test_sendable_appends_new_clause() {
        let content = "final class Loader {\n";
        let fix = synthesize_from(&issue(Category::ConcurrencySafety, 1), content);
        assert_eq!(
            fix.replacement.as_deref(),
            Some("final class Loader: @unchecked Sendable {")
        );
    }

    #[test]
    fn test_sendable_extends_existing_list() {
        let content = "class Loader: NSObject, ObservableObject {\n";
        let fix = synthesize_from(&issue(Category::ConcurrencySafety, 1), content);
        assert_eq!(
            fix.replacement.as_deref(),
            Some("class Loader: @unchecked Sendable, NSObject, ObservableObject {")
        );
    }

    #[test]
    fn test_sendable_respects_generic_clause() {
        let content = "class Box<T: Equatable> {\n";
        let fix = synthesize_from(&issue(Category::ConcurrencySafety, 1), content);
        assert_eq!(
            fix.replacement.as_deref(),
            Some("class Box<T: Equatable>: @unchecked Sendable {")
        );
        let listed = "class Box<T: Equatable>: Base {\n";
        let fix = synthesize_from(&issue(Category::ConcurrencySafety, 1), listed);
        assert_eq!(
            fix.replacement.as_deref(),
            Some("class Box<T: Equatable>: @unchecked Sendable, Base {")
        );
    }

    #[test]
    fn test_crlf_line_is_read_without_carriage_return() {
        let content = "let d = asset.duration\r\nlet e = 1\r\n";
        let fix = synthesize_from(&issue(Category::DeprecatedApi, 1), content);
        assert_eq!(fix.original, "let d = asset.duration");
        assert!(!fix.replacement.unwrap().contains('\r'));
    }
}

//! Rule catalog: the static, ordered table of detection rules.
//!
//! Three groups, each with its own fix policy in `fix`:
//! - `STRUCTURAL_RULES`: SwiftUI idioms known to break `buildExpression`.
//! - `DEPRECATED_RULES`: obsolete AVFoundation call shapes. Each entry carries
//!   both the detection pattern and its replacement template, so detection and
//!   fixing can never disagree on what matches. First match wins per line.
//! - `SENDABLE_RULE`: class declarations in files that look concurrent and
//!   carry no `Sendable` conformance anywhere.
//!
//! The catalog is pure data; nothing here touches the filesystem.

use once_cell::sync::Lazy;
use regex::Regex;

/// Which structural idiom a rule recognizes. Detection records it on the
/// issue and the fix synthesizer dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idiom {
    StackSpacing,
    TernaryInterpolation,
}

pub struct StructuralRule {
    pub idiom: Idiom,
    pub pattern: Regex,
    pub message: &'static str,
    pub suggestion: &'static str,
}

pub struct DeprecatedRule {
    pub pattern: Regex,
    /// Modern API name shown in suggestions.
    pub modern: &'static str,
    /// `$n` references resolve to the pattern's capture groups. `None` means
    /// the call shape is known but has no safe textual rewrite.
    pub template: Option<&'static str>,
}

pub struct SendableRule {
    pub declaration: Regex,
    pub async_context: Regex,
    pub conformance: Regex,
    /// Identifiers that follow `class` as a member modifier, not a type name.
    pub member_keywords: &'static [&'static str],
}

impl SendableRule {
    /// Whole-file gate: any `Task`/`async` token and no `Sendable` conformance
    /// anywhere. Reachability is not analyzed.
    pub fn applies_to(&self, content: &str) -> bool {
        self.async_context.is_match(content) && !self.conformance.is_match(content)
    }

    pub fn is_type_name(&self, name: &str) -> bool {
        !self.member_keywords.contains(&name)
    }
}

fn re(p: &str) -> Regex {
    Regex::new(p).expect("catalog pattern must compile")
}

pub static STRUCTURAL_RULES: Lazy<Vec<StructuralRule>> = Lazy::new(|| {
    vec![
        StructuralRule {
            idiom: Idiom::StackSpacing,
            pattern: re(r"VStack\(spacing:.*\)"),
            message: "Potential buildExpression issue with VStack spacing parameter",
            suggestion: "Replace with VStack {} and explicit Spacer().frame(height: X) elements",
        },
        StructuralRule {
            idiom: Idiom::TernaryInterpolation,
            pattern: re(r#"Text\(".*\\\(.*\?.*:.*\).*"\)"#),
            message: "Potential buildExpression issue with conditional expression in Text interpolation",
            suggestion: "Extract the conditional expression to a separate variable before using in Text",
        },
    ]
});

pub static DEPRECATED_RULES: Lazy<Vec<DeprecatedRule>> = Lazy::new(|| {
    vec![
        DeprecatedRule {
            pattern: re(r"\bAVAsset\(url:\s*([^)\n]+?)\)"),
            modern: "AVURLAsset(url:",
            template: Some("AVURLAsset(url: $1)"),
        },
        DeprecatedRule {
            pattern: re(r"\b(\w+)\.duration\b"),
            modern: "asset.load(.duration)",
            template: Some("try await ${1}.load(.duration)"),
        },
        DeprecatedRule {
            pattern: re(r"\b(\w+)\.tracks\(withMediaType:\s*([^)\n]+?)\)"),
            modern: "asset.loadTracks(withMediaType:",
            template: Some("try await ${1}.loadTracks(withMediaType: $2)"),
        },
        DeprecatedRule {
            pattern: re(r"\b(\w+)\.nominalFrameRate\b"),
            modern: "videoTrack.load(.nominalFrameRate)",
            template: Some("try await ${1}.load(.nominalFrameRate)"),
        },
        DeprecatedRule {
            pattern: re(r"\b(\w+)\.naturalSize\b"),
            modern: "videoTrack.load(.naturalSize)",
            template: Some("try await ${1}.load(.naturalSize)"),
        },
        DeprecatedRule {
            pattern: re(
                r"\b(\w+)\.copyCGImage\(at:\s*([^,\n]+?),\s*actualTime:\s*([^)\n]+?)\)",
            ),
            modern: "generateCGImageAsynchronously(for:",
            template: Some(
                "${1}.generateCGImageAsynchronously(for: $2) { cgImage, actualTime, error in",
            ),
        },
        DeprecatedRule {
            pattern: re(r"\binit\(url:\)"),
            modern: "AVURLAsset(url:)",
            template: None,
        },
    ]
});

pub static SENDABLE_RULE: Lazy<SendableRule> = Lazy::new(|| SendableRule {
    declaration: re(r"\bclass\s+([A-Za-z_]\w*)"),
    async_context: re(r"\b(?:Task|async)\b"),
    conformance: re(r"[:,]\s*(?:@unchecked\s+)?Sendable\b"),
    member_keywords: &[
        "func",
        "var",
        "let",
        "subscript",
        "override",
        "init",
        "deinit",
    ],
});

/// First deprecated rule matching `line`, in catalog order.
pub fn first_deprecated_match(line: &str) -> Option<&'static DeprecatedRule> {
    DEPRECATED_RULES.iter().find(|r| r.pattern.is_match(line))
}

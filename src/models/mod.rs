//! Shared data models for scan results, fixes, and report output.

pub mod fix;

use crate::rules::Idiom;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub use fix::{ApplyStatus, Fix};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Issue kinds; each kind has its own detection rules and fix policy.
pub enum Category {
    /// SwiftUI builder idioms that trip `buildExpression` overload resolution.
    #[serde(rename = "buildExpression")]
    StructuralIdiom,
    #[serde(rename = "deprecated_api")]
    DeprecatedApi,
    /// Classes that look shared across concurrency boundaries.
    #[serde(rename = "sendable_conformance")]
    ConcurrencySafety,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::StructuralIdiom => "buildExpression",
            Category::DeprecatedApi => "deprecated_api",
            Category::ConcurrencySafety => "sendable_conformance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A single detected issue with its location at scan time.
pub struct Issue {
    pub file: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub category: Category,
    pub message: String,
    pub suggestion: String,
    /// Structural sub-rule that raised the issue; selects the fix strategy.
    #[serde(skip)]
    pub idiom: Option<Idiom>,
}

#[derive(Serialize, Debug, Default)]
/// Aggregated scan summary used by printers.
pub struct Summary {
    pub issues: usize,
    pub files: usize,
    pub by_category: BTreeMap<String, usize>,
}

impl Summary {
    pub fn from_issues(issues: &[Issue], files: usize) -> Self {
        let mut by_category = BTreeMap::new();
        for is in issues {
            *by_category.entry(is.category.to_string()).or_insert(0) += 1;
        }
        Summary {
            issues: issues.len(),
            files,
            by_category,
        }
    }
}

#[derive(Serialize, Debug)]
/// Report container: every issue of a scan plus its summary.
pub struct Report<'a> {
    pub issues: &'a [Issue],
    pub summary: Summary,
}

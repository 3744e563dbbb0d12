//! Output rendering for analyze, report, and fix commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is the issue
//! list plus a top-level summary.

use crate::models::{Category, Fix, Issue, Report, Summary};
use crate::utils::{display_path, use_colors};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

/// Print scan results in the requested format.
pub fn print_issues(issues: &[Issue], summary: Summary, root: &Path, output: &str) {
    match output {
        "json" => println!("{}", to_pretty(&compose_report_json(issues, summary))),
        _ => {
            let color = use_colors(output);
            let header = format!("Found {} potential issues", issues.len());
            if color {
                println!("{}", header.bold());
            } else {
                println!("{}", header);
            }
            for (i, is) in issues.iter().enumerate() {
                let kind = if color {
                    match is.category {
                        Category::StructuralIdiom => is.category.magenta().bold().to_string(),
                        Category::DeprecatedApi => is.category.yellow().bold().to_string(),
                        Category::ConcurrencySafety => is.category.cyan().bold().to_string(),
                    }
                } else {
                    is.category.to_string()
                };
                let loc = format!("{}:{}", display_path(root, &is.file), is.line);
                let loc = if color { loc.bold().to_string() } else { loc };
                println!("\n#{} {} {}", i, kind, loc);
                println!("  {}", is.message);
                println!("  Suggestion: {}", is.suggestion);
            }
            let summary_line = format!(
                "— Summary — issues={} files={}",
                summary.issues, summary.files
            );
            if color {
                println!("\n{}", summary_line.bold());
            } else {
                println!("\n{}", summary_line);
            }
        }
    }
}

/// Print one synthesized fix as a before/after preview.
pub fn print_fix(index: usize, fix: &Fix, root: &Path, output: &str) {
    match output {
        "json" => println!("{}", to_pretty(&compose_fix_json(index, fix))),
        _ => {
            let color = use_colors(output);
            let title = format!(
                "Suggested fix for issue {} ({}:{}):",
                index,
                display_path(root, &fix.file),
                fix.line
            );
            if color {
                println!("{}", title.bold());
            } else {
                println!("{}", title);
            }
            println!("  {}", fix.message);
            for l in fix.original.lines() {
                if color {
                    println!("{}", format!("- {}", l).red());
                } else {
                    println!("- {}", l);
                }
            }
            match fix.replacement.as_deref() {
                Some(rep) => {
                    for l in rep.split('\n') {
                        if color {
                            println!("{}", format!("+ {}", l).green());
                        } else {
                            println!("+ {}", l);
                        }
                    }
                }
                None => println!("  (no automatic fix; edit by hand)"),
            }
        }
    }
}

fn to_pretty(v: &JsonVal) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(issues: &[Issue], summary: Summary) -> JsonVal {
    let report = Report { issues, summary };
    serde_json::to_value(&report).unwrap_or(JsonVal::Null)
}

/// Compose fix JSON object (pure) for testing/snapshot purposes.
pub fn compose_fix_json(index: usize, fix: &Fix) -> JsonVal {
    json!({
        "index": index,
        "fix": fix,
        "automatic": !fix.is_manual(),
    })
}

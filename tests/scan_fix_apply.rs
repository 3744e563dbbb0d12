use std::fs;
use std::path::Path;
use swiftmend::config::Effective;
use swiftmend::error::{ApplyError, FixError};
use swiftmend::models::{ApplyStatus, Category};
use swiftmend::scan::Scan;
use swiftmend::{apply, detect, synthesize};
use tempfile::tempdir;

fn effective(root: &Path) -> Effective {
    Effective {
        repo_root: root.to_path_buf(),
        ..Effective::default()
    }
}

fn ten_line_view() -> String {
    let mut lines: Vec<String> = vec![
        "import SwiftUI".into(),
        "".into(),
        "struct ContentView: View {".into(),
        "    var body: some View {".into(),
        "    VStack(spacing: 12) {".into(),
        "            Text(\"Hello\")".into(),
        "        }".into(),
        "    }".into(),
        "}".into(),
        "// end".into(),
    ];
    lines.push(String::new());
    lines.join("\n")
}

#[test]
fn vstack_scenario_expands_ten_lines_to_eleven() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ContentView.swift");
    let src = ten_line_view();
    fs::write(&path, &src).unwrap();

    let scan = Scan::run(&effective(dir.path()));
    assert_eq!(scan.issues.len(), 1);
    assert_eq!(scan.issues[0].line, 5);
    assert_eq!(scan.issues[0].category, Category::StructuralIdiom);

    let fix = scan.fix(0).unwrap();
    assert_eq!(
        fix.replacement.as_deref(),
        Some("    VStack {\n        Spacer().frame(height: 12)")
    );

    let status = apply(&fix).unwrap();
    assert!(matches!(status, ApplyStatus::Applied { line: 5, .. }));

    let after = fs::read_to_string(&path).unwrap();
    let before_lines: Vec<&str> = src.lines().collect();
    let after_lines: Vec<&str> = after.lines().collect();
    assert_eq!(after_lines.len(), 11);
    assert_eq!(after_lines[..4], before_lines[..4]);
    assert_eq!(after_lines[4], "    VStack {");
    assert_eq!(after_lines[5], "        Spacer().frame(height: 12)");
    assert_eq!(after_lines[6..], before_lines[5..]);

    // Idempotence: the rewritten line no longer triggers.
    assert!(detect(&path.to_string_lossy(), &after).is_empty());
}

#[test]
fn duration_scenario_rewrites_to_async_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Player.swift");
    fs::write(&path, "let d = asset.duration\n").unwrap();

    let scan = Scan::run(&effective(dir.path()));
    assert_eq!(scan.issues.len(), 1);
    assert_eq!(scan.issues[0].category, Category::DeprecatedApi);

    let fix = scan.fix(0).unwrap();
    let rep = fix.replacement.clone().unwrap();
    assert!(rep.contains("asset"));
    assert!(rep.contains("load(.duration)"));

    apply(&fix).unwrap();
    let after = fs::read_to_string(&path).unwrap();
    assert_eq!(after, "let d = try await asset.load(.duration)\n");
    assert!(Scan::run(&effective(dir.path())).issues.is_empty());
}

#[test]
fn sendable_fix_names_type_and_adds_annotation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Loader.swift");
    fs::write(
        &path,
        "final class Loader {\n    func load() async {}\n}\n",
    )
    .unwrap();

    let scan = Scan::run(&effective(dir.path()));
    assert_eq!(scan.issues.len(), 1);
    let fix = scan.fix(0).unwrap();
    let rep = fix.replacement.clone().unwrap();
    assert!(rep.contains("Loader"));
    assert!(rep.contains("@unchecked Sendable"));
    assert!(!fix.original.contains("@unchecked Sendable"));

    apply(&fix).unwrap();
    // Whole-file heuristic: a conformance anywhere silences the rule.
    assert!(Scan::run(&effective(dir.path())).issues.is_empty());
}

#[test]
fn index_past_end_is_invalid_index() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("A.swift"), "let d = asset.duration\n").unwrap();
    let scan = Scan::run(&effective(dir.path()));
    assert!(matches!(
        scan.fix(scan.issues.len()),
        Err(FixError::InvalidIndex { index: 1, len: 1 })
    ));
}

#[test]
fn stale_issue_after_edit_degrades_to_manual() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("A.swift");
    fs::write(&path, "let a = 1\nlet d = asset.duration\n").unwrap();
    let scan = Scan::run(&effective(dir.path()));
    assert_eq!(scan.issues[0].line, 2);

    // The file changes between scan and fix.
    fs::write(&path, "let d = 0\n").unwrap();
    let fix = synthesize(&scan.issues[0]).unwrap();
    assert!(fix.replacement.is_none());
    assert!(matches!(
        apply(&fix).unwrap(),
        ApplyStatus::NotApplicable { .. }
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "let d = 0\n");
}

#[test]
fn reapplying_a_fix_is_refused_and_file_is_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ContentView.swift");
    fs::write(&path, ten_line_view()).unwrap();
    let scan = Scan::run(&effective(dir.path()));
    let fix = scan.fix(0).unwrap();

    apply(&fix).unwrap();
    let once = fs::read_to_string(&path).unwrap();
    assert!(matches!(
        apply(&fix),
        Err(ApplyError::StaleTarget { line: 5, .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), once);
    assert_eq!(once.lines().count(), 11);
}

#[test]
fn apply_after_file_shrinks_is_out_of_range() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("A.swift");
    fs::write(&path, "let a = 1\nlet d = asset.duration\n").unwrap();
    let scan = Scan::run(&effective(dir.path()));
    let fix = scan.fix(0).unwrap();

    fs::write(&path, "let a = 1\n").unwrap();
    assert!(matches!(
        apply(&fix),
        Err(ApplyError::LineOutOfRange { line: 2, len: 1, .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "let a = 1\n");
}

#[test]
fn bottom_up_application_keeps_every_target_valid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Mixed.swift");
    fs::write(
        &path,
        "VStack(spacing: 8) {\n}\nlet d = asset.duration\nlet s = track.naturalSize\n",
    )
    .unwrap();
    let scan = Scan::run(&effective(dir.path()));
    assert_eq!(scan.issues.len(), 3);

    for index in scan.bottom_up_order() {
        let fix = scan.fix(index).unwrap();
        assert!(fix.replacement.is_some());
        apply(&fix).unwrap();
    }
    let after = fs::read_to_string(&path).unwrap();
    assert_eq!(
        after,
        "VStack {\n    Spacer().frame(height: 8)\n}\nlet d = try await asset.load(.duration)\nlet s = try await track.load(.naturalSize)\n"
    );
    assert!(detect("Mixed.swift", &after).is_empty());
}

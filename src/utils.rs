//! Small terminal helpers shared by the binary and printers.

use owo_colors::OwoColorize;
use std::path::Path;

/// Colors are disabled by `NO_COLOR` and for JSON output.
pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if use_colors("human") {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("error:", |s| s.red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note:", |s| s.yellow().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("info:", |s| s.blue().bold().to_string())
}

/// `file` relative to `root` for display; unchanged when not under `root`.
pub fn display_path(root: &Path, file: &str) -> String {
    pathdiff::diff_paths(file, root)
        .filter(|p| !p.starts_with(".."))
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string())
}

//! Applier: writes one synthesized fix back to disk.
//!
//! Exactly one physical line is replaced; every other byte of the file is
//! kept, including each line's own terminator. Replacement lines are joined
//! with the file's dominant newline so CRLF files stay CRLF.
//!
//! The target line must still equal `Fix::original`; otherwise nothing is
//! written. Applying the same fix twice is therefore refused the second time.
//!
//! Applying a multi-line fix shifts every later line. Issues recorded for
//! those lines are stale until the file is scanned again.

use crate::detect::nth_line;
use crate::error::ApplyError;
use crate::models::{ApplyStatus, Fix};
use std::fs;
use std::path::Path;

/// Apply `fix` to its file.
///
/// Manual fixes return `NotApplicable` without touching the file. A target
/// line that no longer exists, or no longer matches `fix.original`, is an
/// error and nothing is written.
pub fn apply(fix: &Fix) -> Result<ApplyStatus, ApplyError> {
    let replacement = match fix.replacement.as_deref() {
        Some(r) => r,
        None => {
            return Ok(ApplyStatus::NotApplicable {
                file: fix.file.clone(),
                line: fix.line,
            })
        }
    };
    let path = Path::new(&fix.file);
    let content = fs::read_to_string(path).map_err(|source| ApplyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match nth_line(&content, fix.line) {
        Some(current) if current == fix.original => {}
        Some(_) => {
            return Err(ApplyError::StaleTarget {
                file: fix.file.clone(),
                line: fix.line,
            })
        }
        None => {
            return Err(ApplyError::LineOutOfRange {
                file: fix.file.clone(),
                line: fix.line,
                len: content.split_inclusive('\n').count(),
            })
        }
    }
    let updated = replace_line(&content, fix.line, replacement).map_err(|len| {
        ApplyError::LineOutOfRange {
            file: fix.file.clone(),
            line: fix.line,
            len,
        }
    })?;
    fs::write(path, updated).map_err(|source| ApplyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("{}: rewrote line {}", fix.file, fix.line);
    Ok(ApplyStatus::Applied {
        file: fix.file.clone(),
        line: fix.line,
    })
}

/// Replace 1-based `line` in `content` with `replacement`.
///
/// Returns the number of lines in `content` when `line` is out of range.
pub fn replace_line(content: &str, line: usize, replacement: &str) -> Result<String, usize> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    if line == 0 || line > lines.len() {
        return Err(lines.len());
    }
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let target = lines[line - 1];
    let terminator = if target.ends_with("\r\n") {
        "\r\n"
    } else if target.ends_with('\n') {
        "\n"
    } else {
        ""
    };

    let mut out = String::with_capacity(content.len() + replacement.len());
    for l in &lines[..line - 1] {
        out.push_str(l);
    }
    let body = replacement
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect::<Vec<_>>()
        .join(newline);
    out.push_str(&body);
    out.push_str(terminator);
    for l in &lines[line..] {
        out.push_str(l);
    }
    Ok(out)
}

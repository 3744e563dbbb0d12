//! Scan runner: discovers source files and collects issues across them.
//!
//! Detection is read-only, so files are processed in parallel; the final
//! order is by path, then by each file's own detection order. Fix requests
//! refer to issues by their index in that sequence.

use crate::config::Effective;
use crate::detect::detect;
use crate::error::FixError;
use crate::fix::synthesize;
use crate::models::{Fix, Issue, Summary};
use glob::{glob, Pattern};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of one scan pass.
#[derive(Debug, Default)]
pub struct Scan {
    pub issues: Vec<Issue>,
    pub files: usize,
}

impl Scan {
    /// Scan every matching file under `cfg.repo_root`.
    pub fn run(cfg: &Effective) -> Scan {
        let targets = discover(&cfg.repo_root, &cfg.extensions, &cfg.exclude);
        Scan::run_files(&targets)
    }

    /// Scan an explicit list of files.
    pub fn run_files(targets: &[PathBuf]) -> Scan {
        let per_file: Vec<(Vec<Issue>, usize)> = targets
            .par_iter()
            .map(|path| {
                let file = match path.to_str() {
                    Some(f) => f,
                    None => {
                        log::warn!("skipping non-UTF-8 path {}", path.display());
                        return (Vec::new(), 0);
                    }
                };
                let data = match fs::read_to_string(path) {
                    Ok(s) => s,
                    Err(e) => {
                        log::warn!("skipping {}: {}", path.display(), e);
                        return (Vec::new(), 0);
                    }
                };
                (detect(file, &data), 1)
            })
            .collect();
        let files = per_file.iter().map(|(_, c)| *c).sum::<usize>();
        let issues = per_file.into_iter().flat_map(|(v, _)| v).collect::<Vec<_>>();
        Scan { issues, files }
    }

    /// Synthesize the fix for issue `index`, re-reading its file.
    pub fn fix(&self, index: usize) -> Result<Fix, FixError> {
        let issue = self.issues.get(index).ok_or(FixError::InvalidIndex {
            index,
            len: self.issues.len(),
        })?;
        synthesize(issue)
    }

    pub fn summary(&self) -> Summary {
        Summary::from_issues(&self.issues, self.files)
    }

    /// Issue indices ordered so that applying them in turn never shifts a
    /// line that a later index still refers to: grouped by file, highest
    /// line first.
    pub fn bottom_up_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.issues.len()).collect();
        order.sort_by(|&a, &b| {
            let (ia, ib) = (&self.issues[a], &self.issues[b]);
            ia.file
                .cmp(&ib.file)
                .then(ib.line.cmp(&ia.line))
                .then(a.cmp(&b))
        });
        order
    }
}

/// Collect files under `root` with one of `extensions`, minus `exclude`
/// globs (relative to `root`). Sorted and de-duplicated.
pub fn discover(root: &Path, extensions: &[String], exclude: &[String]) -> Vec<PathBuf> {
    let excludes: Vec<Pattern> = exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pat) => Some(pat),
            Err(e) => {
                log::warn!("ignoring bad exclude pattern '{}': {}", p, e);
                None
            }
        })
        .collect();
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();
    for ext in extensions {
        let pattern = root.join("**").join(format!("*.{}", ext));
        let entries = match glob(&pattern.to_string_lossy()) {
            Ok(e) => e,
            Err(e) => {
                log::warn!("bad extension pattern '{}': {}", ext, e);
                continue;
            }
        };
        for path in entries.flatten() {
            if !path.is_file() {
                continue;
            }
            // Issues name their file by a `String`; a lossy name would not
            // reopen the same file.
            if path.to_str().is_none() {
                log::warn!("skipping non-UTF-8 path {}", path.display());
                continue;
            }
            let rel = path.strip_prefix(root).unwrap_or(&path);
            if excludes.iter().any(|p| p.matches_path(rel)) {
                continue;
            }
            found.insert(path);
        }
    }
    log::debug!("discovered {} file(s) under {}", found.len(), root.display());
    found.into_iter().collect()
}

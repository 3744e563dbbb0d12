//! Configuration discovery and effective settings resolution.
//!
//! swiftmend reads `swiftmend.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `output`: `human`
//! - `extensions`: `["swift"]`
//! - `exclude`: `[]`
//! - `fix.yes`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_NAMES: [&str; 3] = ["swiftmend.toml", "swiftmend.yaml", "swiftmend.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Fix-related configuration section under `[fix]`.
pub struct FixCfg {
    /// Apply fixes without asking for confirmation.
    pub yes: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `swiftmend.toml|yaml`.
pub struct MendConfig {
    pub output: Option<String>,
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Vec<String>,
    pub fix: Option<FixCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub output: String,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub yes: bool,
}

impl Default for Effective {
    fn default() -> Self {
        Effective {
            repo_root: PathBuf::from("."),
            output: "human".to_string(),
            extensions: vec!["swift".to_string()],
            exclude: Vec::new(),
            yes: false,
        }
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `swiftmend.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Path of the config file under `root`, if one exists.
pub fn config_path(root: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|n| root.join(n))
        .find(|p| p.exists())
}

/// Load `MendConfig` from `root`. `Ok(None)` when no config file exists.
pub fn load_config(root: &Path) -> Result<Option<MendConfig>, ConfigError> {
    let path = match config_path(root) {
        Some(p) => p,
        None => return Ok(None),
    };
    let s = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let cfg: MendConfig = if path.extension().map_or(false, |e| e == "toml") {
        toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: path.clone(),
            source,
        })?
    } else {
        serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
            path: path.clone(),
            source,
        })?
    };
    log::debug!("Using config from: {}", path.display());
    Ok(Some(cfg))
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// An unreadable or malformed config file is reported and ignored.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_yes: Option<bool>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = match load_config(&repo_root) {
        Ok(c) => c.unwrap_or_default(),
        Err(e) => {
            log::warn!("{}; using defaults", e);
            MendConfig::default()
        }
    };
    let defaults = Effective::default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or(defaults.output);

    let extensions = cfg
        .extensions
        .filter(|e| !e.is_empty())
        .map(|e| {
            e.into_iter()
                .map(|x| x.trim_start_matches('.').to_string())
                .collect()
        })
        .unwrap_or(defaults.extensions);

    let yes = cli_yes
        .filter(|y| *y)
        .or_else(|| cfg.fix.as_ref().and_then(|f| f.yes))
        .unwrap_or(false);

    Effective {
        repo_root,
        output,
        extensions,
        exclude: cfg.exclude,
        yes,
    }
}

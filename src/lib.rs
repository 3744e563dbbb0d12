//! swiftmend core library.
//!
//! This crate exposes programmatic APIs for detecting common Swift migration
//! issues in source text and for synthesizing and applying line-level fixes.
//!
//! High-level modules:
//! - `rules`: The static rule catalog (structural, deprecated API, Sendable).
//! - `detect`: Runs the catalog over file content and locates issues.
//! - `fix`: Re-reads the target line and computes a replacement.
//! - `apply`: Rewrites exactly the targeted line on disk.
//! - `scan`: File discovery and the indexed issue sequence.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `models`: Issue, fix, and summary structs.
//! - `output`: Human/JSON printers.
//! - `error`: Error types for fix/apply/config.
//! - `utils`: Terminal helpers.
pub mod apply;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod fix;
pub mod models;
pub mod output;
pub mod rules;
pub mod scan;
pub mod utils;

pub use apply::apply;
pub use detect::detect;
pub use fix::{synthesize, synthesize_from};

//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "swiftmend",
    version,
    about = "Find and fix common Swift migration issues",
    long_about = "swiftmend — scans Swift sources for SwiftUI buildExpression idioms, deprecated AVFoundation APIs, and missing Sendable conformance, and offers line-level rewrites.\n\nConfiguration precedence: CLI > swiftmend.toml > defaults.",
    after_help = "Examples:\n  swiftmend analyze --repo-root MyApp\n  swiftmend report --repo-root MyApp\n  swiftmend fix 3 --repo-root MyApp\n  swiftmend fix-all --repo-root MyApp --dry-run",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for scanning and fixing.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current swiftmend version.")]
    Version,
    /// List detected issues with their indices
    #[command(
        about = "Analyze sources for issues",
        long_about = "Scan every source file under the repository root and list detected issues. Indices shown here are what `fix` expects.",
        after_help = "Examples:\n  swiftmend analyze\n  swiftmend analyze --output json --check"
    )]
    Analyze {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if any issue is found")]
        check: bool,
    },
    /// Emit a JSON report of all issues
    #[command(
        about = "Print JSON report",
        long_about = "Scan and print all issues with a summary as JSON."
    )]
    Report {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
    },
    /// Fix a single issue by index
    #[command(
        about = "Fix one issue",
        long_about = "Re-read the file for the issue at INDEX, show the suggested rewrite, and apply it after confirmation.",
        after_help = "Examples:\n  swiftmend fix 0\n  swiftmend fix 2 --yes"
    )]
    Fix {
        #[arg(help = "Issue index as printed by `analyze`")]
        index: usize,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, short = 'y', action = clap::ArgAction::SetTrue, help = "Apply without asking")]
        yes: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show the fix without applying it")]
        dry_run: bool,
    },
    /// Walk through every issue and offer fixes
    #[command(
        about = "Fix all issues",
        long_about = "Offer a fix for every issue, file by file from the bottom up so earlier rewrites never shift later targets. Answer y/n per fix or q to stop.",
        after_help = "Examples:\n  swiftmend fix-all --dry-run\n  swiftmend fix-all --yes"
    )]
    FixAll {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, short = 'y', action = clap::ArgAction::SetTrue, help = "Apply every automatic fix without asking")]
        yes: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show fixes without applying them")]
        dry_run: bool,
    },
}

//! swiftmend CLI binary entry point.
//! Delegates to the library for scan/fix/apply and prints results.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::Path;
use swiftmend::cli::{Cli, Commands};
use swiftmend::config::{self, Effective};
use swiftmend::models::{ApplyStatus, Fix};
use swiftmend::scan::Scan;
use swiftmend::utils::{error_prefix, info_prefix, note_prefix};
use swiftmend::{apply, output};

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Analyze {
            repo_root,
            output,
            check,
        } => {
            let eff = prepare(repo_root.as_deref(), output.as_deref(), None);
            let scan = Scan::run(&eff);
            output::print_issues(&scan.issues, scan.summary(), &eff.repo_root, &eff.output);
            if check && !scan.issues.is_empty() {
                std::process::exit(1);
            }
        }
        Commands::Report { repo_root } => {
            let eff = prepare(repo_root.as_deref(), Some("json"), None);
            let scan = Scan::run(&eff);
            output::print_issues(&scan.issues, scan.summary(), &eff.repo_root, "json");
        }
        Commands::Fix {
            index,
            repo_root,
            output,
            yes,
            dry_run,
        } => {
            let eff = prepare(repo_root.as_deref(), output.as_deref(), Some(yes));
            let scan = Scan::run(&eff);
            let fix = match scan.fix(index) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            };
            output::print_fix(index, &fix, &eff.repo_root, &eff.output);
            if fix.is_manual() || dry_run {
                return;
            }
            if eff.yes || confirm("Apply this fix? (y/n): ") == Answer::Yes {
                if !report_apply(&fix, &eff.repo_root) {
                    std::process::exit(1);
                }
            }
        }
        Commands::FixAll {
            repo_root,
            output,
            yes,
            dry_run,
        } => {
            let eff = prepare(repo_root.as_deref(), output.as_deref(), Some(yes));
            let scan = Scan::run(&eff);
            eprintln!(
                "{} Found {} potential issues",
                info_prefix(),
                scan.issues.len()
            );
            let mut failed = false;
            // Bottom-up per file, synthesized lazily: each fix sees the file
            // as left by the previous apply.
            for index in scan.bottom_up_order() {
                let fix = match scan.fix(index) {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("{} {}", error_prefix(), e);
                        failed = true;
                        continue;
                    }
                };
                println!();
                output::print_fix(index, &fix, &eff.repo_root, &eff.output);
                if fix.is_manual() || dry_run {
                    continue;
                }
                let answer = if eff.yes {
                    Answer::Yes
                } else {
                    confirm(&format!("Apply fix for issue {}? (y/n/q to quit): ", index))
                };
                match answer {
                    Answer::Yes => failed |= !report_apply(&fix, &eff.repo_root),
                    Answer::No => {}
                    Answer::Quit => break,
                }
            }
            if failed {
                std::process::exit(1);
            }
        }
    }
}

fn prepare(repo_root: Option<&str>, output: Option<&str>, yes: Option<bool>) -> Effective {
    let eff = config::resolve_effective(repo_root, output, yes);
    if !eff.repo_root.is_dir() {
        eprintln!(
            "{} Repository root not found: {}",
            error_prefix(),
            eff.repo_root.to_string_lossy()
        );
        std::process::exit(2);
    }
    if config::config_path(&eff.repo_root).is_none() && eff.output != "json" {
        eprintln!("{} No swiftmend.toml found; using defaults.", note_prefix());
    }
    eff
}

fn report_apply(fix: &Fix, root: &Path) -> bool {
    match apply::apply(fix) {
        Ok(status) => {
            let shown = match status {
                ApplyStatus::Applied { line, .. } => ApplyStatus::Applied {
                    file: swiftmend::utils::display_path(root, &fix.file),
                    line,
                },
                other => other,
            };
            println!("{}", shown);
            true
        }
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            false
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Yes,
    No,
    Quit,
}

/// Prompt on stderr and read one answer from stdin. EOF counts as quit.
fn confirm(prompt: &str) -> Answer {
    eprint!("{}", prompt);
    let _ = io::stderr().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => Answer::Quit,
        Ok(_) => match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Answer::Yes,
            "q" | "quit" => Answer::Quit,
            _ => Answer::No,
        },
    }
}

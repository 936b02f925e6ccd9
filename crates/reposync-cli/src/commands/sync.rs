//! Sync command: run the engine for each selected repository

use std::io::IsTerminal;

use colored::Colorize;
use reposync_core::{Direction, SyncEngine, SyncOptions, SyncReport};

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::interactive;

/// Run the sync command.
///
/// Every token is validated before the first pass starts, so a typo never
/// leaves some repositories synced and others not. A partial copy failure in
/// one repository does not stop the remaining ones; the first such failure is
/// returned at the end. Any other error stops the run, after the reports of
/// the passes that already ran have been printed.
pub fn run_sync(
    ctx: &Context,
    direction: Direction,
    tokens: &[String],
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let settings = ctx.settings()?;
    let registry = ctx.registry(&settings)?;
    let engine = SyncEngine::new(&settings, registry)?.with_options(SyncOptions { dry_run });

    let names = if tokens.is_empty() {
        if !std::io::stdin().is_terminal() {
            return Err(CliError::user(
                "No repository given (pass a name or number, see `reposync list`)",
            ));
        }
        interactive::pick_repositories(engine.registry())?
    } else {
        tokens
            .iter()
            .map(|token| {
                engine
                    .registry()
                    .select(token)
                    .map(|id| id.as_str().to_string())
                    .map_err(CliError::from)
            })
            .collect::<Result<Vec<_>>>()?
    };

    if names.is_empty() {
        println!("{}", "Nothing selected".dimmed());
        return Ok(());
    }

    let mut reports = Vec::new();
    let mut first_failure = None;
    let mut aborted = None;

    for name in &names {
        let report = match engine.sync(direction, name) {
            Ok(report) => report,
            Err(reposync_core::Error::CopyPartialFailure { report }) => {
                let report = *report;
                if first_failure.is_none() {
                    first_failure = Some(reposync_core::Error::CopyPartialFailure {
                        report: Box::new(report.clone()),
                    });
                }
                report
            }
            Err(e) => {
                aborted = Some(e);
                break;
            }
        };

        if !json {
            print_report(&report);
        }
        reports.push(report);
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).unwrap_or_default()
        );
    }

    match aborted.or(first_failure) {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn print_report(report: &SyncReport) {
    println!(
        "{} {} {}",
        "==>".blue().bold(),
        report.repository.bold(),
        format!("({})", report.direction.label()).dimmed()
    );
    println!("  {:<14} {}", "Source:".dimmed(), report.source.display());
    println!(
        "  {:<14} {}",
        "Destination:".dimmed(),
        report.destination.display()
    );
    println!("  {:<14} {}", "Candidates:".dimmed(), report.candidates_found);

    if report.verified_changes.is_empty() {
        println!("  {:<14} {}", "Changes:".dimmed(), "none".green());
    } else {
        println!(
            "  {:<14} {}",
            "Changes:".dimmed(),
            report.verified_changes.len()
        );
        for path in &report.verified_changes {
            let marker = if report.copied_paths.contains(path) {
                "+".green()
            } else if report.failed.iter().any(|f| &f.path == path) {
                "!".red()
            } else {
                "~".yellow()
            };
            println!("    {marker} {path}");
        }
    }

    if !report.created_dirs.is_empty() {
        println!(
            "  {:<14} {}",
            "New dirs:".dimmed(),
            report.created_dirs.len()
        );
    }

    for failure in &report.failed {
        println!(
            "  {} {}: {}",
            "failed:".red().bold(),
            failure.path,
            failure.reason
        );
    }
    for warning in &report.warnings {
        println!(
            "  {} {} could not be compared ({}), treated as changed",
            "warning:".yellow().bold(),
            warning.path,
            warning.reason
        );
    }
    for path in &report.skipped_excluded {
        println!("  {} {} (excluded)", "skipped:".yellow(), path);
    }
    if !report.destination_only.is_empty() {
        println!(
            "  {:<14} {} {}",
            "Dest. only:".dimmed(),
            report.destination_only.len(),
            "(kept)".dimmed()
        );
    }
    if report.dry_run && !report.verified_changes.is_empty() {
        println!("  {}", "Dry run: nothing written".yellow());
    }
    println!(
        "  {:<14} {:.2?}",
        "Elapsed:".dimmed(),
        report.elapsed
    );
    println!();
}

//! Check command implementation
//!
//! Parses every discovered export and prints a per-file verdict followed by
//! a summary. A file passes only if the whole document parses.

use super::shared::{CommandStats, create_progress_bar, discover_export_files};
use crate::cli::args::{Args, CheckArgs};
use crate::config::CheckConfig;
use crate::screening_parser::{ParseStats, ScreeningParser};
use anyhow::{Context, Result};
use colored::*;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Check command runner
pub async fn run_check(global: &Args, args: CheckArgs) -> Result<CommandStats> {
    let start_time = Instant::now();
    let config = CheckConfig::from(args);
    config.validate()?;

    let pattern = config.file_pattern()?;
    let files = discover_export_files(&config.paths, &pattern)?;
    info!("Checking {} files", files.len());

    if files.is_empty() {
        println!(
            "{} no files matching {}",
            "Nothing to check:".bright_yellow(),
            config.pattern
        );
        return Ok(CommandStats::default());
    }

    let progress = if global.show_progress() && files.len() > 1 {
        Some(create_progress_bar(files.len() as u64, "Checking exports"))
    } else {
        None
    };

    let parser = ScreeningParser::new();
    let mut stats = CommandStats::default();

    for path in &files {
        let outcome = check_file(&parser, path).await;
        match outcome {
            Ok(parse_stats) => {
                report(
                    progress.as_ref(),
                    format!(
                        "{} {} ({} records)",
                        "ok".bright_green().bold(),
                        path.display(),
                        parse_stats.rows_parsed
                    ),
                );
                stats.files_parsed += 1;
                stats.parse.merge(&parse_stats);
            }
            Err(e) => {
                warn!("{} failed: {:#}", path.display(), e);
                report(
                    progress.as_ref(),
                    format!("{} {}: {:#}", "FAIL".bright_red().bold(), path.display(), e),
                );
                stats.files_failed += 1;
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }

        if config.fail_fast && !stats.is_success() {
            debug!("Stopping after first failure");
            break;
        }
    }

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    stats.elapsed = start_time.elapsed();
    print_summary(&stats);
    Ok(stats)
}

async fn check_file(parser: &ScreeningParser, path: &Path) -> Result<ParseStats> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parser = *parser;
    let result = tokio::task::spawn_blocking(move || parser.parse_with_stats(&bytes))
        .await
        .context("Parse task failed")??;
    Ok(result.stats)
}

/// Print above the progress bar when one is shown
fn report(progress: Option<&ProgressBar>, line: String) {
    match progress {
        Some(pb) => pb.println(line),
        None => println!("{}", line),
    }
}

fn print_summary(stats: &CommandStats) {
    println!("\n{}", "Check Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.elapsed.as_millis().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files parsed:".bright_cyan(),
        stats.files_parsed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Total records:".bright_cyan(),
        stats.parse.rows_parsed.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Bytes read:".bright_cyan(),
        CommandStats::format_size(stats.parse.bytes_read).bright_white()
    );
}

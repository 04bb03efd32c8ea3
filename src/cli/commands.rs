//! CLI output helpers

use clap::CommandFactory;
use clap_complete::generate;
use colored::Colorize;
use std::io;

use crate::sync::RunSummary;

/// Print the end-of-run summary
pub fn print_summary(summary: &RunSummary, executed: bool) {
    let totals = &summary.totals;

    println!();
    if executed {
        println!("{}", "Run complete!".green().bold());
    } else {
        println!("{}", "[DRY RUN] Run complete, nothing written.".yellow().bold());
    }
    println!("  Channels processed: {}", summary.channels_ok.len());
    if !summary.channels_failed.is_empty() {
        println!(
            "  Channels failed: {}",
            summary.channels_failed.join(", ").red()
        );
    }
    println!("  Tracks found: {}", totals.total);
    println!("  Already downloaded: {}", totals.skipped);
    println!("  Not found in catalog: {}", totals.unresolved);
    println!("  Downloads queued: {}", totals.queued);
    if totals.failed > 0 {
        println!("  Downloads failed: {}", totals.failed.to_string().red());
    }
}

/// Handle `--completions`
pub fn completion(shell: clap_complete::Shell) {
    let mut cmd = super::Cli::command();
    generate(shell, &mut cmd, "sirius2usb", &mut io::stdout());
}

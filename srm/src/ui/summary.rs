//! Presentation of the run summary and the secure log.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use srm_core::redaction::short_hash;
use srm_core::{DeletionCounters, LogEntry, RunSummary};

use super::output_format::styled;
use super::theme::{ThemeEntry, ThemeMap};

const RULE_WIDTH: usize = 60;

/// Prints the end-of-run summary block.
pub fn print_summary<W: Write>(
    writer: &mut W,
    summary: &RunSummary,
    counters: DeletionCounters,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    let row = |label: &str, value: String| {
        format!(
            "  {} {}",
            styled(label, ThemeEntry::SummaryLabel, theme, enable_colors),
            styled(&value, ThemeEntry::SummaryValue, theme, enable_colors)
        )
    };
    writeln!(writer)?;
    writeln!(writer, "{}", rule)?;
    writeln!(writer, "{}", styled("Deletion Summary:", ThemeEntry::Header, theme, enable_colors))?;
    writeln!(writer, "{}", row("Items processed:", summary.to_string()))?;
    writeln!(writer, "{}", row("Files deleted:", counters.files_processed.to_string()))?;
    writeln!(writer, "{}", row("Directories removed:", counters.dirs_processed.to_string()))?;
    writeln!(writer, "{}", rule)
}

/// A table of log entries with truncated path hashes.
pub fn log_table(entries: &[LogEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Timestamp", "Path Hash", "Algorithm", "Passes", "Success"]);
    for entry in entries {
        table.add_row(vec![
            entry.timestamp.clone(),
            format!("{}...", short_hash(&entry.path_hash)),
            entry.algorithm.to_string(),
            entry.passes.to_string(),
            entry.success.to_string(),
        ]);
    }
    table
}

/// Prints the secure log, or a notice when it is empty.
pub fn print_secure_log<W: Write>(
    writer: &mut W,
    entries: &[LogEntry],
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(writer, "No deletion operations logged.");
    }
    writeln!(writer)?;
    writeln!(writer, "{}", styled("=== Secure Deletion Log ===", ThemeEntry::Header, theme, enable_colors))?;
    writeln!(writer, "{}", log_table(entries))
}

/// Writes the entries as pretty JSON.
pub fn write_log_file(path: &Path, entries: &[LogEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries).context("Failed to serialize secure log")?;
    fs::write(path, json).with_context(|| format!("Failed to write secure log to {}", path.display()))
}

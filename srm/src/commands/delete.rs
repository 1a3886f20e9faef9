// srm/src/commands/delete.rs
//! The `srm` run: resolve configuration, confirm, delete, report.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;

use srm_core::{
    merge_settings, DeletionConfig, DeletionOrchestrator, DeletionSettings, RunSummary, SrmError,
    TargetKind, TargetResult,
};

use crate::cli::Cli;
use crate::commands::confirm::{confirm_deletion, count_targets};
use crate::ui::output_format::{error_msg, info_msg};
use crate::ui::summary::{print_secure_log, print_summary, write_log_file};
use crate::ui::theme::ThemeMap;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Invalid pass count or configuration, reported before any prompt.
pub const EXIT_INVALID_CONFIG: i32 = 2;

/// `<config_dir>/srm/config.yaml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("srm").join("config.yaml"))
}

/// Defaults, then the settings file, then the command-line flags.
pub fn resolve_config(cli: &Cli) -> Result<DeletionConfig> {
    let file_settings = match &cli.config {
        Some(path) => Some(DeletionSettings::load_from_file(path)?),
        None => match default_config_path() {
            Some(path) if path.is_file() => Some(DeletionSettings::load_from_file(&path)?),
            _ => None,
        },
    };
    let base = merge_settings(DeletionSettings::default(), file_settings);
    let merged = merge_settings(base, Some(cli.to_settings()));
    debug!("Effective settings: {:?}", merged);
    Ok(DeletionConfig::from_settings(&merged)?)
}

/// Runs one invocation and returns the process exit code.
pub fn run_delete(cli: &Cli, theme: &ThemeMap) -> Result<i32> {
    let config = match resolve_config(cli) {
        Ok(config) => config,
        Err(e) => {
            error_msg(format!("{:#}", e), theme);
            return Ok(EXIT_INVALID_CONFIG);
        }
    };

    if !cli.force {
        let count = count_targets(&cli.paths, config.recursive());
        let confirmed = confirm_deletion(count, &mut io::stdin().lock(), &mut io::stdout(), &mut io::stderr())?;
        if !confirmed {
            println!("Operation cancelled.");
            return Ok(EXIT_SUCCESS);
        }
    }

    info!("Starting srm operation on {} target(s).", cli.paths.len());
    let mut orchestrator = DeletionOrchestrator::new(config);
    let summary = orchestrator.run(&cli.paths);
    report_failures(&summary, theme);

    let stdout = io::stdout();
    let enable_colors = stdout.is_terminal();
    let mut out = stdout.lock();
    if !cli.quiet {
        print_summary(&mut out, &summary, orchestrator.counters(), theme, enable_colors)?;
    }
    if orchestrator.config().secure_log_enabled() {
        print_secure_log(&mut out, orchestrator.log_entries(), theme, enable_colors)?;
        if let Some(path) = &cli.log_file {
            write_log_file(path, orchestrator.log_entries())?;
            if !cli.quiet {
                info_msg(format!("Secure log written to {}", path.display()), theme);
            }
        }
    }
    out.flush()?;

    info!("srm operation completed: {}", summary);
    Ok(if summary.all_succeeded() { EXIT_SUCCESS } else { EXIT_FAILURE })
}

/// One stderr line per failed target. The operator typed these paths, so
/// they are shown as given.
fn report_failures(summary: &RunSummary, theme: &ThemeMap) {
    for outcome in summary.outcomes.iter().filter(|o| !o.success()) {
        let shown = outcome.path.display();
        let message = match &outcome.result {
            TargetResult::Rejected(SrmError::WrongKind {
                found: TargetKind::Directory,
                ..
            }) => format!("'{}' is a directory. Use -r to delete directories.", shown),
            TargetResult::Rejected(SrmError::NotFound(_)) | TargetResult::Rejected(SrmError::Unsupported(_)) => {
                format!("'{}' not found or unsupported type", shown)
            }
            _ => format!(
                "Failed to securely delete '{}': {}",
                shown,
                outcome.failure_reason().unwrap_or_default()
            ),
        };
        error_msg(message, theme);
    }
}

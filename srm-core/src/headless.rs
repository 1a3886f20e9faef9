// srm-core/src/headless.rs

//! `headless.rs`
//! One-shot, non-interactive deletion of a list of paths.
//!
//! The caller is responsible for confirmation; nothing here prompts.

use std::path::Path;

use crate::audit_log::SecureLog;
use crate::config::DeletionConfig;
use crate::orchestrator::{DeletionCounters, DeletionOrchestrator, RunSummary};

/// Everything a caller needs to report on a finished run.
#[derive(Debug)]
pub struct HeadlessReport {
    pub summary: RunSummary,
    pub counters: DeletionCounters,
    pub log: SecureLog,
}

/// Deletes every path with `config` and returns the run report.
///
/// # Arguments
///
/// * `paths` - Targets in processing order.
/// * `config` - A validated configuration; directories need `recursive`.
pub fn secure_delete_paths<P: AsRef<Path>>(paths: &[P], config: DeletionConfig) -> HeadlessReport {
    let mut orchestrator = DeletionOrchestrator::new(config);
    let summary = orchestrator.run(paths);
    HeadlessReport {
        summary,
        counters: orchestrator.counters(),
        log: orchestrator.secure_log().clone(),
    }
}

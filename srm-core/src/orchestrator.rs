//! Composition root for one invocation.
//!
//! Resolves each target, dispatches to the file or directory pipeline,
//! keeps the counters and owns the secure log. Targets are processed one
//! at a time and a failing target never stops the ones after it.
//!
//! License: MIT OR Apache-2.0

use log::warn;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::audit_log::{LogEntry, SecureLog};
use crate::config::DeletionConfig;
use crate::dir_pipeline::{DirectoryDeletionPipeline, DirectoryOutcome};
use crate::errors::SrmError;
use crate::file_pipeline::{FileDeletionPipeline, FileOutcome, FileStage};
use crate::redaction::{loggable_error, loggable_path};
use crate::target::{absolute_path, DeletionTarget, TargetKind};

/// Work done during one invocation. Only ever increases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionCounters {
    pub files_processed: u64,
    pub dirs_processed: u64,
}

#[derive(Debug)]
pub enum TargetResult {
    File(FileOutcome),
    Directory(DirectoryOutcome),
    /// Refused before any pipeline ran.
    Rejected(SrmError),
}

#[derive(Debug)]
pub struct TargetOutcome {
    pub path: PathBuf,
    pub result: TargetResult,
}

impl TargetOutcome {
    pub fn success(&self) -> bool {
        match &self.result {
            TargetResult::File(f) => f.success(),
            TargetResult::Directory(d) => d.success(),
            TargetResult::Rejected(_) => false,
        }
    }

    /// A one-line reason for a failed target, if any.
    pub fn failure_reason(&self) -> Option<String> {
        match &self.result {
            TargetResult::File(f) => f.failure.as_ref().map(ToString::to_string),
            TargetResult::Directory(d) if !d.success() => Some(format!(
                "{} of {} files deleted, {} of {} directories removed",
                d.files_deleted, d.files_total, d.dirs_removed, d.dirs_total
            )),
            TargetResult::Directory(_) => None,
            TargetResult::Rejected(e) => Some(e.to_string()),
        }
    }
}

/// Per-run totals for the caller to present.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: usize,
    pub total: usize,
    pub outcomes: Vec<TargetOutcome>,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} targets succeeded", self.succeeded, self.total)
    }
}

#[derive(Debug)]
pub struct DeletionOrchestrator {
    config: DeletionConfig,
    files: FileDeletionPipeline,
    dirs: DirectoryDeletionPipeline,
    counters: DeletionCounters,
    log: SecureLog,
}

impl DeletionOrchestrator {
    pub fn new(config: DeletionConfig) -> Self {
        Self {
            files: FileDeletionPipeline::new(config.clone()),
            dirs: DirectoryDeletionPipeline::new(config.clone()),
            config,
            counters: DeletionCounters::default(),
            log: SecureLog::new(),
        }
    }

    pub fn config(&self) -> &DeletionConfig {
        &self.config
    }

    pub fn counters(&self) -> DeletionCounters {
        self.counters
    }

    pub fn secure_log(&self) -> &SecureLog {
        &self.log
    }

    pub fn log_entries(&self) -> &[LogEntry] {
        self.log.entries()
    }

    /// Resolves and deletes a single target.
    pub fn delete_target(&mut self, path: &Path) -> TargetOutcome {
        let verbose = self.config.verbose();
        let log = if self.config.secure_log_enabled() {
            Some(&mut self.log)
        } else {
            None
        };

        let result = match DeletionTarget::resolve(path).map(|target| target.kind) {
            Ok(TargetKind::File) => {
                let outcome = self.files.delete(path, log);
                if outcome.completed.contains(&FileStage::Unlink) {
                    self.counters.files_processed += 1;
                }
                TargetResult::File(outcome)
            }
            Ok(TargetKind::Directory) if self.config.recursive() => {
                let outcome = self.dirs.delete(path, log);
                self.counters.files_processed += outcome.files_deleted as u64;
                self.counters.dirs_processed += outcome.dirs_removed as u64;
                TargetResult::Directory(outcome)
            }
            Ok(TargetKind::Directory) => TargetResult::Rejected(SrmError::WrongKind {
                path: path.to_path_buf(),
                expected: TargetKind::File,
                found: TargetKind::Directory,
            }),
            Ok(TargetKind::Missing) => TargetResult::Rejected(SrmError::NotFound(path.to_path_buf())),
            Ok(TargetKind::Unsupported) => TargetResult::Rejected(SrmError::Unsupported(path.to_path_buf())),
            Err(e) => TargetResult::Rejected(e),
        };

        if let TargetResult::Rejected(e) = &result {
            warn!("Skipping {}: {}", loggable_path(path, verbose), loggable_error(e, verbose));
            if self.config.secure_log_enabled() {
                self.log.record(&absolute_path(path), false, &self.config);
            }
        }

        TargetOutcome {
            path: path.to_path_buf(),
            result,
        }
    }

    /// Deletes every target in order.
    pub fn run<P: AsRef<Path>>(&mut self, paths: &[P]) -> RunSummary {
        let mut summary = RunSummary {
            total: paths.len(),
            ..Default::default()
        };
        for path in paths {
            let outcome = self.delete_target(path.as_ref());
            if outcome.success() {
                summary.succeeded += 1;
            }
            summary.outcomes.push(outcome);
        }
        summary
    }
}

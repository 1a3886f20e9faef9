//! The secure log: an append-only record of deletion attempts keyed by a
//! one-way hash of the original absolute path. Entries never carry a
//! plaintext path. Formatting for humans belongs to the caller.
//!
//! License: MIT OR Apache-2.0

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{CipherChoice, DeletionConfig};
use crate::crypto::CryptoEngine;

/// One deletion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// RFC 3339, UTC.
    pub timestamp: String,
    /// Hex SHA-256 of the original absolute path.
    pub path_hash: String,
    pub success: bool,
    pub algorithm: CipherChoice,
    pub passes: u32,
}

impl LogEntry {
    pub fn new(original_path: &Path, success: bool, config: &DeletionConfig) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            path_hash: CryptoEngine::hash_path(&original_path.to_string_lossy()),
            success,
            algorithm: config.cipher(),
            passes: config.overwrite_passes(),
        }
    }
}

/// Append-only collection of [`LogEntry`].
#[derive(Debug, Default, Clone)]
pub struct SecureLog {
    entries: Vec<LogEntry>,
}

impl SecureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry for `original_path`.
    pub fn record(&mut self, original_path: &Path, success: bool, config: &DeletionConfig) {
        self.entries.push(LogEntry::new(original_path, success, config));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a SecureLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

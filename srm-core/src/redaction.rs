//! Helpers that keep plaintext paths out of diagnostic logs unless the
//! operator asked for them.

use lazy_static::lazy_static;
use log::{debug, info};
use std::fmt;
use std::path::Path;

use crate::crypto::CryptoEngine;
use crate::errors::SrmError;

lazy_static! {
    /// Initialised once: whether plain paths may appear in debug logs.
    static ref PLAIN_PATHS_ALLOWED: bool = {
        std::env::var("SRM_ALLOW_DEBUG_PATHS")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Number of hex characters shown for a redacted path.
pub const HASH_PREFIX_LEN: usize = 16;

/// Shortens a hex digest for display.
pub fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(HASH_PREFIX_LEN)]
}

/// The form of `path` that may be written to diagnostic logs.
pub fn loggable_path(path: &Path, verbose: bool) -> String {
    if verbose || *PLAIN_PATHS_ALLOWED {
        path.display().to_string()
    } else {
        let hash = CryptoEngine::hash_path(&path.to_string_lossy());
        format!("[path:{}]", short_hash(&hash))
    }
}

/// The form of `err` that may be written to diagnostic logs.
pub fn loggable_error(err: &SrmError, verbose: bool) -> String {
    if verbose || *PLAIN_PATHS_ALLOWED {
        err.to_string()
    } else {
        err.redacted()
    }
}

/// Progress message: `info` when verbose, `debug` otherwise.
pub fn progress(verbose: bool, args: fmt::Arguments<'_>) {
    if verbose {
        info!("[srm] {}", args);
    } else {
        debug!("[srm] {}", args);
    }
}

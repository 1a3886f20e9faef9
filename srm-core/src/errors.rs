//! errors.rs - Custom error types for the srm-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::target::TargetKind;

/// This enum represents all possible error types in the `srm-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SrmError {
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Expected a {expected} at {}, found {found}", .path.display())]
    WrongKind {
        path: PathBuf,
        expected: TargetKind,
        found: TargetKind,
    },

    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rename target already exists: {}", .0.display())]
    RenameCollision(PathBuf),

    #[error("Encryption failed: {0}")]
    EncryptionFailure(String),

    #[error("Unsupported file type at {}", .0.display())]
    Unsupported(PathBuf),

    #[error("Number of passes must be between 1 and 35 (got {0})")]
    InvalidPasses(i64),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SrmError {
    /// Wraps an `std::io::Error` together with the path it concerns.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SrmError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for the `InvalidPasses` / `Config` family, which the CLI maps to
    /// its early-exit code.
    pub fn is_config_error(&self) -> bool {
        matches!(self, SrmError::InvalidPasses(_) | SrmError::Config(_))
    }

    /// The message without any path in it.
    pub fn redacted(&self) -> String {
        match self {
            SrmError::NotFound(_) => "Path not found".to_string(),
            SrmError::WrongKind { expected, found, .. } => {
                format!("Expected a {}, found {}", expected, found)
            }
            SrmError::Io { source, .. } => format!("I/O failure: {}", source),
            SrmError::RenameCollision(_) => "Rename target already exists".to_string(),
            SrmError::Unsupported(_) => "Unsupported file type".to_string(),
            SrmError::EncryptionFailure(_) | SrmError::InvalidPasses(_) | SrmError::Config(_) => {
                self.to_string()
            }
        }
    }
}

/// Result alias used throughout the pipeline.
pub type SrmResult<T> = Result<T, SrmError>;

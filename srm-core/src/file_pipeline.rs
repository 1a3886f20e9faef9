//! The per-file deletion pipeline.
//!
//! `Validate -> Encrypt -> Overwrite(x passes) -> [Sanitize] -> Unlink`
//!
//! Steps run strictly in order and each write phase ends with a durability
//! barrier, so partial progress only ever moves a file towards
//! irrecoverability. The original absolute path is kept for log hashing
//! while the current on-disk path is threaded through the steps.
//!
//! License: MIT OR Apache-2.0

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

use crate::audit_log::SecureLog;
use crate::config::DeletionConfig;
use crate::crypto::CryptoEngine;
use crate::errors::{SrmError, SrmResult};
use crate::overwrite::OverwriteEngine;
use crate::redaction::{loggable_error, loggable_path, progress};
use crate::sanitizer::MetadataSanitizer;
use crate::target::{absolute_path, ensure_kind, TargetKind};

/// Steps of the file pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileStage {
    Validate,
    Encrypt,
    Overwrite,
    Sanitize,
    Unlink,
}

impl fmt::Display for FileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileStage::Validate => "validate",
            FileStage::Encrypt => "encrypt",
            FileStage::Overwrite => "overwrite",
            FileStage::Sanitize => "sanitize",
            FileStage::Unlink => "unlink",
        };
        f.write_str(s)
    }
}

/// The step that stopped the pipeline and why.
#[derive(Debug)]
pub struct StageFailure {
    pub stage: FileStage,
    pub error: SrmError,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} step failed: {}", self.stage, self.error)
    }
}

/// Result of one file deletion attempt.
#[derive(Debug)]
pub struct FileOutcome {
    /// Absolute path as supplied; the key for the secure log.
    pub original_path: PathBuf,
    /// Where the file was last known to live. Differs from the original
    /// after sanitization; meaningful when unlink failed.
    pub final_path: PathBuf,
    /// Steps that completed, in order.
    pub completed: Vec<FileStage>,
    pub failure: Option<StageFailure>,
}

impl FileOutcome {
    pub fn success(&self) -> bool {
        self.failure.is_none()
    }

    /// True once every overwrite pass reached storage, whatever happened after.
    pub fn content_scrubbed(&self) -> bool {
        self.completed.contains(&FileStage::Overwrite)
    }
}

/// Runs the per-file state machine.
#[derive(Debug, Clone)]
pub struct FileDeletionPipeline {
    config: DeletionConfig,
    overwrite: OverwriteEngine,
    sanitizer: MetadataSanitizer,
}

impl FileDeletionPipeline {
    pub fn new(config: DeletionConfig) -> Self {
        Self {
            overwrite: OverwriteEngine::new(config.overwrite_passes()),
            sanitizer: MetadataSanitizer::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &DeletionConfig {
        &self.config
    }

    /// Deletes one file. A log entry keyed by the original absolute path is
    /// appended to `audit_log` whatever the outcome.
    pub fn delete(&self, path: &Path, audit_log: Option<&mut SecureLog>) -> FileOutcome {
        let original_path = absolute_path(path);
        let mut outcome = FileOutcome {
            original_path,
            final_path: path.to_path_buf(),
            completed: Vec::with_capacity(5),
            failure: None,
        };

        if let Err(failure) = self.run(&mut outcome) {
            let verbose = self.config.verbose();
            progress(
                verbose,
                format_args!(
                    "{}: {} step failed: {}",
                    loggable_path(&outcome.final_path, verbose),
                    failure.stage,
                    loggable_error(&failure.error, verbose)
                ),
            );
            outcome.failure = Some(failure);
        } else {
            progress(
                self.config.verbose(),
                format_args!("Successfully deleted: {}", loggable_path(&outcome.original_path, self.config.verbose())),
            );
        }

        if let Some(log) = audit_log {
            log.record(&outcome.original_path, outcome.success(), &self.config);
        }
        outcome
    }

    fn run(&self, outcome: &mut FileOutcome) -> Result<(), StageFailure> {
        let verbose = self.config.verbose();
        let path = outcome.final_path.clone();

        step(outcome, FileStage::Validate, Self::validate(&path))?;

        progress(verbose, format_args!("Encrypting: {}", loggable_path(&path, verbose)));
        step(outcome, FileStage::Encrypt, Self::encrypt(&path, &self.config))?;

        progress(verbose, format_args!("Overwriting: {}", loggable_path(&path, verbose)));
        step(outcome, FileStage::Overwrite, self.overwrite.overwrite_file(&path).map(|_| ()))?;

        let current = if self.config.sanitize_metadata() {
            progress(verbose, format_args!("Sanitizing metadata: {}", loggable_path(&path, verbose)));
            let renamed = self.sanitizer.sanitize(&path);
            outcome.final_path = renamed.clone();
            outcome.completed.push(FileStage::Sanitize);
            renamed
        } else {
            path
        };

        progress(verbose, format_args!("Unlinking: {}", loggable_path(&current, verbose)));
        step(outcome, FileStage::Unlink, Self::unlink(&current))
    }

    /// The target must still exist and be a regular file.
    pub fn validate(path: &Path) -> SrmResult<()> {
        ensure_kind(path, TargetKind::File)
    }

    /// Reads the whole file, encrypts it under a one-time key and writes the
    /// ciphertext back over the same bytes, then syncs.
    pub fn encrypt(path: &Path, config: &DeletionConfig) -> SrmResult<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| SrmError::io(path, e))?;

        let mut data = Zeroizing::new(Vec::new());
        file.read_to_end(&mut data).map_err(|e| SrmError::io(path, e))?;

        CryptoEngine::encrypt_in_place(&mut data, config.cipher())?;

        file.seek(SeekFrom::Start(0)).map_err(|e| SrmError::io(path, e))?;
        file.write_all(&data).map_err(|e| SrmError::io(path, e))?;
        file.flush().map_err(|e| SrmError::io(path, e))?;
        file.sync_all().map_err(|e| SrmError::io(path, e))
    }

    /// Removes the directory entry.
    pub fn unlink(path: &Path) -> SrmResult<()> {
        fs::remove_file(path).map_err(|e| SrmError::io(path, e))
    }
}

fn step(outcome: &mut FileOutcome, stage: FileStage, result: SrmResult<()>) -> Result<(), StageFailure> {
    match result {
        Ok(()) => {
            outcome.completed.push(stage);
            Ok(())
        }
        Err(error) => Err(StageFailure { stage, error }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CipherChoice;
    use tempfile::tempdir;

    fn pipeline(passes: i64, sanitize: bool) -> FileDeletionPipeline {
        let config = DeletionConfig::builder()
            .overwrite_passes(passes)
            .sanitize_metadata(sanitize)
            .secure_log(true)
            .build()
            .unwrap();
        FileDeletionPipeline::new(config)
    }

    #[test]
    fn test_encrypt_replaces_plaintext_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let plaintext = b"the combination is 12-34-56".to_vec();
        fs::write(&path, &plaintext).unwrap();

        for cipher in [CipherChoice::Aes256Ctr, CipherChoice::ChaCha20] {
            let config = DeletionConfig::builder().cipher(cipher).build().unwrap();
            let before = fs::read(&path).unwrap();
            FileDeletionPipeline::encrypt(&path, &config).unwrap();
            let after = fs::read(&path).unwrap();
            assert_eq!(after.len(), plaintext.len());
            assert_ne!(after, plaintext);
            assert_ne!(after, before);
        }
    }

    #[test]
    fn test_delete_removes_file_and_records_stages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secret.key");
        fs::write(&path, b"0123456789").unwrap();

        let mut log = SecureLog::new();
        let outcome = pipeline(3, true).delete(&path, Some(&mut log));

        assert!(outcome.success(), "{:?}", outcome.failure);
        assert!(!path.exists());
        assert_eq!(
            outcome.completed,
            vec![
                FileStage::Validate,
                FileStage::Encrypt,
                FileStage::Overwrite,
                FileStage::Sanitize,
                FileStage::Unlink
            ]
        );
        assert_ne!(outcome.final_path, path);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(log.len(), 1);
        assert_eq!(
            log.entries()[0].path_hash,
            CryptoEngine::hash_path(&absolute_path(&path).to_string_lossy())
        );
    }

    #[test]
    fn test_delete_without_sanitize_skips_stage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, b"abc").unwrap();

        let outcome = pipeline(1, false).delete(&path, None);
        assert!(outcome.success());
        assert!(!outcome.completed.contains(&FileStage::Sanitize));
        assert_eq!(outcome.final_path, path);
    }

    #[test]
    fn test_missing_file_fails_validation_and_is_logged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent");
        let mut log = SecureLog::new();

        let outcome = pipeline(3, true).delete(&path, Some(&mut log));
        let failure = outcome.failure.as_ref().unwrap();
        assert_eq!(failure.stage, FileStage::Validate);
        assert!(matches!(failure.error, SrmError::NotFound(_)));
        assert!(outcome.completed.is_empty());
        assert_eq!(log.len(), 1);
        assert!(!log.entries()[0].success);
    }

    #[test]
    fn test_directory_is_wrong_kind() {
        let dir = tempdir().unwrap();
        let outcome = pipeline(3, true).delete(dir.path(), None);
        let failure = outcome.failure.unwrap();
        assert!(matches!(failure.error, SrmError::WrongKind { .. }));
        assert!(dir.path().exists());
    }

    #[test]
    fn test_empty_file_is_deleted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, b"").unwrap();
        assert!(pipeline(2, true).delete(&path, None).success());
        assert!(!path.exists());
    }

    #[test]
    fn test_large_file_spans_multiple_chunks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.bin");
        let len = crate::overwrite::OVERWRITE_CHUNK_SIZE * 2 + 123;
        fs::write(&path, vec![0x5Au8; len]).unwrap();
        assert!(pipeline(1, false).delete(&path, None).success());
        assert!(!path.exists());
    }
}

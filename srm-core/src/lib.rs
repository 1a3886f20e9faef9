// srm-core/src/lib.rs
//! # srm Core Library
//!
//! `srm-core` implements the secure deletion pipeline: the sequence of steps that
//! takes a live file from plaintext on disk to gone, and the depth-first teardown
//! that applies the same guarantees to a whole directory tree.
//!
//! Per file the pipeline runs `Validate -> Encrypt -> Overwrite(x passes) ->
//! [Sanitize] -> Unlink`, with a durability barrier after every write phase. Once a
//! file has been processed, the bytes reachable through the ordinary read path are
//! never plaintext and the one-time key used for the encryption step is gone.
//!
//! ## Modules
//!
//! * `config`: The validated, immutable [`DeletionConfig`] and the YAML-backed [`DeletionSettings`].
//! * `errors`: The [`SrmError`] taxonomy.
//! * `target`: Resolution of a path into a [`DeletionTarget`] kind.
//! * `crypto`: Ephemeral keys, one-shot stream encryption and path hashing.
//! * `patterns`: CSPRNG-backed overwrite pattern generation.
//! * `overwrite`: The multi-pass, chunked overwrite engine.
//! * `sanitizer`: Timestamp randomization and rename obfuscation.
//! * `file_pipeline`: The per-file state machine.
//! * `dir_pipeline`: Children-first directory teardown.
//! * `audit_log`: The hashed, append-only secure log.
//! * `orchestrator`: Dispatch, counters and the accumulated log for one invocation.
//! * `headless`: One-shot wrapper for non-interactive callers.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use srm_core::{secure_delete_paths, DeletionConfig};
//!
//! fn main() -> Result<(), srm_core::SrmError> {
//!     let config = DeletionConfig::builder()
//!         .overwrite_passes(3)
//!         .secure_log(true)
//!         .build()?;
//!
//!     let report = secure_delete_paths(&["/tmp/old-credentials.txt"], config);
//!     println!("{}", report.summary);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Pipeline steps return [`SrmResult`]. The pipelines fold step errors into outcome
//! values, so a failing file never unwinds past a traversal loop and never stops
//! sibling targets. Configuration files are loaded with `anyhow` for context-rich
//! messages.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod audit_log;
pub mod config;
pub mod crypto;
pub mod dir_pipeline;
pub mod errors;
pub mod file_pipeline;
pub mod headless;
pub mod orchestrator;
pub mod overwrite;
pub mod patterns;
pub mod redaction;
pub mod sanitizer;
pub mod target;

pub use audit_log::{LogEntry, SecureLog};
pub use config::{
    merge_settings, validate_passes, CipherChoice, DeletionConfig, DeletionConfigBuilder,
    DeletionSettings, DEFAULT_PASSES, MAX_PASSES, MIN_PASSES,
};
pub use crypto::{CryptoEngine, EphemeralKey};
pub use dir_pipeline::{collect_contents, DirectoryContents, DirectoryDeletionPipeline, DirectoryOutcome};
pub use errors::{SrmError, SrmResult};
pub use file_pipeline::{FileDeletionPipeline, FileOutcome, FileStage, StageFailure};
pub use headless::{secure_delete_paths, HeadlessReport};
pub use orchestrator::{DeletionCounters, DeletionOrchestrator, RunSummary, TargetOutcome, TargetResult};
pub use overwrite::{OverwriteEngine, OVERWRITE_CHUNK_SIZE};
pub use patterns::{OverwritePatternKind, PatternGenerator};
pub use sanitizer::MetadataSanitizer;
pub use target::{DeletionTarget, TargetKind};

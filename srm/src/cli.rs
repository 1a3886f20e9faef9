// srm/src/cli.rs
//! Command-line interface definition for `srm`.
//! License: MIT OR Apache-2.0

use clap::Parser;
use std::path::PathBuf;

use srm_core::{CipherChoice, DeletionSettings};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "srm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Secure RM: cryptographically secure file deletion",
    long_about = "srm encrypts each file under a one-time key, overwrites it with several pattern passes, \
                  scrubs its timestamps and name, and only then unlinks it. Directories are torn down \
                  depth-first with the same per-file guarantees.",
    after_help = "Examples:\n  \
                  srm file.txt                    Secure delete with defaults\n  \
                  srm -v -p 5 sensitive.doc       Verbose mode, 5 overwrite passes\n  \
                  srm --chacha20 secret.pdf       Use ChaCha20 instead of AES-256\n  \
                  srm -r -f logs/ temp/           Delete directories without confirmation\n  \
                  srm --log --log-file audit.json notes.txt",
    arg_required_else_help = true
)]
pub struct Cli {
    /// File(s) or directory(ies) to securely delete.
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<PathBuf>,

    /// Recursively delete directories.
    #[arg(long, short = 'r')]
    pub recursive: bool,

    /// Number of overwrite passes, 1 to 35 [default: 3].
    #[arg(long, short = 'p', value_name = "N", allow_negative_numbers = true)]
    pub passes: Option<i64>,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Use ChaCha20 instead of AES-256 for the encryption step.
    #[arg(long)]
    pub chacha20: bool,

    /// Skip metadata sanitization (not recommended).
    #[arg(long = "no-metadata")]
    pub no_metadata: bool,

    /// Enable the secure deletion log.
    #[arg(long)]
    pub log: bool,

    /// Also write the secure log as JSON to this file. Implies --log.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Delete without asking for confirmation.
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Path to a YAML settings file.
    #[arg(long, value_name = "FILE", env = "SRM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to a custom YAML theme file.
    #[arg(long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Suppress informational output and logging.
    #[arg(long, short = 'q', conflicts_with_all = ["debug", "verbose"])]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, short = 'd')]
    pub debug: bool,
}

impl Cli {
    /// The settings implied by the flags. Flags that were not given stay
    /// `None` so that the config file can supply them.
    pub fn to_settings(&self) -> DeletionSettings {
        DeletionSettings {
            overwrite_passes: self.passes,
            cipher: self.chacha20.then_some(CipherChoice::ChaCha20),
            sanitize_metadata: self.no_metadata.then_some(false),
            secure_log: (self.log || self.log_file.is_some()).then_some(true),
            verbose: self.verbose.then_some(true),
            recursive: self.recursive.then_some(true),
            rename_iterations: None,
        }
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        if self.quiet {
            Some(log::LevelFilter::Off)
        } else if self.debug {
            Some(log::LevelFilter::Debug)
        } else if self.verbose {
            Some(log::LevelFilter::Info)
        } else {
            None
        }
    }
}

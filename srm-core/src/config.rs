//! Configuration management for `srm-core`.
//!
//! This module defines the validated, immutable [`DeletionConfig`] consumed by
//! the pipelines, and the partial [`DeletionSettings`] document that can be
//! loaded from YAML and layered (defaults < config file < command line).
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::{SrmError, SrmResult};

/// Smallest accepted number of overwrite passes.
pub const MIN_PASSES: u32 = 1;
/// Largest accepted number of overwrite passes.
pub const MAX_PASSES: u32 = 35;
pub const DEFAULT_PASSES: u32 = 3;
/// Number of rename-to-random-name iterations during sanitization.
pub const DEFAULT_RENAME_ITERATIONS: u32 = 3;
pub const MAX_RENAME_ITERATIONS: u32 = 10;

/// Stream cipher used for the one-time encryption step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum CipherChoice {
    #[default]
    #[serde(rename = "AES-256", alias = "aes256", alias = "aes-256-ctr")]
    Aes256Ctr,
    #[serde(rename = "ChaCha20", alias = "chacha20")]
    ChaCha20,
}

impl CipherChoice {
    /// Label recorded in the secure log.
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherChoice::Aes256Ctr => "AES-256",
            CipherChoice::ChaCha20 => "ChaCha20",
        }
    }
}

impl fmt::Display for CipherChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated deletion settings. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionConfig {
    overwrite_passes: u32,
    cipher: CipherChoice,
    sanitize_metadata: bool,
    secure_log_enabled: bool,
    verbose: bool,
    recursive: bool,
    rename_iterations: u32,
}

impl Default for DeletionConfig {
    fn default() -> Self {
        Self {
            overwrite_passes: DEFAULT_PASSES,
            cipher: CipherChoice::default(),
            sanitize_metadata: true,
            secure_log_enabled: false,
            verbose: false,
            recursive: false,
            rename_iterations: DEFAULT_RENAME_ITERATIONS,
        }
    }
}

impl DeletionConfig {
    /// Default configuration with the given pass count.
    ///
    /// Fails with [`SrmError::InvalidPasses`] outside `1..=35`.
    pub fn new(overwrite_passes: i64) -> SrmResult<Self> {
        Self::builder().overwrite_passes(overwrite_passes).build()
    }

    pub fn builder() -> DeletionConfigBuilder {
        DeletionConfigBuilder::default()
    }

    /// Builds a config from a (possibly merged) settings document, filling
    /// gaps with defaults.
    pub fn from_settings(settings: &DeletionSettings) -> SrmResult<Self> {
        let mut builder = Self::builder();
        if let Some(p) = settings.overwrite_passes {
            builder = builder.overwrite_passes(p);
        }
        if let Some(c) = settings.cipher {
            builder = builder.cipher(c);
        }
        if let Some(s) = settings.sanitize_metadata {
            builder = builder.sanitize_metadata(s);
        }
        if let Some(l) = settings.secure_log {
            builder = builder.secure_log(l);
        }
        if let Some(v) = settings.verbose {
            builder = builder.verbose(v);
        }
        if let Some(r) = settings.recursive {
            builder = builder.recursive(r);
        }
        if let Some(i) = settings.rename_iterations {
            builder = builder.rename_iterations(i);
        }
        builder.build()
    }

    pub fn overwrite_passes(&self) -> u32 {
        self.overwrite_passes
    }

    pub fn cipher(&self) -> CipherChoice {
        self.cipher
    }

    pub fn sanitize_metadata(&self) -> bool {
        self.sanitize_metadata
    }

    pub fn secure_log_enabled(&self) -> bool {
        self.secure_log_enabled
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn rename_iterations(&self) -> u32 {
        self.rename_iterations
    }
}

/// Builder for [`DeletionConfig`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct DeletionConfigBuilder {
    overwrite_passes: i64,
    cipher: CipherChoice,
    sanitize_metadata: bool,
    secure_log: bool,
    verbose: bool,
    recursive: bool,
    rename_iterations: u32,
}

impl Default for DeletionConfigBuilder {
    fn default() -> Self {
        let d = DeletionConfig::default();
        Self {
            overwrite_passes: i64::from(d.overwrite_passes),
            cipher: d.cipher,
            sanitize_metadata: d.sanitize_metadata,
            secure_log: d.secure_log_enabled,
            verbose: d.verbose,
            recursive: d.recursive,
            rename_iterations: d.rename_iterations,
        }
    }
}

impl DeletionConfigBuilder {
    pub fn overwrite_passes(mut self, passes: i64) -> Self {
        self.overwrite_passes = passes;
        self
    }

    pub fn cipher(mut self, cipher: CipherChoice) -> Self {
        self.cipher = cipher;
        self
    }

    pub fn sanitize_metadata(mut self, enabled: bool) -> Self {
        self.sanitize_metadata = enabled;
        self
    }

    pub fn secure_log(mut self, enabled: bool) -> Self {
        self.secure_log = enabled;
        self
    }

    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn recursive(mut self, enabled: bool) -> Self {
        self.recursive = enabled;
        self
    }

    pub fn rename_iterations(mut self, iterations: u32) -> Self {
        self.rename_iterations = iterations;
        self
    }

    pub fn build(self) -> SrmResult<DeletionConfig> {
        let passes = validate_passes(self.overwrite_passes)?;
        if !(1..=MAX_RENAME_ITERATIONS).contains(&self.rename_iterations) {
            return Err(SrmError::Config(format!(
                "rename_iterations must be between 1 and {} (got {})",
                MAX_RENAME_ITERATIONS, self.rename_iterations
            )));
        }
        Ok(DeletionConfig {
            overwrite_passes: passes,
            cipher: self.cipher,
            sanitize_metadata: self.sanitize_metadata,
            secure_log_enabled: self.secure_log,
            verbose: self.verbose,
            recursive: self.recursive,
            rename_iterations: self.rename_iterations,
        })
    }
}

/// Checks a pass count against `MIN_PASSES..=MAX_PASSES`.
pub fn validate_passes(passes: i64) -> SrmResult<u32> {
    if (i64::from(MIN_PASSES)..=i64::from(MAX_PASSES)).contains(&passes) {
        Ok(passes as u32)
    } else {
        Err(SrmError::InvalidPasses(passes))
    }
}

/// A partial settings document. Every field is optional so that layers can
/// be merged before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeletionSettings {
    pub overwrite_passes: Option<i64>,
    pub cipher: Option<CipherChoice>,
    pub sanitize_metadata: Option<bool>,
    pub secure_log: Option<bool>,
    pub verbose: Option<bool>,
    pub recursive: Option<bool>,
    pub rename_iterations: Option<u32>,
}

impl DeletionSettings {
    /// Loads a settings document from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading settings from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if text.trim().is_empty() {
            debug!("Config file {} is empty; using defaults.", path.display());
            return Ok(Self::default());
        }
        let settings: DeletionSettings = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }
}

/// Overlays `user` on top of `base`; any field set in `user` wins.
pub fn merge_settings(base: DeletionSettings, user: Option<DeletionSettings>) -> DeletionSettings {
    let Some(user) = user else {
        return base;
    };
    DeletionSettings {
        overwrite_passes: user.overwrite_passes.or(base.overwrite_passes),
        cipher: user.cipher.or(base.cipher),
        sanitize_metadata: user.sanitize_metadata.or(base.sanitize_metadata),
        secure_log: user.secure_log.or(base.secure_log),
        verbose: user.verbose.or(base.verbose),
        recursive: user.recursive.or(base.recursive),
        rename_iterations: user.rename_iterations.or(base.rename_iterations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pass_range() {
        for passes in 1..=35 {
            let config = DeletionConfig::new(passes).unwrap();
            assert_eq!(config.overwrite_passes() as i64, passes);
        }
    }

    #[test]
    fn test_invalid_passes_rejected() {
        for passes in [0, 36, -1] {
            match DeletionConfig::new(passes) {
                Err(SrmError::InvalidPasses(p)) => assert_eq!(p, passes),
                other => panic!("expected InvalidPasses for {}, got {:?}", passes, other),
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = DeletionConfig::default();
        assert_eq!(config.overwrite_passes(), 3);
        assert_eq!(config.cipher(), CipherChoice::Aes256Ctr);
        assert!(config.sanitize_metadata());
        assert!(!config.secure_log_enabled());
        assert!(!config.recursive());
        assert_eq!(config.rename_iterations(), 3);
    }

    #[test]
    fn test_rename_iterations_bounds() {
        assert!(DeletionConfig::builder().rename_iterations(0).build().is_err());
        assert!(DeletionConfig::builder().rename_iterations(11).build().is_err());
        assert!(DeletionConfig::builder().rename_iterations(10).build().is_ok());
    }

    #[test]
    fn test_merge_prefers_user_values() {
        let base = DeletionSettings {
            overwrite_passes: Some(7),
            cipher: Some(CipherChoice::ChaCha20),
            ..Default::default()
        };
        let user = DeletionSettings {
            overwrite_passes: Some(2),
            secure_log: Some(true),
            ..Default::default()
        };
        let merged = merge_settings(base, Some(user));
        assert_eq!(merged.overwrite_passes, Some(2));
        assert_eq!(merged.cipher, Some(CipherChoice::ChaCha20));
        assert_eq!(merged.secure_log, Some(true));

        let config = DeletionConfig::from_settings(&merged).unwrap();
        assert_eq!(config.overwrite_passes(), 2);
        assert_eq!(config.cipher(), CipherChoice::ChaCha20);
        assert!(config.secure_log_enabled());
        assert!(config.sanitize_metadata());
    }

    #[test]
    fn test_cipher_labels() {
        assert_eq!(CipherChoice::Aes256Ctr.to_string(), "AES-256");
        assert_eq!(CipherChoice::ChaCha20.as_str(), "ChaCha20");
    }
}

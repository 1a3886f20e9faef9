//! Metadata sanitization: timestamp randomization and rename obfuscation.
//!
//! Both operations are hardening steps and never block deletion. Failures
//! are logged and swallowed; the rename chain returns the last path that
//! was actually reached, which always exists on disk under that name.
//!
//! License: MIT OR Apache-2.0

use rand::Rng;
use std::fs::{self, File, FileTimes, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::config::DeletionConfig;
use crate::errors::{SrmError, SrmResult};
use crate::redaction::{loggable_error, loggable_path, progress};

/// Length of every generated obfuscation name.
pub const RANDOM_NAME_LEN: usize = 16;
const NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
/// Upper bound of the timestamp window, in seconds (365 days).
pub const TIMESTAMP_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

/// Randomizes timestamps and renames entries before removal.
#[derive(Debug, Clone)]
pub struct MetadataSanitizer {
    rename_iterations: u32,
    verbose: bool,
}

impl Default for MetadataSanitizer {
    fn default() -> Self {
        Self::from_config(&DeletionConfig::default())
    }
}

impl MetadataSanitizer {
    pub fn new(rename_iterations: u32, verbose: bool) -> Self {
        Self {
            rename_iterations,
            verbose,
        }
    }

    pub fn from_config(config: &DeletionConfig) -> Self {
        Self::new(config.rename_iterations(), config.verbose())
    }

    /// Timestamps, then the rename chain. Returns the current path.
    pub fn sanitize(&self, path: &Path) -> PathBuf {
        self.randomize_timestamps(path);
        self.obfuscate_name(path, self.rename_iterations)
    }

    /// Sets access and modification time to a random instant in
    /// `[now - 1 year, now]`. Returns `false` on failure; never errors.
    pub fn randomize_timestamps(&self, path: &Path) -> bool {
        let when = random_recent_time();
        match set_times(path, when) {
            Ok(()) => true,
            Err(e) => {
                progress(
                    self.verbose,
                    format_args!("Timestamp randomization skipped for {}: {}", loggable_path(path, self.verbose), e),
                );
                false
            }
        }
    }

    /// Renames `path` to a fresh random name in the same directory,
    /// `iterations` times. A failed iteration is skipped, not retried.
    pub fn obfuscate_name(&self, path: &Path, iterations: u32) -> PathBuf {
        let mut current = path.to_path_buf();
        for i in 0..iterations {
            match rename_to_random(&current) {
                Ok(next) => current = next,
                Err(e) => progress(
                    self.verbose,
                    format_args!(
                        "Rename {}/{} skipped for {}: {}",
                        i + 1,
                        iterations,
                        loggable_path(&current, self.verbose),
                        loggable_error(&e, self.verbose)
                    ),
                ),
            }
        }
        current
    }
}

/// A 16-character lowercase alphanumeric name.
pub fn generate_random_name() -> String {
    let mut rng = rand::rng();
    (0..RANDOM_NAME_LEN)
        .map(|_| NAME_CHARSET[rng.random_range(0..NAME_CHARSET.len())] as char)
        .collect()
}

/// One rename step: `old -> parent/<random>`. Refuses to replace an
/// existing entry.
pub fn rename_to_random(old: &Path) -> SrmResult<PathBuf> {
    let parent = old
        .parent()
        .ok_or_else(|| SrmError::Unsupported(old.to_path_buf()))?;
    let candidate = parent.join(generate_random_name());
    if fs::symlink_metadata(&candidate).is_ok() {
        return Err(SrmError::RenameCollision(candidate));
    }
    fs::rename(old, &candidate).map_err(|e| SrmError::io(old, e))?;
    Ok(candidate)
}

fn random_recent_time() -> SystemTime {
    let back = rand::rng().random_range(0..=TIMESTAMP_WINDOW_SECS);
    SystemTime::now()
        .checked_sub(Duration::from_secs(back))
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

fn set_times(path: &Path, when: SystemTime) -> std::io::Result<()> {
    // Directories cannot be opened for writing; fall back to read access.
    let file = match OpenOptions::new().write(true).open(path) {
        Ok(f) => f,
        Err(_) => File::open(path)?,
    };
    file.set_times(FileTimes::new().set_accessed(when).set_modified(when))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_random_name_shape() {
        let name = generate_random_name();
        assert_eq!(name.len(), RANDOM_NAME_LEN);
        assert!(name.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        assert_ne!(name, generate_random_name());
    }

    #[test]
    fn test_timestamps_land_in_last_year() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.txt");
        fs::write(&path, b"x").unwrap();

        let sanitizer = MetadataSanitizer::default();
        assert!(sanitizer.randomize_timestamps(&path));

        let modified = fs::metadata(&path).unwrap().modified().unwrap();
        let now = SystemTime::now();
        let age = now.duration_since(modified).unwrap_or_default();
        assert!(age <= Duration::from_secs(TIMESTAMP_WINDOW_SECS + 60));
    }

    #[test]
    fn test_timestamps_on_missing_path_are_swallowed() {
        let dir = tempdir().unwrap();
        let sanitizer = MetadataSanitizer::default();
        assert!(!sanitizer.randomize_timestamps(&dir.path().join("missing")));
    }

    #[test]
    fn test_obfuscate_name_renames_within_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        fs::write(&path, b"content").unwrap();

        let sanitizer = MetadataSanitizer::default();
        let final_path = sanitizer.obfuscate_name(&path, 3);

        assert!(!path.exists());
        assert!(final_path.exists());
        assert_eq!(final_path.parent(), Some(dir.path()));
        let name = final_path.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name.len(), RANDOM_NAME_LEN);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_obfuscate_missing_path_returns_original() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ghost");
        let sanitizer = MetadataSanitizer::default();
        assert_eq!(sanitizer.obfuscate_name(&path, 3), path);
    }

    #[test]
    fn test_obfuscate_directory() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();

        let final_path = MetadataSanitizer::default().sanitize(&sub);
        assert!(final_path.is_dir());
        assert!(!sub.exists());
    }
}

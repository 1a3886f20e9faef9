//! Depth-first directory teardown.
//!
//! The tree is enumerated once, children before parents. Every file goes
//! through the [`FileDeletionPipeline`]; subdirectories are then removed
//! bottom-up and the root last. A failure never stops the walk: every
//! collected entry is attempted exactly once.
//!
//! License: MIT OR Apache-2.0

use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::audit_log::SecureLog;
use crate::config::DeletionConfig;
use crate::errors::{SrmError, SrmResult};
use crate::file_pipeline::{FileDeletionPipeline, FileOutcome};
use crate::redaction::{loggable_path, progress};
use crate::sanitizer::MetadataSanitizer;
use crate::target::{ensure_kind, TargetKind};

/// Entries found beneath a root, in removal order.
#[derive(Debug, Default)]
pub struct DirectoryContents {
    /// Regular files at any depth.
    pub files: Vec<PathBuf>,
    /// Subdirectories, children before parents. Never includes the root.
    pub dirs: Vec<PathBuf>,
    /// Symlinks and special files; unlinked without scrubbing.
    pub others: Vec<PathBuf>,
    /// Entries the walk could not read.
    pub walk_errors: Vec<SrmError>,
}

/// Enumerates `root` without following links.
pub fn collect_contents(root: &Path) -> DirectoryContents {
    let mut contents = DirectoryContents::default();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .contents_first(true)
    {
        match entry {
            Ok(entry) => {
                let ft = entry.file_type();
                let path = entry.into_path();
                if ft.is_file() {
                    contents.files.push(path);
                } else if ft.is_dir() {
                    contents.dirs.push(path);
                } else {
                    contents.others.push(path);
                }
            }
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                let io = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                contents.walk_errors.push(SrmError::io(path, io));
            }
        }
    }
    contents
}

/// Result of tearing down one directory tree.
#[derive(Debug, Default)]
pub struct DirectoryOutcome {
    pub root: PathBuf,
    pub files_total: usize,
    pub files_deleted: usize,
    /// Subdirectories plus the root.
    pub dirs_total: usize,
    /// Directories actually removed, root included.
    pub dirs_removed: usize,
    pub root_removed: bool,
    pub file_outcomes: Vec<FileOutcome>,
    /// Non-file failures: walk errors, links, directory removals.
    pub failures: Vec<SrmError>,
}

impl DirectoryOutcome {
    pub fn success(&self) -> bool {
        self.files_deleted == self.files_total && self.root_removed
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryDeletionPipeline {
    files: FileDeletionPipeline,
    sanitizer: MetadataSanitizer,
}

impl DirectoryDeletionPipeline {
    pub fn new(config: DeletionConfig) -> Self {
        Self {
            sanitizer: MetadataSanitizer::from_config(&config),
            files: FileDeletionPipeline::new(config),
        }
    }

    pub fn config(&self) -> &DeletionConfig {
        self.files.config()
    }

    pub fn delete(&self, root: &Path, mut audit_log: Option<&mut SecureLog>) -> DirectoryOutcome {
        let verbose = self.config().verbose();
        let mut outcome = DirectoryOutcome {
            root: root.to_path_buf(),
            dirs_total: 1,
            ..Default::default()
        };

        if let Err(e) = ensure_kind(root, TargetKind::Directory) {
            outcome.failures.push(e);
            return outcome;
        }

        let contents = collect_contents(root);
        outcome.files_total = contents.files.len();
        outcome.dirs_total += contents.dirs.len();
        outcome.failures.extend(contents.walk_errors);

        progress(
            verbose,
            format_args!(
                "Processing directory {}: {} files, {} subdirectories",
                loggable_path(root, verbose),
                contents.files.len(),
                contents.dirs.len()
            ),
        );

        for file in &contents.files {
            let result = self.files.delete(file, audit_log.as_deref_mut());
            if result.success() {
                outcome.files_deleted += 1;
            }
            outcome.file_outcomes.push(result);
        }

        for other in &contents.others {
            if let Err(e) = fs::remove_file(other) {
                outcome.failures.push(SrmError::io(other, e));
            }
        }

        for dir in &contents.dirs {
            match self.remove_dir(dir) {
                Ok(()) => outcome.dirs_removed += 1,
                Err(e) => outcome.failures.push(e),
            }
        }

        match self.remove_dir(root) {
            Ok(()) => {
                outcome.dirs_removed += 1;
                outcome.root_removed = true;
            }
            Err(e) => outcome.failures.push(e),
        }

        if !outcome.success() {
            warn!(
                "Directory {} not fully deleted: {}/{} files, {}/{} directories",
                loggable_path(root, verbose),
                outcome.files_deleted,
                outcome.files_total,
                outcome.dirs_removed,
                outcome.dirs_total
            );
        }
        outcome
    }

    /// Sanitize (if enabled), then `rmdir`.
    fn remove_dir(&self, dir: &Path) -> SrmResult<()> {
        let verbose = self.config().verbose();
        let current = if self.config().sanitize_metadata() {
            self.sanitizer.sanitize(dir)
        } else {
            dir.to_path_buf()
        };
        progress(verbose, format_args!("Removing directory: {}", loggable_path(&current, verbose)));
        fs::remove_dir(&current).map_err(|e| SrmError::io(&current, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn build_tree(root: &Path) {
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::create_dir_all(root.join("c")).unwrap();
        fs::write(root.join("top.txt"), b"top").unwrap();
        fs::write(root.join("a/one.txt"), b"one").unwrap();
        fs::write(root.join("a/b/two.txt"), b"two").unwrap();
        fs::write(root.join("c/three.txt"), b"three").unwrap();
    }

    #[test]
    fn test_collect_orders_children_first() {
        let dir = tempdir().unwrap();
        build_tree(dir.path());
        let contents = collect_contents(dir.path());
        assert_eq!(contents.files.len(), 4);
        assert_eq!(contents.dirs.len(), 3);
        let pos = |p: &Path| contents.dirs.iter().position(|d| d == p).unwrap();
        assert!(pos(&dir.path().join("a/b")) < pos(&dir.path().join("a")));
        assert!(!contents.dirs.contains(&dir.path().to_path_buf()));
    }

    #[test]
    fn test_delete_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("tree");
        build_tree(&root);

        let pipeline = DirectoryDeletionPipeline::new(DeletionConfig::new(2).unwrap());
        let mut log = SecureLog::new();
        let outcome = pipeline.delete(&root, Some(&mut log));

        assert!(outcome.success(), "{:?}", outcome.failures);
        assert_eq!(outcome.files_deleted, 4);
        assert_eq!(outcome.dirs_removed, 4);
        assert!(!root.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("empty");
        fs::create_dir(&root).unwrap();
        let outcome = DirectoryDeletionPipeline::new(DeletionConfig::default()).delete(&root, None);
        assert!(outcome.success());
        assert_eq!(outcome.dirs_removed, 1);
        assert!(!root.exists());
    }

    #[test]
    fn test_file_root_is_wrong_kind() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, b"x").unwrap();
        let outcome = DirectoryDeletionPipeline::new(DeletionConfig::default()).delete(&file, None);
        assert!(!outcome.success());
        assert!(matches!(outcome.failures[0], SrmError::WrongKind { .. }));
        assert!(file.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_inside_tree_is_unlinked_not_followed() {
        let dir = tempdir().unwrap();
        let outside = dir.path().join("outside.txt");
        fs::write(&outside, b"keep me").unwrap();
        let root = dir.path().join("tree");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        let outcome = DirectoryDeletionPipeline::new(DeletionConfig::default()).delete(&root, None);
        assert!(outcome.success());
        assert!(!root.exists());
        assert_eq!(fs::read(&outside).unwrap(), b"keep me");
    }
}

//! Resolution of a command-line path into a [`DeletionTarget`].
//!
//! The kind is resolved once at dispatch time and again at every pipeline
//! entry point, since the filesystem may change between enumeration and
//! action. Symbolic links are never followed.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::{SrmError, SrmResult};

/// What a path resolved to when it was inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    File,
    Directory,
    Missing,
    /// Symlinks, sockets, FIFOs, devices.
    Unsupported,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetKind::File => "regular file",
            TargetKind::Directory => "directory",
            TargetKind::Missing => "missing path",
            TargetKind::Unsupported => "unsupported file type",
        };
        f.write_str(s)
    }
}

/// A path plus the kind it had when last inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionTarget {
    pub path: PathBuf,
    pub kind: TargetKind,
}

impl DeletionTarget {
    /// Inspects `path` without following symlinks.
    pub fn resolve(path: impl AsRef<Path>) -> SrmResult<Self> {
        let path = path.as_ref();
        let kind = resolve_kind(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            kind,
        })
    }
}

/// Returns the kind of `path`. A missing path is `Ok(TargetKind::Missing)`;
/// any other metadata failure is an I/O error.
pub fn resolve_kind(path: &Path) -> SrmResult<TargetKind> {
    match fs::symlink_metadata(path) {
        Ok(meta) => {
            let ft = meta.file_type();
            Ok(if ft.is_file() {
                TargetKind::File
            } else if ft.is_dir() {
                TargetKind::Directory
            } else {
                TargetKind::Unsupported
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(TargetKind::Missing),
        Err(e) => Err(SrmError::io(path, e)),
    }
}

/// Re-validates that `path` is still of `expected` kind.
pub fn ensure_kind(path: &Path, expected: TargetKind) -> SrmResult<()> {
    match resolve_kind(path)? {
        found if found == expected => Ok(()),
        TargetKind::Missing => Err(SrmError::NotFound(path.to_path_buf())),
        TargetKind::Unsupported => Err(SrmError::Unsupported(path.to_path_buf())),
        found => Err(SrmError::WrongKind {
            path: path.to_path_buf(),
            expected,
            found,
        }),
    }
}

/// Absolute form of `path` used for log hashing. Symlinks are not resolved,
/// so the digest is taken over the name the operator supplied.
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_kinds() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"x").unwrap();

        assert_eq!(resolve_kind(&file).unwrap(), TargetKind::File);
        assert_eq!(resolve_kind(dir.path()).unwrap(), TargetKind::Directory);
        assert_eq!(resolve_kind(&dir.path().join("nope")).unwrap(), TargetKind::Missing);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_unsupported() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("real");
        fs::write(&file, b"x").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&file, &link).unwrap();

        let target = DeletionTarget::resolve(&link).unwrap();
        assert_eq!(target.kind, TargetKind::Unsupported);
    }

    #[test]
    fn test_ensure_kind_reports_wrong_kind() {
        let dir = tempdir().unwrap();
        match ensure_kind(dir.path(), TargetKind::File) {
            Err(SrmError::WrongKind { expected, found, .. }) => {
                assert_eq!(expected, TargetKind::File);
                assert_eq!(found, TargetKind::Directory);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            ensure_kind(&dir.path().join("gone"), TargetKind::File),
            Err(SrmError::NotFound(_))
        ));
    }

    #[test]
    fn test_absolute_path_is_absolute() {
        assert!(absolute_path(Path::new("some/relative/file")).is_absolute());
    }
}

//! Contained file operations: read/write/delete/exists/backup helpers
//! that all route a caller-supplied relative path through
//! [`validate_contained_path`] so a path like `../../secrets` is
//! rejected the same way whether it arrives from an archive entry or a
//! direct API call.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::ArchiveError;
use super::path::validate_contained_path;

/// Operates on paths relative to a fixed root directory, refusing any
/// path that would resolve outside of it.
#[derive(Debug, Clone)]
pub struct ContainedFileOps {
    root: PathBuf,
}

impl ContainedFileOps {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ContainedFileOps { root: root.into() }
    }

    fn resolve(&self, rel: &Path) -> Result<PathBuf, ArchiveError> {
        validate_contained_path(&self.root, rel)
    }

    pub fn exists(&self, rel: &Path) -> Result<bool, ArchiveError> {
        let path = self.resolve(rel)?;
        Ok(path.exists())
    }

    pub fn read(&self, rel: &Path) -> Result<Vec<u8>, ArchiveError> {
        let path = self.resolve(rel)?;
        Ok(fs::read(path)?)
    }

    pub fn read_to_string(&self, rel: &Path) -> Result<String, ArchiveError> {
        let path = self.resolve(rel)?;
        Ok(fs::read_to_string(path)?)
    }

    pub fn write(&self, rel: &Path, contents: &[u8]) -> Result<(), ArchiveError> {
        let path = self.resolve(rel)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn delete(&self, rel: &Path) -> Result<(), ArchiveError> {
        let path = self.resolve(rel)?;
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        } else if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Copies `rel` to `<rel>.bak` (overwriting any previous backup),
    /// returning the backup's path relative to the root. No-op if the
    /// source does not exist.
    pub fn backup(&self, rel: &Path) -> Result<Option<PathBuf>, ArchiveError> {
        let path = self.resolve(rel)?;
        if !path.exists() {
            return Ok(None);
        }
        let mut backup_name = path.file_name().unwrap_or_default().to_os_string();
        backup_name.push(".bak");
        let backup_path = path.with_file_name(backup_name);
        fs::copy(&path, &backup_path)?;
        Ok(Some(
            backup_path
                .strip_prefix(&self.root)
                .unwrap_or(&backup_path)
                .to_path_buf(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let ops = ContainedFileOps::new(dir.path());
        ops.write(Path::new("notes/a.txt"), b"hello").unwrap();
        assert_eq!(ops.read_to_string(Path::new("notes/a.txt")).unwrap(), "hello");
        assert!(ops.exists(Path::new("notes/a.txt")).unwrap());
    }

    #[test]
    fn rejects_traversal_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let ops = ContainedFileOps::new(dir.path());
        let err = ops.write(Path::new("../../evil.txt"), b"evil").unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidFilePath(_)));
    }

    #[test]
    fn delete_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let ops = ContainedFileOps::new(dir.path());
        ops.write(Path::new("a.txt"), b"x").unwrap();
        ops.delete(Path::new("a.txt")).unwrap();
        assert!(!ops.exists(Path::new("a.txt")).unwrap());
    }

    #[test]
    fn backup_copies_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ops = ContainedFileOps::new(dir.path());
        ops.write(Path::new("a.txt"), b"original").unwrap();
        let backup = ops.backup(Path::new("a.txt")).unwrap().unwrap();
        assert_eq!(backup, PathBuf::from("a.txt.bak"));
        assert_eq!(ops.read_to_string(&backup).unwrap(), "original");
    }

    #[test]
    fn backup_of_missing_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let ops = ContainedFileOps::new(dir.path());
        assert_eq!(ops.backup(Path::new("missing.txt")).unwrap(), None);
    }
}

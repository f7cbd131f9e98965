//! Hardened tar+gzip extraction: path containment, a file-size cap
//! against decompression bombs, and careful symlink handling.
//!
//! Unlike a whole-archive `Archive::unpack(dest)` call, this walks
//! `archive.entries()` one at a time so every entry can be checked
//! before anything is written — a whole-archive unpack gives no hook to
//! reject an individual traversal or oversized entry before it lands on
//! disk.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};

use super::error::ArchiveError;
use super::path::validate_contained_path;

/// Default cap on a single extracted regular file's decompressed size.
pub const DEFAULT_MAX_EXTRACTED_FILE_SIZE: u64 = 100 * 1024 * 1024;

const DEFAULT_DIR_MODE: u32 = 0o755;

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub max_extracted_file_size: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            max_extracted_file_size: DEFAULT_MAX_EXTRACTED_FILE_SIZE,
        }
    }
}

/// Expands a gzip-compressed tar stream into `dest`, creating `dest` if
/// it does not exist. Every safety rule documented on this module is
/// mandatory and applied per entry, not only to the archive as a whole.
pub fn extract<R: Read>(reader: R, dest: &Path, options: &ExtractOptions) -> Result<(), ArchiveError> {
    fs::create_dir_all(dest)?;
    let dest = dest
        .canonicalize()
        .unwrap_or_else(|_| dest.to_path_buf());

    let decoder = GzDecoder::new(reader);
    let mut archive = Archive::new(decoder);

    let entries = archive
        .entries()
        .map_err(|e| ArchiveError::InvalidGzip(e.to_string()))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| ArchiveError::InvalidGzip(e.to_string()))?;
        let entry_type = entry.header().entry_type();
        let rel_path = entry
            .path()
            .map_err(|e| ArchiveError::InvalidFilePath(e.to_string()))?
            .into_owned();

        let target = validate_contained_path(&dest, &rel_path)?;
        let mode = entry.header().mode().unwrap_or(0o644);

        match entry_type {
            EntryType::Directory => {
                fs::create_dir_all(&target)?;
                set_unix_mode(&target, mode);
            }
            EntryType::Regular => {
                if let Some(parent) = target.parent() {
                    create_parents(parent)?;
                }
                let declared_size = entry.header().size().unwrap_or(0);
                if declared_size > options.max_extracted_file_size {
                    return Err(ArchiveError::ExceedsMaximumSize(target.display().to_string()));
                }
                write_capped_file(&mut entry, &target, options.max_extracted_file_size)?;
                set_unix_mode(&target, mode);
            }
            EntryType::Symlink => {
                if let Some(parent) = target.parent() {
                    create_parents(parent)?;
                }
                let link_name = entry
                    .link_name()
                    .map_err(|e| ArchiveError::InvalidFilePath(e.to_string()))?
                    .ok_or_else(|| ArchiveError::InvalidFilePath(rel_path.display().to_string()))?
                    .into_owned();
                create_validated_symlink(&dest, &target, &link_name)?;
            }
            _ => {
                // Unsupported type-flags (hard links, device nodes,
                // fifos, ...) are ignored, not failed.
            }
        }
    }

    Ok(())
}

fn create_parents(dir: &Path) -> Result<(), ArchiveError> {
    fs::create_dir_all(dir)?;
    set_unix_mode(dir, DEFAULT_DIR_MODE);
    Ok(())
}

/// Copies the entry's content through a size-limited reader, erroring
/// (and removing the partial file) if the actual decompressed bytes
/// exceed the cap even when the header declared a smaller size.
fn write_capped_file<R: Read>(entry: &mut R, target: &Path, max_size: u64) -> Result<(), ArchiveError> {
    let mut file = File::create(target)?;
    let mut limited = entry.take(max_size + 1);
    let written = io::copy(&mut limited, &mut file)?;
    if written > max_size {
        drop(file);
        let _ = fs::remove_file(target);
        return Err(ArchiveError::ExceedsMaximumSize(target.display().to_string()));
    }
    Ok(())
}

/// Validates and creates a symlink entry. Absolute targets are
/// rejected outright; relative targets are resolved against the
/// symlink's own parent directory and must land inside `dest`. The
/// target string is preserved verbatim — only its resolved form is
/// checked.
fn create_validated_symlink(dest: &Path, target: &Path, link_name: &Path) -> Result<(), ArchiveError> {
    if link_name.is_absolute() {
        return Err(ArchiveError::AbsoluteSymlink(link_name.display().to_string()));
    }

    let symlink_parent = target
        .parent()
        .unwrap_or(dest)
        .strip_prefix(dest)
        .unwrap_or(Path::new(""));

    let resolved_rel = symlink_parent.join(link_name);
    let resolved = validate_contained_path(dest, &resolved_rel)
        .map_err(|_| ArchiveError::SymlinkEscapesDestination(link_name.display().to_string()))?;
    let _ = resolved;

    #[cfg(unix)]
    {
        let _ = fs::remove_file(target);
        std::os::unix::fs::symlink(link_name, target)?;
    }
    #[cfg(not(unix))]
    {
        // Platforms that cannot create symlinks without elevated
        // privilege (Windows without SeCreateSymbolicLinkPrivilege)
        // silently skip the entry after validation succeeds.
        let _ = (target, link_name);
    }

    Ok(())
}

#[cfg(unix)]
fn set_unix_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    let _ = fs::set_permissions(path, fs::Permissions::from_mode(mode));
}

#[cfg(not(unix))]
fn set_unix_mode(_path: &Path, _mode: u32) {}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn build_archive(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
        let mut tar_bytes = Vec::new();
        {
            let mut builder = tar::Builder::new(&mut tar_bytes);
            for (name, content) in entries {
                let mut header = tar::Header::new_gnu();
                header.set_path(name).unwrap();
                header.set_size(content.len() as u64);
                header.set_mode(0o644);
                header.set_cksum();
                builder.append(&header, content).unwrap();
            }
            builder.finish().unwrap();
        }
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&tar_bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn extracts_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        let archive = build_archive(vec![("hello.txt", b"hi there")]);
        extract(archive.as_slice(), dir.path(), &ExtractOptions::default()).unwrap();
        let content = fs::read_to_string(dir.path().join("hello.txt")).unwrap();
        assert_eq!(content, "hi there");
    }

    #[test]
    fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let archive = build_archive(vec![("../../etc/passwd", b"evil")]);
        let err = extract(archive.as_slice(), dir.path(), &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidFilePath(_)));
        assert!(!dir.path().parent().unwrap().join("etc/passwd").exists());
    }

    #[test]
    fn rejects_oversized_file_by_declared_header_size() {
        let dir = tempfile::tempdir().unwrap();
        let archive = build_archive(vec![("big.bin", &vec![0u8; 2048])]);
        let options = ExtractOptions {
            max_extracted_file_size: 1024,
        };
        let err = extract(archive.as_slice(), dir.path(), &options).unwrap_err();
        assert!(matches!(err, ArchiveError::ExceedsMaximumSize(_)));
    }

    #[test]
    fn nested_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let archive = build_archive(vec![("a/b/c.txt", b"nested")]);
        extract(archive.as_slice(), dir.path(), &ExtractOptions::default()).unwrap();
        assert!(dir.path().join("a/b/c.txt").exists());
    }

    #[test]
    fn invalid_gzip_stream_fails() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = vec![0u8; 32];
        let err = extract(garbage.as_slice(), dir.path(), &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidGzip(_)));
    }
}

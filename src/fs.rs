//! Filesystem access used by the tree builder
//!
//! `TreeBuilder` never touches `std::fs` directly. It asks a `FileSystem` for
//! the kind and size of a path and for the names inside a directory, so the
//! traversal can run against an in-memory tree in tests.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use crate::tree::EntryKind;

/// What the builder needs to know about one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub kind: EntryKind,
    /// Byte length; only meaningful for regular files.
    pub size: u64,
}

/// Source of metadata and directory listings.
pub trait FileSystem {
    /// Lazy, single-pass sequence of child names.
    type Names: Iterator<Item = io::Result<OsString>>;

    /// Look up `path`. With `follow_symlinks` the target of a link is
    /// classified (stat), otherwise the link itself (lstat).
    fn metadata(&self, path: &Path, follow_symlinks: bool) -> io::Result<FileStat>;

    /// Open `path` for listing.
    fn read_dir(&self, path: &Path) -> io::Result<Self::Names>;
}

/// `FileSystem` backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

/// Names yielded by `std::fs::read_dir`.
pub struct OsNames(fs::ReadDir);

impl Iterator for OsNames {
    type Item = io::Result<OsString>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|entry| entry.map(|entry| entry.file_name()))
    }
}

impl FileSystem for OsFileSystem {
    type Names = OsNames;

    fn metadata(&self, path: &Path, follow_symlinks: bool) -> io::Result<FileStat> {
        let meta = if follow_symlinks {
            fs::metadata(path)?
        } else {
            fs::symlink_metadata(path)?
        };
        let file_type = meta.file_type();
        let kind = if file_type.is_file() {
            EntryKind::Regular
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };
        Ok(FileStat {
            kind,
            size: meta.len(),
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Self::Names> {
        fs::read_dir(path).map(OsNames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_metadata_classifies_file_and_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("five.txt"), "hello").unwrap();

        let file = OsFileSystem
            .metadata(&dir.path().join("five.txt"), true)
            .unwrap();
        assert_eq!(file.kind, EntryKind::Regular);
        assert_eq!(file.size, 5);

        let root = OsFileSystem.metadata(dir.path(), true).unwrap();
        assert_eq!(root.kind, EntryKind::Directory);
    }

    #[test]
    fn test_os_metadata_missing_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = OsFileSystem
            .metadata(&dir.path().join("missing"), true)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_os_metadata_symlink_follow_and_no_follow() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let followed = OsFileSystem.metadata(&dir.path().join("link"), true).unwrap();
        assert_eq!(followed.kind, EntryKind::Directory);

        let own = OsFileSystem.metadata(&dir.path().join("link"), false).unwrap();
        assert_eq!(own.kind, EntryKind::Other);
    }

    #[test]
    fn test_os_read_dir_yields_names() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("a"), "").unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();

        let mut names: Vec<OsString> = OsFileSystem
            .read_dir(dir.path())
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("a"), OsString::from("b")]);
    }
}

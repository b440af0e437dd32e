//! Test utilities: an in-memory filesystem and temporary directory trees.
//!
//! This module is only compiled for tests, benchmarks, and the `test-utils`
//! feature.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::fs::{FileStat, FileSystem};
use crate::tree::EntryKind;

#[derive(Debug, Clone)]
enum MemoryNode {
    File(u64),
    /// `None` yields a read error at that position of the listing.
    Dir(Vec<Option<OsString>>),
    Unlistable,
    Other,
    Broken,
}

/// In-memory `FileSystem` with a fixed enumeration order and injectable
/// failures.
///
/// Adding a path also appends its name to the parent's listing when the
/// parent is a directory that was added earlier, so listings come back in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    nodes: BTreeMap<PathBuf, MemoryNode>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryNode::Dir(Vec::new()))
    }

    pub fn file(self, path: impl AsRef<Path>, size: u64) -> Self {
        self.insert(path.as_ref(), MemoryNode::File(size))
    }

    /// A device, socket, or anything else that is neither file nor directory.
    pub fn other(self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryNode::Other)
    }

    /// Listed by its parent, but the metadata lookup fails.
    pub fn broken(self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryNode::Broken)
    }

    /// A directory that cannot be opened for listing.
    pub fn unlistable(self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryNode::Unlistable)
    }

    /// Append a bare name to a directory's listing without creating a node.
    pub fn raw_name(mut self, dir: impl AsRef<Path>, name: &str) -> Self {
        if let Some(MemoryNode::Dir(names)) = self.nodes.get_mut(dir.as_ref()) {
            names.push(Some(OsString::from(name)));
        }
        self
    }

    /// Make the next read of a directory's listing fail at this position.
    pub fn failing_read(mut self, dir: impl AsRef<Path>) -> Self {
        if let Some(MemoryNode::Dir(names)) = self.nodes.get_mut(dir.as_ref()) {
            names.push(None);
        }
        self
    }

    fn insert(mut self, path: &Path, node: MemoryNode) -> Self {
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if let Some(MemoryNode::Dir(names)) = self.nodes.get_mut(parent) {
                names.push(Some(name.to_os_string()));
            }
        }
        self.nodes.insert(path.to_path_buf(), node);
        self
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: no such entry", path.display()),
    )
}

impl FileSystem for MemoryFileSystem {
    type Names = std::vec::IntoIter<io::Result<OsString>>;

    fn metadata(&self, path: &Path, _follow_symlinks: bool) -> io::Result<FileStat> {
        let (kind, size) = match self.nodes.get(path) {
            Some(MemoryNode::File(size)) => (EntryKind::Regular, *size),
            Some(MemoryNode::Dir(_) | MemoryNode::Unlistable) => (EntryKind::Directory, 0),
            Some(MemoryNode::Other) => (EntryKind::Other, 0),
            Some(MemoryNode::Broken) | None => return Err(not_found(path)),
        };
        Ok(FileStat { kind, size })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Self::Names> {
        match self.nodes.get(path) {
            Some(MemoryNode::Dir(names)) => Ok(names
                .iter()
                .map(|name| {
                    name.clone()
                        .ok_or_else(|| io::Error::other("input/output error"))
                })
                .collect::<Vec<_>>()
                .into_iter()),
            Some(MemoryNode::Unlistable) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )),
            Some(_) => Err(io::Error::other("not a directory")),
            None => Err(not_found(path)),
        }
    }
}

/// A temporary directory tree on disk, removed when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create a directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

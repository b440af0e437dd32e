//! TreeBuilder - builds the full entry tree in memory

use std::ffi::OsStr;
use std::path::Path;

use glob::Pattern;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::fs::{FileSystem, OsFileSystem};

use super::config::{BuilderConfig, FailurePolicy};
use super::entry::{Entry, EntryKind, ListingStatus};
use super::utils::{
    MAX_NAME_LEN, compile_patterns, copy_name, is_dot_entry, name_overflow, should_ignore_name,
};

/// Builds an `Entry` tree by querying a `FileSystem`.
///
/// Every path is resolved by joining the parent path with the child name;
/// the process working directory is never read or changed, so one builder
/// can be shared between threads.
pub struct TreeBuilder<F = OsFileSystem> {
    fs: F,
    config: BuilderConfig,
    ignore: Vec<Pattern>,
}

impl TreeBuilder<OsFileSystem> {
    pub fn new(config: BuilderConfig) -> Self {
        Self::with_fs(OsFileSystem, config)
    }
}

impl<F: FileSystem> TreeBuilder<F> {
    pub fn with_fs(fs: F, config: BuilderConfig) -> Self {
        let ignore = compile_patterns(&config.ignore_patterns);
        Self { fs, config, ignore }
    }

    /// Build the tree rooted at `root`. The root entry is named after the
    /// path exactly as given; only its last component is length-checked.
    pub fn build(&self, root: &Path) -> Result<Entry> {
        let last = root.file_name().unwrap_or(root.as_os_str());
        check_name(last)?;
        let name = copy_name(root.as_os_str()).ok_or_else(|| Error::OutOfMemory {
            path: root.to_path_buf(),
        })?;
        self.classify(root, name, 0)
    }

    /// Build the entry for `name` inside `parent`, recursing into it when it
    /// is a directory. `depth` is the depth of the new entry.
    pub fn build_entry(&self, parent: &Path, name: &OsStr, depth: usize) -> Result<Entry> {
        check_name(name)?;
        let path = parent.join(name);
        let name = copy_name(name).ok_or_else(|| Error::OutOfMemory { path: path.clone() })?;
        self.classify(&path, name, depth)
    }

    fn classify(&self, path: &Path, name: String, depth: usize) -> Result<Entry> {
        let stat = self
            .fs
            .metadata(path, self.config.follow_symlinks)
            .map_err(|source| Error::NotFound {
                path: path.to_path_buf(),
                source,
            })?;
        trace!(path = %path.display(), kind = ?stat.kind, "stat");

        Ok(match stat.kind {
            EntryKind::Regular => Entry::Regular {
                name,
                size: stat.size,
            },
            EntryKind::Directory => {
                let (children, status) = self.list_directory(path, depth);
                Entry::Directory {
                    name,
                    children,
                    status,
                }
            }
            EntryKind::Other => Entry::Other { name },
        })
    }

    /// List and build the children of the directory at `path`.
    ///
    /// Never fails: an unopenable directory, or a child failure under
    /// `FailurePolicy::Discard`, yields no children and an `Unreadable`
    /// status.
    pub fn list_directory(&self, path: &Path, depth: usize) -> (Vec<Entry>, ListingStatus) {
        if self.config.max_depth.is_some_and(|max| depth >= max) {
            debug!(path = %path.display(), depth, "depth limit reached");
            return (Vec::new(), ListingStatus::DepthLimited);
        }

        let names = match self.fs.read_dir(path) {
            Ok(names) => names,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot open directory");
                return (Vec::new(), unreadable(&e));
            }
        };
        debug!(path = %path.display(), depth, "listing directory");

        let mut files = Vec::new();
        let mut dirs = Vec::new();
        let mut failures = Vec::new();

        for name in names {
            let child = match name {
                Ok(name) if is_dot_entry(&name) => continue,
                Ok(name) if should_ignore_name(&name, &self.ignore) => continue,
                Ok(name) => self.build_entry(path, &name, depth + 1),
                Err(e) => Err(Error::Io(e)),
            };

            let Err(err) = child.and_then(|entry| sort_into(entry, &mut files, &mut dirs, path))
            else {
                continue;
            };
            warn!(path = %path.display(), error = %err, "failed to build child entry");
            match self.config.failure_policy {
                FailurePolicy::Discard => return (Vec::new(), unreadable(&err)),
                FailurePolicy::KeepPartial => failures.push(err.to_string()),
            }
        }

        // Both groups were collected in encounter order; emit each reversed.
        let mut children = Vec::new();
        if children.try_reserve_exact(files.len() + dirs.len()).is_err() {
            let err = Error::OutOfMemory {
                path: path.to_path_buf(),
            };
            warn!(path = %path.display(), error = %err, "cannot merge listing");
            return (Vec::new(), unreadable(&err));
        }
        children.extend(files.into_iter().rev());
        children.extend(dirs.into_iter().rev());

        let status = if failures.is_empty() {
            ListingStatus::Complete
        } else {
            ListingStatus::Incomplete { failures }
        };
        (children, status)
    }
}

fn check_name(name: &OsStr) -> Result<()> {
    match name_overflow(name) {
        Some(len) => Err(Error::NameTooLong {
            name: name.to_string_lossy().into_owned(),
            len,
            max: MAX_NAME_LEN,
        }),
        None => Ok(()),
    }
}

fn sort_into(
    entry: Entry,
    files: &mut Vec<Entry>,
    dirs: &mut Vec<Entry>,
    dir: &Path,
) -> Result<()> {
    let bucket = if entry.is_dir() { dirs } else { files };
    bucket.try_reserve(1).map_err(|_| Error::OutOfMemory {
        path: dir.join(entry.name()),
    })?;
    bucket.push(entry);
    Ok(())
}

fn unreadable(err: &impl std::fmt::Display) -> ListingStatus {
    ListingStatus::Unreadable {
        reason: err.to_string(),
    }
}

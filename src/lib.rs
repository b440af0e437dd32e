//! fileinfo - list a directory tree by kind: regular files with their size,
//! directories, and everything else

pub mod error;
pub mod fs;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use fs::{FileStat, FileSystem, OsFileSystem};
pub use output::{OutputConfig, PATH_SENTINEL, TreePrinter, print_json, to_json};
pub use tree::{
    BuilderConfig, DEFAULT_MAX_DEPTH, Entry, EntryKind, FailurePolicy, ListingStatus,
    MAX_NAME_LEN, TreeBuilder,
};

//! Error types for tree building and output

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{name}: file name too long ({len} > {max} bytes)")]
    NameTooLong { name: String, len: usize, max: usize },
    #[error("cannot access '{}': {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("out of memory while building '{}'", .path.display())]
    OutOfMemory { path: PathBuf },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

//! Directory tree model and construction
//!
//! - `entry` - the `Entry` sum type and listing status
//! - `builder` - `TreeBuilder`, which stats a root and recurses into directories
//! - `config` - builder configuration
//! - `utils` - name checks and ignore pattern matching

mod builder;
mod config;
mod entry;
mod utils;

pub use builder::TreeBuilder;
pub use config::{BuilderConfig, DEFAULT_MAX_DEPTH, FailurePolicy};
pub use entry::{Entry, EntryKind, ListingStatus};
pub use utils::MAX_NAME_LEN;

//! Tree output
//!
//! - `config` - output configuration
//! - `tree` - the categorized text listing
//! - `json` - JSON output

mod config;
mod json;
mod tree;

pub use config::OutputConfig;
pub use json::{print_json, to_json};
pub use tree::{PATH_SENTINEL, TreePrinter};

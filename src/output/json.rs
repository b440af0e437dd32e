//! JSON output formatting

use std::io::{self, Write};

use crate::tree::Entry;

/// Serialize `entry` as pretty-printed JSON.
pub fn to_json(entry: &Entry) -> io::Result<String> {
    serde_json::to_string_pretty(entry).map_err(io::Error::other)
}

/// Print the tree as pretty-printed JSON to stdout.
pub fn print_json(entry: &Entry) -> io::Result<()> {
    let json = to_json(entry)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()
}

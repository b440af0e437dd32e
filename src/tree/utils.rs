//! Shared helpers for tree building

use std::ffi::OsStr;

use glob::Pattern;
use tracing::warn;

/// Longest accepted file name in bytes (Linux `NAME_MAX`).
pub const MAX_NAME_LEN: usize = 255;

/// Byte length of `name` if it exceeds `MAX_NAME_LEN`.
pub fn name_overflow(name: &OsStr) -> Option<usize> {
    let len = name.as_encoded_bytes().len();
    (len > MAX_NAME_LEN).then_some(len)
}

/// Copy `name` into an owned string, reporting allocation failure as `None`.
pub fn copy_name(name: &OsStr) -> Option<String> {
    let lossy = name.to_string_lossy();
    let mut owned = String::new();
    owned.try_reserve_exact(lossy.len()).ok()?;
    owned.push_str(&lossy);
    Some(owned)
}

/// `.` and `..` are never listed.
pub fn is_dot_entry(name: &OsStr) -> bool {
    name == "." || name == ".."
}

/// Compile ignore patterns, dropping the ones that do not parse.
pub fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!(pattern = %p, error = %e, "invalid ignore pattern, skipped");
                None
            }
        })
        .collect()
}

/// Check if a name matches any ignore pattern.
pub fn should_ignore_name(name: &OsStr, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let name = name.to_string_lossy();
    patterns.iter().any(|p| p.matches(&name))
}

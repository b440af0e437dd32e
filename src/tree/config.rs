//! Configuration types for the tree builder

/// Default depth guard. Deeper directories are listed without children.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// What to do with a directory when one of its children cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure and drop every child built so far; the
    /// directory is marked unreadable.
    #[default]
    Discard,
    /// Skip the failed child, keep going, and mark the directory incomplete.
    KeepPartial,
}

/// Configuration for tree building behavior.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Classify the target of a symlink rather than the link itself.
    pub follow_symlinks: bool,
    /// Directories at this depth are not descended into (root is depth 0).
    pub max_depth: Option<usize>,
    pub failure_policy: FailurePolicy,
    /// Glob patterns matched against child names; matches are skipped.
    pub ignore_patterns: Vec<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            failure_policy: FailurePolicy::Discard,
            ignore_patterns: Vec::new(),
        }
    }
}

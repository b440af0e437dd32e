//! The in-memory tree model

use serde::Serialize;

/// Classification of an entry, fixed when the entry is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Regular,
    Directory,
    Other,
}

/// How the listing of a directory ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListingStatus {
    Complete,
    /// The directory could not be opened, or a child failed and the
    /// partial listing was discarded. `children` is empty.
    Unreadable { reason: String },
    /// Some children failed and were skipped; one message per skipped child.
    Incomplete { failures: Vec<String> },
    /// Descent stopped at the depth guard. `children` is empty.
    DepthLimited,
}

/// One filesystem object. A `Directory` exclusively owns its children.
///
/// Children are ordered with every non-directory first, then every
/// directory; each group is in reverse of the order the directory listing
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Regular {
        name: String,
        size: u64,
    },
    Directory {
        name: String,
        children: Vec<Entry>,
        status: ListingStatus,
    },
    Other {
        name: String,
    },
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Regular { name, .. } => name,
            Entry::Directory { name, .. } => name,
            Entry::Other { name } => name,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Regular { .. } => EntryKind::Regular,
            Entry::Directory { .. } => EntryKind::Directory,
            Entry::Other { .. } => EntryKind::Other,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory { .. })
    }

    /// Children of a directory; empty for every other kind.
    pub fn children(&self) -> &[Entry] {
        match self {
            Entry::Directory { children, .. } => children,
            _ => &[],
        }
    }

    /// Number of entries in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Entry::count).sum::<usize>()
    }

    /// Consume the tree. Children are dropped before their parent.
    pub fn release(self) {
        drop(self);
    }
}

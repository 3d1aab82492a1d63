use std::path::PathBuf;

/// A single directory entry seen by the walker, handed to a
/// [`Matcher`](crate::traits::Matcher) for a yes/no decision.
///
/// Only `path` survives into the results; the rest exists so matchers don't
/// have to re-derive it.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Full path to the entry, rooted at the directory being walked.
    pub path: PathBuf,

    /// Base name of the entry (lossy UTF-8).
    pub name: String,

    /// What kind of entry this is. Symlinks are reported as such and are
    /// never descended into.
    pub kind: EntryKind,

    /// Levels below the walk root. Direct children of the root are depth 1.
    pub depth: usize,
}

/// The kind of a traversed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link, whatever it points at.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl EntryKind {
    pub(crate) fn from_file_type(ft: std::fs::FileType) -> Self {
        if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

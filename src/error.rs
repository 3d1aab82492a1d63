use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    // Request
    #[error("search keyword is empty")]
    EmptyKeyword,

    #[error("no search root provided")]
    MissingRoot,

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot resolve volume root of {}", .0.display())]
    VolumeRoot(PathBuf),

    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("symlink loop at {}", .0.display())]
    SymlinkLoop(PathBuf),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk error: {0}")]
    Walk(String),

    // Runtime
    #[error("search cancelled")]
    Cancelled,

    #[error("failed to start search worker: {0}")]
    ThreadSpawn(String),

    #[error("search worker panicked: {0}")]
    WorkerPanicked(String),
}

impl SearchError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::VolumeRoot(p)
            | Self::PermissionDenied(p)
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether the walk keeps going after this error.
    ///
    /// Recoverable errors are absorbed by the walker and only ever show up
    /// as diagnostics in [`SearchResult::errors`](crate::SearchResult::errors).
    /// Everything else terminates the invocation as
    /// [`SearchOutcome::Failed`](crate::SearchOutcome::Failed).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_) | Self::SymlinkLoop(_) | Self::Io { .. } | Self::Walk(_)
        )
    }

    pub(crate) fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

use std::path::{Component, Path, PathBuf};

use crate::error::SearchError;

/// Where a search escalates to when the requested root yields nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Fallback {
    /// The root of the volume holding the search root (`/` on Unix,
    /// `C:\` and friends on Windows).
    #[default]
    VolumeRoot,

    /// A fixed directory.
    Path(PathBuf),

    /// Never escalate; an empty first walk is the final answer.
    Disabled,
}

impl Fallback {
    /// Resolve the directory to re-walk for a search rooted at `root`.
    /// `None` means no escalation.
    pub(crate) fn resolve(&self, root: &Path) -> Result<Option<PathBuf>, SearchError> {
        match self {
            Fallback::VolumeRoot => volume_root(root).map(Some),
            Fallback::Path(p) => Ok(Some(p.clone())),
            Fallback::Disabled => Ok(None),
        }
    }
}

/// The volume root containing `path`, resolved against the filesystem.
pub fn volume_root(path: &Path) -> Result<PathBuf, SearchError> {
    let absolute = path
        .canonicalize()
        .map_err(|e| SearchError::from_io(path, e))?;
    root_of(&absolute).ok_or_else(|| SearchError::VolumeRoot(path.to_path_buf()))
}

/// Prefix and root components of an absolute path, without touching the
/// filesystem.
pub(crate) fn root_of(path: &Path) -> Option<PathBuf> {
    let mut root = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => root.push(component.as_os_str()),
            _ => break,
        }
    }
    if path.is_absolute() && !root.as_os_str().is_empty() {
        Some(root)
    } else {
        None
    }
}

/// Whether two paths name the same directory, comparing canonical forms.
pub(crate) fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

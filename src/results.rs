use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::SearchError;

/// The output of a completed search.
#[derive(Debug)]
pub struct SearchResult {
    /// Matched paths, unique, in the order they were first found.
    pub paths: Vec<PathBuf>,

    /// The directory the search escalated to when the requested root
    /// produced nothing. `None` if no fallback walk happened.
    pub escalated_to: Option<PathBuf>,

    /// Scan statistics across both phases.
    pub stats: ScanStats,

    /// Entries and directories the walker skipped. Only populated if
    /// `.collect_errors(true)` was set on the builder; these never fail
    /// the search.
    pub errors: Vec<SearchError>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

/// Terminal outcome of one search invocation. Exactly one is produced.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The search ran. The result may be empty.
    Completed(SearchResult),

    /// The search could not run, or was abandoned.
    Failed(SearchError),
}

impl SearchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn into_result(self) -> Result<SearchResult, SearchError> {
        self.into()
    }
}

impl From<Result<SearchResult, SearchError>> for SearchOutcome {
    fn from(res: Result<SearchResult, SearchError>) -> Self {
        match res {
            Ok(r) => Self::Completed(r),
            Err(e) => Self::Failed(e),
        }
    }
}

impl From<SearchOutcome> for Result<SearchResult, SearchError> {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Completed(r) => Ok(r),
            SearchOutcome::Failed(e) => Err(e),
        }
    }
}

/// Scan statistics for a completed search.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Files encountered (matched or not).
    pub files: usize,

    /// Directories encountered, the walk roots excluded.
    pub dirs: usize,

    /// Entries the walker skipped because they could not be read.
    pub skipped: usize,

    /// Wall-clock time from search start to completion.
    pub duration: Duration,

    /// `(files + dirs) / duration`, 0 on zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    pub(crate) fn compute(files: usize, dirs: usize, skipped: usize, duration: Duration) -> Self {
        let total = files + dirs;
        let eps = if duration.as_secs_f64() > 0.0 {
            (total as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            files,
            dirs,
            skipped,
            duration,
            entries_per_sec: eps,
        }
    }
}

/// Which walk a [`Progress`] tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Walking the requested root.
    Primary,
    /// Walking the fallback root after the primary walk came up empty.
    Fallback,
}

/// Periodic progress report, delivered through `.on_progress()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub phase: Phase,
    pub files: usize,
    pub dirs: usize,
    pub matches: usize,
    /// Set on the last tick of a phase.
    pub phase_done: bool,
}

/// Insertion-ordered path set. A path is kept at its first position only.
#[derive(Debug, Default)]
pub(crate) struct OrderedPaths {
    seen: HashSet<PathBuf>,
    order: Vec<PathBuf>,
}

impl OrderedPaths {
    /// Returns `false` if the path was already present.
    pub(crate) fn insert(&mut self, path: PathBuf) -> bool {
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.order.push(path);
        true
    }

    pub(crate) fn extend(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        for p in paths {
            self.insert(p);
        }
    }

    pub(crate) fn into_vec(self) -> Vec<PathBuf> {
        self.order
    }
}

//! # deepfind
//!
//! Depth-bounded recursive filename search with volume-root fallback.
//!
//! deepfind walks a directory tree, matches every file and directory name
//! against a keyword (case-insensitive substring), and returns the matched
//! paths in discovery order. If the requested root produces nothing, the
//! search is repeated once from the root of the volume that holds it.
//! Unreadable entries and directories are skipped; only problems with the
//! request itself fail a search.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("invoice_jan.txt"), "").unwrap();
//! fs::write(dir.path().join("report.txt"), "").unwrap();
//!
//! let result = deepfind::search()
//!     .root(dir.path())
//!     .keyword("INVOICE")
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(result.paths, vec![dir.path().join("invoice_jan.txt")]);
//! assert!(result.escalated_to.is_none());
//! ```
//!
//! # Background Searches
//!
//! [`SearchBuilder::spawn`] runs the walk on a worker thread and hands back
//! a [`SearchHandle`]. Exactly one [`SearchOutcome`] comes out of it:
//!
//! ```rust
//! use deepfind::{Fallback, SearchOutcome};
//!
//! let dir = tempfile::tempdir().unwrap();
//!
//! let handle = deepfind::search()
//!     .root(dir.path())
//!     .keyword("nothing-here")
//!     .fallback(Fallback::Disabled)
//!     .spawn()
//!     .unwrap();
//!
//! match handle.wait() {
//!     SearchOutcome::Completed(result) => assert!(result.is_empty()),
//!     SearchOutcome::Failed(err) => panic!("search failed: {err}"),
//! }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod output;

mod builder;
mod engine;
mod entry;
mod error;
mod handle;
mod orchestrator;
mod results;
mod traits;
mod volume;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use engine::{DEFAULT_MAX_DEPTH, DEFAULT_PROGRESS_INTERVAL};
pub use entry::{Entry, EntryKind};
pub use error::SearchError;
pub use handle::{CancelToken, SearchHandle};
pub use results::{Phase, Progress, ScanStats, SearchOutcome, SearchResult};
pub use traits::{KeywordMatcher, Matcher};
pub use volume::{volume_root, Fallback};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a search.
///
/// # Example
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::create_dir(dir.path().join("Target_dir")).unwrap();
///
/// let result = deepfind::search()
///     .root(dir.path())
///     .keyword("target")
///     .max_depth(1)
///     .run()
///     .unwrap();
///
/// assert_eq!(result.len(), 1);
/// ```
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::entry::{Entry, EntryKind};
use crate::error::SearchError;
use crate::handle::CancelToken;
use crate::results::{Phase, Progress};
use crate::traits::Matcher;

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Default depth budget: ten levels below the walk root.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default number of entries between two progress ticks.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 4096;

/// Traversal parameters passed from the builder to the walker.
#[derive(Debug, Clone)]
pub(crate) struct WalkConfig {
    pub max_depth:         usize,
    pub collect_errors:    bool,
    pub progress_interval: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth:         DEFAULT_MAX_DEPTH,
            collect_errors:    false,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Progress callback as stored by the builder.
pub(crate) type ProgressFn = dyn Fn(&Progress) + Send + Sync;

/// Everything one walk needs, borrowed from the orchestrator.
pub(crate) struct WalkContext<'a> {
    pub config:   &'a WalkConfig,
    pub matcher:  &'a dyn Matcher,
    pub cancel:   &'a CancelToken,
    pub progress: Option<&'a (dyn Fn(&Progress) + Send + Sync)>,
}

// ---------------------------------------------------------------------------
// Walked
// ---------------------------------------------------------------------------

/// Raw output of a single walk, before dedup and escalation.
#[derive(Debug, Default)]
pub(crate) struct Walked {
    pub paths:     Vec<PathBuf>,
    pub files:     usize,
    pub dirs:      usize,
    pub skipped:   usize,
    pub errors:    Vec<SearchError>,
    pub cancelled: bool,
}

// ---------------------------------------------------------------------------
// walk()
// ---------------------------------------------------------------------------

/// Walk `root` depth-first and collect every entry the matcher accepts.
///
/// Entries come out in pre-order: a directory's own match is recorded before
/// anything inside it, and siblings keep the order the OS enumerates them in.
/// An entry `max_depth` levels below `root` is still considered; nothing
/// deeper is read. Symlinks are matched by name but never followed.
///
/// Never fails. Unreadable entries and directories are skipped, counted in
/// `skipped`, and kept in `errors` when `collect_errors` is set. The cancel
/// token is polled before every entry.
pub(crate) fn walk(root: &Path, phase: Phase, ctx: &WalkContext<'_>) -> Walked {
    let mut out = Walked::default();

    if ctx.config.max_depth == 0 {
        return out;
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .same_file_system(false)
        .max_depth(Some(ctx.config.max_depth));

    let interval = ctx.config.progress_interval.max(1);
    let mut seen = 0usize;

    for res in builder.build() {
        if ctx.cancel.is_cancelled() {
            debug!(root = %root.display(), "walk cancelled");
            out.cancelled = true;
            break;
        }

        let entry = match res {
            Ok(e) => e,
            Err(e) => {
                let err = map_ignore_error(e);
                debug!(error = %err, "skipping unreadable entry");
                out.skipped += 1;
                if ctx.config.collect_errors {
                    out.errors.push(err);
                }
                continue;
            }
        };

        // The root itself is never a candidate
        if entry.depth() == 0 {
            continue;
        }

        let ft = match entry.file_type() {
            Some(ft) => ft,
            None => {
                out.skipped += 1;
                continue;
            }
        };

        let kind = EntryKind::from_file_type(ft);
        if kind == EntryKind::Dir {
            out.dirs += 1;
        } else {
            out.files += 1;
        }

        let candidate = Entry {
            name:  entry.file_name().to_string_lossy().into_owned(),
            depth: entry.depth(),
            path:  entry.into_path(),
            kind,
        };

        if ctx.matcher.is_match(&candidate) {
            out.paths.push(candidate.path);
        }

        seen += 1;
        if seen % interval == 0 {
            report(ctx, phase, &out, false);
        }
    }

    report(ctx, phase, &out, true);
    out
}

fn report(ctx: &WalkContext<'_>, phase: Phase, out: &Walked, phase_done: bool) {
    if let Some(progress) = ctx.progress {
        progress(&Progress {
            phase,
            files: out.files,
            dirs: out.dirs,
            matches: out.paths.len(),
            phase_done,
        });
    }
}

// ---------------------------------------------------------------------------
// Map ignore::Error to SearchError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> SearchError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => SearchError::from_io(&path, io_err),
            other => SearchError::Walk(format!("{}: {}", path.display(), other)),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::Loop { child, .. } => SearchError::SymlinkLoop(child),
        ignore::Error::Io(io_err) => SearchError::Io {
            path:   PathBuf::new(),
            source: io_err,
        },
        other => SearchError::Walk(other.to_string()),
    }
}

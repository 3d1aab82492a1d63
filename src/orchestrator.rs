use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::engine::{walk, ProgressFn, WalkConfig, WalkContext, Walked};
use crate::error::SearchError;
use crate::handle::CancelToken;
use crate::results::{OrderedPaths, Phase, ScanStats, SearchResult};
use crate::traits::Matcher;
use crate::volume::{same_dir, Fallback};

/// A validated, immutable search request. Owned by exactly one invocation.
pub(crate) struct SearchRequest {
    pub root:     PathBuf,
    pub matcher:  Box<dyn Matcher>,
    pub fallback: Fallback,
    pub config:   WalkConfig,
    pub cancel:   CancelToken,
    pub progress: Option<Box<ProgressFn>>,
}

/// Run one search to completion: walk the root, escalate once if nothing
/// matched, dedup, and build the result.
pub(crate) fn execute(req: &SearchRequest) -> Result<SearchResult, SearchError> {
    check_root(&req.root)?;

    let start = Instant::now();
    let ctx = WalkContext {
        config:   &req.config,
        matcher:  req.matcher.as_ref(),
        cancel:   &req.cancel,
        progress: req.progress.as_deref(),
    };

    debug!(root = %req.root.display(), max_depth = req.config.max_depth, "primary walk");
    let mut walked = walk(&req.root, Phase::Primary, &ctx);
    if walked.cancelled {
        warn!(root = %req.root.display(), "search cancelled");
        return Err(SearchError::Cancelled);
    }

    let mut escalated_to = None;
    if walked.paths.is_empty() {
        if let Some(target) = fallback_target(&req.root, &req.fallback)? {
            info!(from = %req.root.display(), to = %target.display(), "no matches, escalating");
            let second = walk(&target, Phase::Fallback, &ctx);
            if second.cancelled {
                warn!(root = %target.display(), "search cancelled");
                return Err(SearchError::Cancelled);
            }
            walked = merge(walked, second);
            escalated_to = Some(target);
        }
    }

    let Walked { paths, files, dirs, skipped, errors, .. } = walked;
    let mut unique = OrderedPaths::default();
    unique.extend(paths);
    let paths = unique.into_vec();

    debug!(matches = paths.len(), files, dirs, skipped, "search complete");

    Ok(SearchResult {
        paths,
        escalated_to,
        stats: ScanStats::compute(files, dirs, skipped, start.elapsed()),
        errors,
    })
}

/// The root must be an existing directory; anything else fails the request.
fn check_root(root: &Path) -> Result<(), SearchError> {
    let meta = std::fs::metadata(root).map_err(|e| SearchError::from_io(root, e))?;
    if !meta.is_dir() {
        return Err(SearchError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

fn fallback_target(root: &Path, fallback: &Fallback) -> Result<Option<PathBuf>, SearchError> {
    let Some(target) = fallback.resolve(root)? else {
        return Ok(None);
    };
    // Re-walking the same directory can't find anything new
    if same_dir(root, &target) {
        debug!(root = %root.display(), "fallback root is the search root, skipping");
        return Ok(None);
    }
    Ok(Some(target))
}

/// Fold the fallback walk into the primary one. Primary paths come first.
fn merge(mut first: Walked, second: Walked) -> Walked {
    first.paths.extend(second.paths);
    first.files += second.files;
    first.dirs += second.dirs;
    first.skipped += second.skipped;
    first.errors.extend(second.errors);
    first
}

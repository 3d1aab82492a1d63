use std::path::PathBuf;

use tracing::debug;

use crate::engine::{ProgressFn, WalkConfig};
use crate::error::SearchError;
use crate::handle::{CancelToken, SearchHandle};
use crate::orchestrator::{execute, SearchRequest};
use crate::results::{Progress, SearchOutcome, SearchResult};
use crate::traits::{KeywordMatcher, Matcher};
use crate::volume::Fallback;

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a search.
///
/// Created via [`deepfind::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) to block on the
/// result or [`spawn()`](SearchBuilder::spawn) to search on a worker thread.
///
/// # Example
///
/// ```rust,ignore
/// let result = deepfind::search()
///     .root("/data")
///     .keyword("invoice")
///     .max_depth(6)
///     .run()?;
/// ```
pub struct SearchBuilder {
    root:     Option<PathBuf>,
    keyword:  Option<String>,
    matcher:  Option<Box<dyn Matcher>>,
    fallback: Fallback,
    config:   WalkConfig,
    cancel:   CancelToken,
    progress: Option<Box<ProgressFn>>,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            root:     None,
            keyword:  None,
            matcher:  None,
            fallback: Fallback::default(),
            config:   WalkConfig::default(),
            cancel:   CancelToken::new(),
            progress: None,
        }
    }
}

impl SearchBuilder {
    // ── Scope ─────────────────────────────────────────────────────────────

    /// Directory to search. Must exist and be a directory when the search
    /// starts.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Where to escalate when the root yields nothing. Defaults to
    /// [`Fallback::VolumeRoot`].
    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Maximum traversal depth. `1` means the root's direct children only;
    /// `0` searches nothing. Defaults to 10.
    pub fn max_depth(mut self, d: usize) -> Self {
        self.config.max_depth = d;
        self
    }

    // ── Matching ──────────────────────────────────────────────────────────

    /// Match base names containing `keyword`, ignoring case.
    ///
    /// Surrounding whitespace is trimmed. A keyword that ends up empty makes
    /// the search fail with [`SearchError::EmptyKeyword`] rather than match
    /// every entry.
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Set a custom matcher. Takes precedence over `.keyword()`.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Keep skipped-entry errors in [`SearchResult::errors`].
    ///
    /// Disabled by default. Either way, they never fail the search.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.config.collect_errors = yes;
        self
    }

    /// Use an external cancellation token, e.g. one tripped by Ctrl-C.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Receive periodic [`Progress`] reports while walking.
    ///
    /// The callback runs on the searching thread.
    pub fn on_progress(mut self, f: impl Fn(&Progress) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    /// Entries between two progress reports. Defaults to 4096.
    pub fn progress_interval(mut self, n: usize) -> Self {
        self.config.progress_interval = n;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the search on the calling thread and return its result.
    ///
    /// # Errors
    ///
    /// Returns `Err` for invocation-level failures: no root, empty keyword,
    /// a root that is missing or not a directory, an unresolvable volume
    /// root, or cancellation. Unreadable entries inside the tree are never
    /// errors.
    pub fn run(self) -> Result<SearchResult, SearchError> {
        let req = self.into_request()?;
        execute(&req)
    }

    /// Run the search on a dedicated worker thread.
    ///
    /// The caller keeps control and collects the single outcome through
    /// [`SearchHandle::wait`]. Request errors are reported through the
    /// handle as well, so every spawned search ends in exactly one
    /// [`SearchOutcome`].
    ///
    /// # Errors
    ///
    /// Returns `Err(ThreadSpawn)` only if the OS refuses to start the thread.
    pub fn spawn(self) -> Result<SearchHandle, SearchError> {
        let cancel = self.cancel.clone();
        let thread = std::thread::Builder::new()
            .name("deepfind-search".into())
            .spawn(move || SearchOutcome::from(self.run()))
            .map_err(|e| SearchError::ThreadSpawn(e.to_string()))?;
        Ok(SearchHandle::new(cancel, thread))
    }

    fn into_request(self) -> Result<SearchRequest, SearchError> {
        let root = self.root.ok_or(SearchError::MissingRoot)?;

        let matcher: Box<dyn Matcher> = match (self.matcher, self.keyword) {
            (Some(m), _) => m,
            (None, Some(k)) => {
                let k = k.trim();
                if k.is_empty() {
                    return Err(SearchError::EmptyKeyword);
                }
                debug!(keyword = k, "keyword matcher");
                Box::new(KeywordMatcher::new(k))
            }
            (None, None) => return Err(SearchError::EmptyKeyword),
        };

        Ok(SearchRequest {
            root,
            matcher,
            fallback: self.fallback,
            config:   self.config,
            cancel:   self.cancel,
            progress: self.progress,
        })
    }
}

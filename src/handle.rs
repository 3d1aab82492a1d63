use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::error::SearchError;
use crate::results::SearchOutcome;

/// Cooperative cancellation flag shared between the caller and a search.
///
/// Cloning is cheap; all clones observe the same flag. The walker polls it
/// before every entry, so a cancelled search stops within one directory
/// read.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A search running on its own worker thread.
///
/// Created by [`SearchBuilder::spawn`](crate::SearchBuilder::spawn). The
/// outcome is taken with [`wait`](Self::wait), which consumes the handle, so
/// it can only be delivered once.
#[derive(Debug)]
pub struct SearchHandle {
    cancel: CancelToken,
    thread: JoinHandle<SearchOutcome>,
}

impl SearchHandle {
    pub(crate) fn new(cancel: CancelToken, thread: JoinHandle<SearchOutcome>) -> Self {
        Self { cancel, thread }
    }

    /// Ask the search to stop. [`wait`](Self::wait) then returns
    /// `Failed(Cancelled)` unless the search had already finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The token this search polls. Useful for wiring into signal handlers.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Whether the outcome is ready; `wait()` will not block once this is true.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block until the search finishes and take its outcome.
    ///
    /// A panic on the worker thread is reported as
    /// `Failed(WorkerPanicked)`.
    pub fn wait(self) -> SearchOutcome {
        match self.thread.join() {
            Ok(outcome) => outcome,
            Err(payload) => SearchOutcome::Failed(SearchError::WorkerPanicked(panic_message(&*payload))),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

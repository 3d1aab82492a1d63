use crate::entry::Entry;

/// Determines whether an entry is a match.
///
/// The default is [`KeywordMatcher`](crate::KeywordMatcher), installed by
/// `.keyword()` on the builder. Implement this for anything else: extension
/// filters, prefix-only matching, metadata checks.
///
/// # Thread Safety
///
/// `Send + Sync` are required. The matcher moves onto the search worker
/// thread when the search is spawned.
///
/// # Example
///
/// ```rust
/// use deepfind::{Matcher, Entry};
///
/// struct ExtensionMatcher(String);
///
/// impl Matcher for ExtensionMatcher {
///     fn is_match(&self, entry: &Entry) -> bool {
///         entry.path
///             .extension()
///             .map(|e| e.eq_ignore_ascii_case(&self.0))
///             .unwrap_or(false)
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this entry should be included in results.
    fn is_match(&self, entry: &Entry) -> bool;
}

/// Matches entries whose base name contains the keyword, ignoring case.
///
/// A name that starts with the keyword also contains it, so prefix matches
/// need no separate rule.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    needle: String,
}

impl KeywordMatcher {
    pub fn new(keyword: &str) -> Self {
        Self {
            needle: keyword.to_lowercase(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.needle
    }
}

impl Matcher for KeywordMatcher {
    fn is_match(&self, entry: &Entry) -> bool {
        entry.name.to_lowercase().contains(&self.needle)
    }
}

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use deepfind::{search, CancelToken, Entry, Fallback, Matcher, Phase, SearchError, SearchOutcome};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory tree for testing.
///
/// Structure:
/// ```
/// tmp/
///   invoice_jan.txt
///   invoice_feb.txt
///   report.txt
///   notes.md
///   subdir/
///     INVOICE_mar.txt
///     other.rs
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("invoice_jan.txt"), "january invoice").unwrap();
    fs::write(root.join("invoice_feb.txt"), "february invoice").unwrap();
    fs::write(root.join("report.txt"), "quarterly report").unwrap();
    fs::write(root.join("notes.md"), "some notes").unwrap();

    let sub = root.join("subdir");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("INVOICE_mar.txt"), "march invoice").unwrap();
    fs::write(sub.join("other.rs"), "fn main() {}").unwrap();

    dir
}

/// `root/l1/l2/.../lN/hit_N` for N in 1..=depth.
fn setup_deep_dir(depth: usize) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let mut cur = dir.path().to_path_buf();
    for level in 1..=depth {
        fs::write(cur.join(format!("hit_{level}")), "").unwrap();
        cur = cur.join(format!("l{level}"));
        fs::create_dir(&cur).unwrap();
    }
    dir
}

/// Independent oracle: every entry within `max_depth` whose name contains
/// `keyword`, found with walkdir.
fn expected(root: &Path, keyword: &str, max_depth: usize) -> BTreeSet<PathBuf> {
    let needle = keyword.to_lowercase();
    walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().to_lowercase().contains(&needle))
        .map(|e| e.into_path())
        .collect()
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[test]
fn finds_matching_files() {
    let dir = setup_test_dir();
    let result = search()
        .root(dir.path())
        .keyword("invoice")
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    assert_eq!(result.len(), 3, "should find 3 invoice files");
    assert!(result
        .paths
        .iter()
        .all(|p| p.file_name().unwrap().to_string_lossy().to_lowercase().contains("invoice")));
    assert!(result.escalated_to.is_none());
}

#[test]
fn agrees_with_independent_walk() {
    let dir = setup_test_dir();
    fs::create_dir_all(dir.path().join("a/b/report_dir/c")).unwrap();
    fs::write(dir.path().join("a/b/report_dir/c/old_report.txt"), "").unwrap();

    let result = search()
        .root(dir.path())
        .keyword("RePoRt")
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    let found: BTreeSet<_> = result.paths.iter().cloned().collect();
    assert_eq!(found.len(), result.len(), "no duplicates");
    assert_eq!(found, expected(dir.path(), "report", 10));
}

#[test]
fn directories_match_by_name() {
    let dir = setup_test_dir();
    let result = search()
        .root(dir.path())
        .keyword("subd")
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    assert_eq!(result.paths, vec![dir.path().join("subdir")]);
}

#[test]
fn custom_matcher_works() {
    struct RustMatcher;
    impl Matcher for RustMatcher {
        fn is_match(&self, entry: &Entry) -> bool {
            entry.path.extension().map(|e| e == "rs").unwrap_or(false)
        }
    }

    let dir = setup_test_dir();
    let result = search()
        .root(dir.path())
        .with_matcher(RustMatcher)
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    assert_eq!(result.len(), 1, "should find exactly 1 .rs file");
    assert!(result.paths[0].to_string_lossy().ends_with("other.rs"));
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

#[test]
fn empty_keyword_is_rejected() {
    let dir = setup_test_dir();
    for kw in ["", "   "] {
        let err = search().root(dir.path()).keyword(kw).run().unwrap_err();
        assert!(matches!(err, SearchError::EmptyKeyword), "keyword {kw:?}");
    }
}

#[test]
fn missing_keyword_is_rejected() {
    let dir = setup_test_dir();
    let err = search().root(dir.path()).run().unwrap_err();
    assert!(matches!(err, SearchError::EmptyKeyword));
}

#[test]
fn missing_root_fails_instead_of_escalating() {
    let dir = setup_test_dir();
    let err = search()
        .root(dir.path().join("does-not-exist"))
        .keyword("invoice")
        .fallback(Fallback::Path(dir.path().to_path_buf()))
        .run()
        .unwrap_err();

    assert!(matches!(err, SearchError::NotFound(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn no_root_is_an_error() {
    let err = search().keyword("x").run().unwrap_err();
    assert!(matches!(err, SearchError::MissingRoot));
}

// ---------------------------------------------------------------------------
// Depth bound
// ---------------------------------------------------------------------------

#[test]
fn entry_at_max_depth_is_found() {
    let dir = setup_deep_dir(5);
    let result = search()
        .root(dir.path())
        .keyword("hit_")
        .max_depth(3)
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    let found = names(&result.paths);
    assert!(found.contains(&"hit_3".to_string()), "depth 3 must be reached: {found:?}");
    assert!(!found.contains(&"hit_4".to_string()), "depth 4 must not be reached: {found:?}");
    assert_eq!(found.len(), 3);
}

#[test]
fn default_depth_is_ten_levels() {
    let dir = setup_deep_dir(12);
    let result = search()
        .root(dir.path())
        .keyword("hit_")
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    let found = names(&result.paths);
    assert!(found.contains(&"hit_10".to_string()));
    assert!(!found.contains(&"hit_11".to_string()));
}

#[test]
fn zero_depth_finds_nothing() {
    let dir = setup_test_dir();
    let result = search()
        .root(dir.path())
        .keyword("invoice")
        .max_depth(0)
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    assert!(result.is_empty());
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn directory_precedes_its_contents() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("target_dir");
    fs::create_dir_all(target.join("nested")).unwrap();
    fs::write(target.join("nested/target.txt"), "").unwrap();
    fs::write(dir.path().join("target_sibling.txt"), "").unwrap();

    let result = search()
        .root(dir.path())
        .keyword("target")
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    assert_eq!(result.len(), 3);
    let dir_pos = result.paths.iter().position(|p| p == &target).unwrap();
    let child_pos = result
        .paths
        .iter()
        .position(|p| p == &target.join("nested/target.txt"))
        .unwrap();
    assert_eq!(child_pos, dir_pos + 1, "subtree results follow the directory itself");
}

#[test]
fn repeated_searches_are_identical() {
    let dir = setup_test_dir();
    let run = || {
        search()
            .root(dir.path())
            .keyword("i")
            .fallback(Fallback::Disabled)
            .run()
            .unwrap()
            .paths
    };

    assert_eq!(run(), run());
}

// ---------------------------------------------------------------------------
// Escalation
// ---------------------------------------------------------------------------

/// `vol/a/target.txt` and an empty `vol/b/`.
fn setup_volume() -> tempfile::TempDir {
    let vol = tempfile::tempdir().unwrap();
    fs::create_dir(vol.path().join("a")).unwrap();
    fs::create_dir(vol.path().join("b")).unwrap();
    fs::write(vol.path().join("a/target.txt"), "").unwrap();
    vol
}

#[test]
fn empty_root_escalates_to_fallback() {
    let vol = setup_volume();
    let result = search()
        .root(vol.path().join("b"))
        .keyword("target")
        .fallback(Fallback::Path(vol.path().to_path_buf()))
        .run()
        .unwrap();

    assert_eq!(result.paths, vec![vol.path().join("a/target.txt")]);
    assert_eq!(result.escalated_to.as_deref(), Some(vol.path()));
}

#[test]
fn matching_root_never_escalates() {
    let vol = setup_volume();
    // A second match outside the root that escalation would pick up
    fs::write(vol.path().join("target_outside.txt"), "").unwrap();

    let progress = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&progress);
    let result = search()
        .root(vol.path().join("a"))
        .keyword("target")
        .fallback(Fallback::Path(vol.path().to_path_buf()))
        .on_progress(move |p| sink.lock().unwrap().push(p.phase))
        .run()
        .unwrap();

    assert_eq!(result.paths, vec![vol.path().join("a/target.txt")]);
    assert!(result.escalated_to.is_none());
    assert!(progress.lock().unwrap().iter().all(|ph| *ph == Phase::Primary));
}

#[test]
fn empty_fallback_completes_empty() {
    let vol = setup_volume();
    let outcome = search()
        .root(vol.path().join("b"))
        .keyword("absent")
        .fallback(Fallback::Path(vol.path().to_path_buf()))
        .spawn()
        .unwrap()
        .wait();

    match outcome {
        SearchOutcome::Completed(result) => {
            assert!(result.is_empty());
            assert_eq!(result.escalated_to.as_deref(), Some(vol.path()));
        }
        SearchOutcome::Failed(err) => panic!("expected empty completion, got {err}"),
    }
}

#[test]
fn fallback_reports_both_phases() {
    let vol = setup_volume();
    let phases = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&phases);

    search()
        .root(vol.path().join("b"))
        .keyword("target")
        .fallback(Fallback::Path(vol.path().to_path_buf()))
        .on_progress(move |p| {
            if p.phase_done {
                sink.lock().unwrap().push(p.phase);
            }
        })
        .run()
        .unwrap();

    assert_eq!(*phases.lock().unwrap(), vec![Phase::Primary, Phase::Fallback]);
}

#[test]
fn disabled_fallback_stays_put() {
    let vol = setup_volume();
    let result = search()
        .root(vol.path().join("b"))
        .keyword("target")
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    assert!(result.is_empty());
    assert!(result.escalated_to.is_none());
}

// ---------------------------------------------------------------------------
// Background execution and cancellation
// ---------------------------------------------------------------------------

#[test]
fn spawned_search_delivers_results() {
    let dir = setup_test_dir();
    let handle = search()
        .root(dir.path())
        .keyword("invoice")
        .fallback(Fallback::Disabled)
        .spawn()
        .unwrap();

    let result = handle.wait().into_result().unwrap();
    assert_eq!(result.len(), 3);
}

#[test]
fn spawned_request_error_is_failed_outcome() {
    let dir = setup_test_dir();
    let outcome = search().root(dir.path()).keyword(" ").spawn().unwrap().wait();
    assert!(matches!(outcome, SearchOutcome::Failed(SearchError::EmptyKeyword)));
}

#[test]
fn cancelled_search_fails_and_does_not_escalate() {
    let vol = setup_volume();
    let token = CancelToken::new();
    token.cancel();

    let outcome = search()
        .root(vol.path().join("b"))
        .keyword("target")
        .fallback(Fallback::Path(vol.path().to_path_buf()))
        .cancel_token(token)
        .spawn()
        .unwrap()
        .wait();

    assert!(matches!(outcome, SearchOutcome::Failed(SearchError::Cancelled)));
}

// ---------------------------------------------------------------------------
// Filesystem edge cases
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn symlinks_match_but_are_not_followed() {
    let dir = tempfile::tempdir().unwrap();
    let real = dir.path().join("real");
    fs::create_dir(&real).unwrap();
    fs::write(real.join("target_inner.txt"), "").unwrap();
    std::os::unix::fs::symlink(&real, dir.path().join("target_link")).unwrap();

    let result = search()
        .root(dir.path())
        .keyword("target")
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    let found: BTreeSet<_> = result.paths.into_iter().collect();
    let want: BTreeSet<_> = [real.join("target_inner.txt"), dir.path().join("target_link")]
        .into_iter()
        .collect();
    assert_eq!(found, want);
}

#[cfg(unix)]
#[test]
fn unreadable_directory_does_not_abort_search() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let locked = dir.path().join("locked_target");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("target_hidden.txt"), "").unwrap();
    fs::create_dir(dir.path().join("open")).unwrap();
    fs::write(dir.path().join("open/target_visible.txt"), "").unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users read through mode bits; nothing to deny then
    let denied = fs::read_dir(&locked).is_err();

    let result = search()
        .root(dir.path())
        .keyword("target")
        .fallback(Fallback::Disabled)
        .collect_errors(true)
        .run();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let result = result.unwrap();

    assert!(result.paths.contains(&locked), "the locked dir still matches by name");
    assert!(result.paths.contains(&dir.path().join("open/target_visible.txt")));
    if denied {
        assert!(!result.paths.contains(&locked.join("target_hidden.txt")));
        assert_eq!(result.stats.skipped, 1);
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, SearchError::PermissionDenied(p) if p == &locked)));
    } else {
        // Mode bits don't bind here; the skip path is covered by the
        // engine's vanished-directory test instead
        assert!(result.paths.contains(&locked.join("target_hidden.txt")));
        assert_eq!(result.stats.skipped, 0);
        assert!(result.errors.is_empty());
    }
}

#[test]
fn stats_are_populated() {
    let dir = setup_test_dir();
    let result = search()
        .root(dir.path())
        .keyword("invoice")
        .fallback(Fallback::Disabled)
        .run()
        .unwrap();

    // 6 files + 1 subdir
    assert_eq!(result.stats.files, 6);
    assert_eq!(result.stats.dirs, 1);
    assert_eq!(result.stats.skipped, 0);
    assert!(result.errors.is_empty(), "errors are only kept when collecting");
}

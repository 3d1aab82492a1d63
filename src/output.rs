//! Result presentation helpers used by the CLI.
//!
//! The saved-results format is one path per line, UTF-8, newline-terminated,
//! in result order. Non-UTF-8 path bytes are replaced lossily.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// How many paths the CLI prints before summarising the rest.
pub const DEFAULT_DISPLAY_LIMIT: usize = 1000;

/// Write `paths` to `out`, one per line.
pub fn write_paths<W: Write>(mut out: W, paths: &[PathBuf]) -> io::Result<()> {
    for p in paths {
        writeln!(out, "{}", p.to_string_lossy())?;
    }
    out.flush()
}

/// Save `paths` to a file at `dest`, replacing it if present.
pub fn save_results(dest: &Path, paths: &[PathBuf]) -> io::Result<()> {
    let file = File::create(dest)?;
    write_paths(BufWriter::new(file), paths)
}

/// Print at most `limit` paths, then a "... and N more." line for the rest.
pub fn write_listing<W: Write>(mut out: W, paths: &[PathBuf], limit: usize) -> io::Result<()> {
    writeln!(out, "\nFound {} items:", paths.len())?;
    let shown = paths.len().min(limit);
    write_paths(&mut out, &paths[..shown])?;
    if paths.len() > shown {
        writeln!(out, "\n... and {} more.", paths.len() - shown)?;
    }
    out.flush()
}

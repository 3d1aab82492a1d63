//! deepfind - recursive filename search
//!
//! Entry point for the CLI application.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use deepfind::config::{CliArgs, CliConfig};
use deepfind::output::{save_results, write_listing, write_paths};
use deepfind::{CancelToken, SearchOutcome, SearchResult};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose)?;

    let config = CliConfig::from_args(args).context("Invalid arguments")?;

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, stopping search...");
        on_interrupt.cancel();
    })
    .context("Failed to set signal handler")?;

    if !config.quiet {
        println!("Searching for '{}' in {}...", config.keyword, config.root.display());
    }

    let handle = deepfind::search()
        .root(&config.root)
        .keyword(&config.keyword)
        .max_depth(config.max_depth)
        .fallback(config.fallback.clone())
        .collect_errors(config.show_errors)
        .cancel_token(cancel)
        .spawn()
        .context("Failed to start search")?;

    let result = match handle.wait() {
        SearchOutcome::Completed(result) => result,
        SearchOutcome::Failed(err) => {
            return Err(err).with_context(|| format!("Search in {} failed", config.root.display()));
        }
    };

    report(&config, &result).context("Failed to write results")?;

    // An empty result still rewrites the file so no earlier run's paths survive
    if let Some(dest) = &config.output {
        save_results(dest, &result.paths)
            .with_context(|| format!("Failed to save results to {}", dest.display()))?;
        if !config.quiet {
            println!("Saved {} results to {}", result.len(), dest.display());
        }
    }

    Ok(())
}

fn report(config: &CliConfig, result: &SearchResult) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.quiet {
        return write_paths(&mut out, &result.paths);
    }

    writeln!(out, "Search completed in {:.2} seconds", result.stats.duration.as_secs_f64())?;
    if let Some(root) = &result.escalated_to {
        writeln!(out, "Nothing found under {}, searched {} instead", config.root.display(), root.display())?;
    }

    if result.is_empty() {
        writeln!(out, "No matching files found.")?;
    } else {
        write_listing(&mut out, &result.paths, config.display_limit)?;
    }

    if config.show_errors && !result.errors.is_empty() {
        writeln!(out, "\nSkipped {} unreadable entries:", result.errors.len())?;
        for err in &result.errors {
            writeln!(out, "  {err}")?;
        }
    }

    writeln!(
        out,
        "\nScanned {} files and {} directories ({} entries/s)",
        result.stats.files, result.stats.dirs, result.stats.entries_per_sec
    )?;
    out.flush()
}

/// Logs go to stderr so stdout stays clean for piping paths.
fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("deepfind=debug,warn")
    } else {
        EnvFilter::new("deepfind=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

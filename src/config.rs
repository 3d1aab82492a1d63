//! Command-line configuration for the `deepfind` binary.
//!
//! `CliArgs` is the raw clap surface; `CliConfig` is the validated form the
//! binary actually runs with.

use std::path::PathBuf;

use clap::Parser;

use crate::engine::DEFAULT_MAX_DEPTH;
use crate::output::DEFAULT_DISPLAY_LIMIT;
use crate::volume::Fallback;
use crate::SearchError;

/// Recursive filename search
#[derive(Parser, Debug, Clone)]
#[command(
    name = "deepfind",
    version,
    about = "Recursive filename search with volume-root fallback",
    long_about = "Walks ROOT up to --max-depth levels and lists every file or directory whose \
                  name contains KEYWORD (case-insensitive).\n\n\
                  If nothing under ROOT matches, the search is repeated once from the root of \
                  the volume holding ROOT, unless --no-fallback is given.",
    after_help = "EXAMPLES:\n    \
        deepfind ~/projects invoice\n    \
        deepfind /data report -d 4 -o results.txt\n    \
        deepfind . notes --no-fallback"
)]
pub struct CliArgs {
    /// Directory to start searching from
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Text to look for in file and directory names
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Maximum directory depth below ROOT
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH, value_name = "NUM")]
    pub max_depth: usize,

    /// Save all results to FILE, one path per line
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Do not re-search from the volume root when ROOT yields nothing
    #[arg(long, conflicts_with = "fallback_root")]
    pub no_fallback: bool,

    /// Re-search from DIR instead of the volume root when ROOT yields nothing
    #[arg(long, value_name = "DIR")]
    pub fallback_root: Option<PathBuf>,

    /// Print at most NUM results (all of them are still saved with --output)
    #[arg(long, default_value_t = DEFAULT_DISPLAY_LIMIT, value_name = "NUM")]
    pub display_limit: usize,

    /// List entries that could not be read
    #[arg(long)]
    pub errors: bool,

    /// Quiet mode - print matched paths only
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub root:          PathBuf,
    pub keyword:       String,
    pub max_depth:     usize,
    pub fallback:      Fallback,
    pub output:        Option<PathBuf>,
    pub display_limit: usize,
    pub show_errors:   bool,
    pub quiet:         bool,
}

impl CliConfig {
    /// Validate raw arguments. Blank keywords are refused here so the user
    /// gets a usage error instead of a failed search.
    pub fn from_args(args: CliArgs) -> Result<Self, SearchError> {
        let keyword = args.keyword.trim().to_string();
        if keyword.is_empty() {
            return Err(SearchError::EmptyKeyword);
        }

        let fallback = match (args.no_fallback, args.fallback_root) {
            (true, _) => Fallback::Disabled,
            (false, Some(dir)) => Fallback::Path(dir),
            (false, None) => Fallback::VolumeRoot,
        };

        Ok(Self {
            root: args.root,
            keyword,
            max_depth: args.max_depth,
            fallback,
            output: args.output,
            display_limit: args.display_limit,
            show_errors: args.errors,
            quiet: args.quiet,
        })
    }
}

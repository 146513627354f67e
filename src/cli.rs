use crate::output::OutputFormat;
use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Wildcard name pattern: `*` matches any run of characters, `?`
    /// exactly one. Matching is case-insensitive and covers the whole
    /// name.
    pub pattern: String,

    /// Root directory to search.
    #[clap(default_value = ".")]
    pub path: PathBuf,

    /// Descend into subdirectories.
    #[clap(short, long, value_parser, default_value_t = false)]
    pub recursive: bool,

    /// Search subdirectories concurrently (implies --recursive).
    #[clap(short, long, value_parser, default_value_t = false)]
    pub parallel: bool,

    /// Match directory names as results (non-recursive searches only).
    #[clap(long, value_parser, default_value_t = false)]
    pub include_dirs: bool,

    /// Drop unsearchable-directory reports instead of printing them.
    #[clap(long, value_parser, default_value_t = false)]
    pub suppress_errors: bool,

    /// Buffer more entries per directory listing round.
    #[clap(long, value_parser, default_value_t = false)]
    pub large_fetch: bool,

    /// Worker threads for --parallel (default: one per CPU).
    #[clap(long, value_parser)]
    pub threads: Option<usize>,

    /// Long listing with sizes and modification times.
    #[clap(short, long, value_parser, default_value_t = false)]
    pub long: bool,

    /// Output format.
    #[clap(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Copy matched paths to the clipboard.
    #[clap(long, value_parser, default_value_t = false)]
    pub copy: bool,

    /// Write the log to a file instead of stderr.
    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,

    /// Generate shell completions and exit.
    #[clap(long, value_enum)]
    pub completions: Option<Shell>,
}

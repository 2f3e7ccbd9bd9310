//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for desk using the `clap` crate.
//!
//! # Commands
//!
//! - **search**: Run the filters and print a page of sorted results
//! - **suggest**: List filters matching some input
//! - **query**: Print the backend query compiled from the filters
//! - **open**: Open a document with the system handler
//! - **completions**: Generate shell completions
//! - **config**: Show the effective configuration
//!
//! Filters use the textual syntax `[!]kind:value`, e.g. `tag:project`,
//! `!folder:archive`, `link:notes/beta.md|Beta` or `text:needle`.
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use desk::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["desk", "query", "-f", "tag:project", "-f", "!folder:archive"]);
//! match cli.command {
//!     Commands::Query { filters } => assert_eq!(filters.len(), 2),
//!     _ => unreachable!(),
//! }
//! ```

use crate::filter::Filter;
use crate::search::{SortKind, SortOption};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::io::Write;
use std::path::PathBuf;

/// Output format for search results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable rows
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "desk")]
#[command(about = "Filter and sort a markdown vault by tags, folders, links and text", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root (overrides config)
    #[arg(long = "vault", value_name = "PATH", global = true)]
    pub vault: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the filters and print sorted results
    #[command(visible_alias = "s")]
    Search {
        /// Filter to apply (repeatable): [!]kind:value
        #[arg(short = 'f', long = "filter", value_name = "FILTER")]
        filters: Vec<Filter>,

        /// Sort key: modified_date, name, size or backlinks
        #[arg(short = 's', long = "sort", value_name = "KIND")]
        sort: Option<SortKind>,

        /// Reverse the sort direction
        #[arg(short = 'r', long = "reverse")]
        reverse: bool,

        /// Number of batches to print
        #[arg(short = 'p', long = "pages", value_name = "N", default_value_t = 1, conflicts_with = "all")]
        pages: usize,

        /// Print every result
        #[arg(short = 'a', long = "all")]
        all: bool,

        /// Output format
        #[arg(long = "format", value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// List suggested filters matching the input
    Suggest {
        /// Text typed so far
        #[arg(value_name = "INPUT", default_value = "")]
        input: String,

        /// Filters already active; their targets are not suggested
        #[arg(short = 'f', long = "filter", value_name = "FILTER")]
        filters: Vec<Filter>,

        /// Maximum number of suggestions (overrides config)
        #[arg(short = 'l', long = "limit", value_name = "N")]
        limit: Option<usize>,
    },

    /// Print the compiled backend query
    Query {
        /// Filter to compile (repeatable)
        #[arg(short = 'f', long = "filter", value_name = "FILTER")]
        filters: Vec<Filter>,
    },

    /// Open a document with the system handler
    Open {
        /// Document path relative to the vault root
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show the effective configuration and its location
    Config,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Sort requested on the command line, falling back to `default`
///
/// `--reverse` without `--sort` reverses the default sort.
#[must_use]
pub fn requested_sort(
    kind: Option<SortKind>,
    reverse: bool,
    default: Option<SortOption>,
) -> Option<SortOption> {
    match (kind, reverse) {
        (Some(kind), reverse) => Some(SortOption::new(kind, reverse)),
        (None, true) => Some(default.unwrap_or_default().flipped()),
        (None, false) => default,
    }
}

/// Write completions for `shell` to `buf`
pub fn generate_completions(shell: Shell, buf: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, buf);
}

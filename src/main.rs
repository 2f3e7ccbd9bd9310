//! Desk CLI application entry point
//!
//! Drives the filter engine over a directory of markdown notes.
//!
//! # Usage
//!
//! ```bash
//! # Everything tagged #project outside the archive, most linked first
//! desk search -f tag:project -f '!folder:archive' --sort backlinks -r
//!
//! # Documents mentioning "needle", all pages, as JSON
//! desk search -f text:needle --all --format json
//!
//! # What filters match "pro"?
//! desk suggest pro
//!
//! # Show the backend query for a filter set
//! desk query -f tag:project -f link:alpha.md
//! ```
//!
//! # Configuration
//!
//! Settings live in `<config_dir>/desk/config.toml`; `desk config` prints
//! the effective values. Set `RUST_LOG` or pass `--verbose` for logs.

use desk::cli::{Cli, Commands, OutputFormat, generate_completions, requested_sort};
use desk::config::DeskConfig;
use desk::filter::Filter;
use desk::output;
use desk::query;
use desk::search::{SortKind, SortOption};
use desk::session::Desk;
use desk::vault::{FsVault, SystemOpener};
use desk::{DeskError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type VaultDesk = Desk<FsVault, FsVault>;

/// Initialize tracing: `RUST_LOG` overrides; `--verbose` => debug; else warn
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "desk=debug" } else { "desk=warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn vault_root(config: &DeskConfig, explicit: Option<&Path>) -> Result<PathBuf> {
    config.vault_root(explicit).ok_or_else(|| {
        DeskError::InvalidInput(
            "No vault given. Pass --vault <PATH> or set `vault` in the config file.".into(),
        )
    })
}

fn open_desk(config: &DeskConfig, root: &Path) -> Result<VaultDesk> {
    let vault = Arc::new(FsVault::with_cache_capacity(root, config.body_cache_capacity)?);
    Ok(Desk::new(Arc::clone(&vault), vault).with_config(config))
}

fn resolve_filters(desk: &VaultDesk, filters: Vec<Filter>) -> Vec<Filter> {
    filters.into_iter().map(|f| desk.resolve_link(f)).collect()
}

fn handle_search_command(
    mut desk: VaultDesk,
    filters: Vec<Filter>,
    sort: Option<SortOption>,
    pages: Option<usize>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let filters = resolve_filters(&desk, filters);
    desk.set_filters(filters);
    desk.set_sort(sort);
    desk.tick()?;

    match pages {
        Some(pages) => {
            for _ in 1..pages {
                if !desk.reveal_more() {
                    break;
                }
            }
        }
        None => while desk.reveal_more() {},
    }

    if format == OutputFormat::Json {
        println!("{}", output::results_json(desk.window())?);
        return Ok(());
    }

    if !quiet {
        for filter in desk.filters() {
            println!("{}", output::filter_line(filter));
        }
    }
    for result in desk.window() {
        println!("{}", output::result_line(result, quiet));
    }
    if !quiet {
        println!(
            "{}",
            output::page_footer(desk.window().len(), desk.results().len(), desk.sort())
        );
    }
    Ok(())
}

fn handle_suggest_command(
    mut desk: VaultDesk,
    input: &str,
    filters: Vec<Filter>,
    limit: Option<usize>,
    quiet: bool,
) {
    if let Some(limit) = limit {
        desk = desk.with_max_suggestions(limit);
    }
    let filters = resolve_filters(&desk, filters);
    desk.set_filters(filters);

    let narrowed = desk.narrowed_suggestions(input);
    for suggestion in &narrowed.filters {
        println!("{}", output::suggestion_line(suggestion, quiet));
    }
    if narrowed.truncated && !quiet {
        println!("{}", output::truncated_hint());
    }
}

fn handle_open_command(desk: &VaultDesk, root: &Path, path: &str, quiet: bool) -> Result<()> {
    let opener = SystemOpener::new(root);
    if !desk.open(path, &opener) {
        return Err(DeskError::InvalidInput(format!("No such document: '{path}'")));
    }
    if !quiet {
        println!("Opened {path}");
    }
    Ok(())
}

fn handle_config_command(config: &DeskConfig, quiet: bool) -> Result<()> {
    if !quiet {
        println!("# {}", DeskConfig::config_path()?.display());
    }
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| DeskError::InvalidInput(format!("Failed to render config: {e}")))?;
    print!("{rendered}");
    if !quiet {
        println!("# sort presets:");
        for preset in SortOption::presets() {
            println!("#   {:<14} {preset}", preset.kind.as_str());
        }
        println!("# sort keys: {}", SortKind::ALL.map(SortKind::as_str).join(", "));
    }
    Ok(())
}

/// Main entry point for the desk application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// appropriate command handler.
///
/// # Errors
///
/// Returns `DeskError` if configuration loading fails, the vault cannot be
/// opened, or any command handler returns an error.
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let config = DeskConfig::load()?;
    let quiet = cli.quiet || config.quiet;

    match cli.command {
        Commands::Query { filters } => {
            println!("{}", query::compile(&filters)?);
        }
        Commands::Completions { shell } => {
            generate_completions(shell, &mut std::io::stdout());
        }
        Commands::Config => handle_config_command(&config, quiet)?,
        Commands::Search {
            filters,
            sort,
            reverse,
            pages,
            all,
            format,
        } => {
            let desk = open_desk(&config, &vault_root(&config, cli.vault.as_deref())?)?;
            let sort = requested_sort(sort, reverse, config.default_sort);
            let pages = (!all).then_some(pages);
            handle_search_command(desk, filters, sort, pages, format, quiet)?;
        }
        Commands::Suggest {
            input,
            filters,
            limit,
        } => {
            let desk = open_desk(&config, &vault_root(&config, cli.vault.as_deref())?)?;
            handle_suggest_command(desk, &input, filters, limit, quiet);
        }
        Commands::Open { path } => {
            let root = vault_root(&config, cli.vault.as_deref())?;
            let desk = open_desk(&config, &root)?;
            handle_open_command(&desk, &root, &path, quiet)?;
        }
    }

    Ok(())
}

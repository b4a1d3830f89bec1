//! # CLI Layer
//!
//! This module is **one possible client** for the pricecmp library. It is the
//! **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, whether stdin is a tty)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Resolves the config dir, loads and layers configuration
//! - `handle_*()`: Per-command handlers that drive a `ViewEngine` and print

use super::logging;
use super::render::{print_messages, render_options, render_table, TableView};
use super::setup::{Cli, Commands, ListArgs};
use super::shell::{run_shell, ShellOptions};
use super::theme::colors_supported;
use clap::Parser;
use directories::ProjectDirs;
use pricecmp::commands::config::ConfigAction;
use pricecmp::commands::{self, PricePaths};
use pricecmp::config::PriceConfig;
use pricecmp::engine::ViewEngine;
use pricecmp::error::{PriceError, Result};
use pricecmp::model::{FilterDimension, SortConfig, SortDirection};
use pricecmp::source::http::HttpSource;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

/// Overrides the platform config directory.
pub const CONFIG_DIR_ENV: &str = "PRICECMP_CONFIG_DIR";

struct AppContext {
    config: PriceConfig,
    paths: PricePaths,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = init_context(&cli)?;
    debug!(base_url = %ctx.config.base_url, config_dir = %ctx.paths.config_dir.display(), "context ready");

    match cli.command {
        Some(Commands::List(args)) => handle_list(&ctx, args),
        Some(Commands::Options { search }) => handle_options(&ctx, search),
        Some(Commands::Shell { search }) => handle_shell(&ctx, search),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(
            &ctx,
            ListArgs {
                search: None,
                store: None,
                brand: None,
                size: None,
                sort: SortConfig::default().key,
                desc: false,
            },
        ),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => ProjectDirs::from("com", "pricecmp", "pricecmp")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| PriceError::Config("Could not determine config dir".into()))?,
    };

    let config = PriceConfig::load(&config_dir)?
        .with_env_overrides()?
        .with_base_url_override(cli.base_url.clone())?;

    Ok(AppContext {
        config,
        paths: PricePaths { config_dir },
        use_color: !cli.no_color && colors_supported(),
    })
}

fn engine(ctx: &AppContext, search: Option<String>) -> Result<ViewEngine<HttpSource>> {
    let source = HttpSource::from_config(&ctx.config)?;
    let term = search.unwrap_or_else(|| ctx.config.default_search.clone());
    Ok(ViewEngine::with_search_term(source, term))
}

/// Fetches once; a failed fetch ends the command instead of showing an empty table.
fn load(engine: &mut ViewEngine<HttpSource>) -> Result<()> {
    engine.refresh();
    match engine.last_error() {
        Some(err) => Err(PriceError::Api(format!(
            "Could not load prices for '{}': {}",
            engine.search_term(),
            err
        ))),
        None => Ok(()),
    }
}

fn handle_list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let mut engine = engine(ctx, args.search)?;
    load(&mut engine)?;

    for (dimension, value) in [
        (FilterDimension::Store, args.store),
        (FilterDimension::Brand, args.brand),
        (FilterDimension::Size, args.size),
    ] {
        if let Some(value) = value {
            engine.set_filter(dimension, &value);
        }
    }
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let result = engine.set_sort(SortConfig::new(args.sort, direction));

    let table = TableView {
        records: &result.records,
        sort: engine.sort(),
        filters: engine.filters(),
        search_term: engine.search_term(),
        fetched_at: engine.fetched_at(),
        interactive: false,
    };
    print!("{}", render_table(&table, ctx.use_color));
    Ok(())
}

fn handle_options(ctx: &AppContext, search: Option<String>) -> Result<()> {
    let mut engine = engine(ctx, search)?;
    load(&mut engine)?;
    print!("{}", render_options(&engine.options(), ctx.use_color));
    Ok(())
}

fn handle_shell(ctx: &AppContext, search: Option<String>) -> Result<()> {
    let mut engine = engine(ctx, search)?;
    let stdin = std::io::stdin();
    let options = ShellOptions {
        use_color: ctx.use_color,
        prompt: stdin.is_terminal(),
    };
    run_shell(&mut engine, stdin.lock(), &mut std::io::stdout(), &options)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = commands::config::run(&ctx.paths, action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in PriceConfig::keys() {
                if let Some(value) = config.get_key(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
    }
    print_messages(&result.messages, ctx.use_color);
    Ok(())
}

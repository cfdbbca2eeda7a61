//! # CLI Layer
//!
//! This module is **one possible UI client** for todoz, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Decides exit codes
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the data directory, load config, open the `TodozApi`
//! 3. **Selector Resolution**: Turn positions / id prefixes into ids *before* mutating,
//!    so deleting `1 2` removes the first two todos as listed, not as renumbered
//! 4. **API Dispatch**: Call the appropriate `TodozApi` method
//! 5. **Output Formatting**: Convert `CmdResult` into terminal output
//!
//! A failed save still prints the operation's messages; the process then exits non-zero.

use super::print::{print_counts, print_messages, print_todos};
use super::setup::{init_tracing, Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use todoz::api::{CmdResult, TodozApi};
use todoz::config::{TodozConfig, CONFIG_KEYS};
use todoz::error::{Result, TodozError};
use todoz::index::TodoSelector;
use todoz::model::FilterMode;
use todoz::store::fs::FileStore;
use tracing::{debug, warn};

struct AppContext {
    api: TodozApi<FileStore>,
    config: TodozConfig,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { title, description }) => {
            handle_add(&mut ctx, &title.join(" "), &description)
        }
        Some(Commands::List { filter }) => handle_list(&mut ctx, filter),
        Some(Commands::Edit {
            selector,
            title,
            description,
        }) => handle_edit(&mut ctx, &selector, &title.join(" "), description),
        Some(Commands::Toggle { selectors }) => handle_toggle(&mut ctx, &selectors),
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, &selectors),
        Some(Commands::Move { selector, before }) => handle_move(&mut ctx, &selector, &before),
        Some(Commands::Clear) => {
            let result = ctx.api.clear_completed();
            conclude(&[result])
        }
        Some(Commands::DoneAll) => {
            let result = ctx.api.complete_all();
            conclude(&[result])
        }
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None),
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os("TODOZ_HOME") {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "todoz", "todoz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TodozError::Config("Could not determine data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = TodozConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(dir = %data_dir.display(), error = %e, "ignoring unreadable config");
        TodozConfig::default()
    });
    debug!(dir = %data_dir.display(), key = %config.storage_key, "opening todo list");

    let store = FileStore::new(data_dir.clone());
    let api = TodozApi::open(store, config.storage_key.clone());

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

/// Resolves every selector up front; duplicates collapse to one id.
fn resolve_all(ctx: &AppContext, selectors: &[String]) -> Result<Vec<String>> {
    let mut ids: Vec<String> = Vec::with_capacity(selectors.len());
    for raw in selectors {
        let selector: TodoSelector = raw.parse()?;
        let id = ctx.api.resolve(&selector)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn resolve_one(ctx: &AppContext, raw: &str) -> Result<String> {
    let selector: TodoSelector = raw.parse()?;
    ctx.api.resolve(&selector)
}

/// Prints all messages, then fails if any result could not be saved.
fn conclude(results: &[CmdResult]) -> Result<()> {
    for result in results {
        print_messages(&result.messages);
    }
    if results.iter().any(|r| !r.is_persisted()) {
        return Err(TodozError::Store("changes were not saved".to_string()));
    }
    Ok(())
}

fn handle_add(ctx: &mut AppContext, title: &str, description: &str) -> Result<()> {
    let result = ctx.api.add(title, description);
    conclude(&[result])
}

fn handle_list(ctx: &mut AppContext, filter: Option<String>) -> Result<()> {
    let mode = match filter {
        Some(raw) => raw.parse::<FilterMode>().unwrap_or_default(),
        None => ctx.config.default_filter,
    };
    let result = ctx.api.set_filter_mode(mode);
    print_todos(&result.listed_todos, mode);
    if !ctx.api.get_all().is_empty() {
        print_counts(ctx.api.counts());
    }
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    selector: &str,
    title: &str,
    description: Option<String>,
) -> Result<()> {
    let id = resolve_one(ctx, selector)?;
    let description = match description {
        Some(d) => d,
        None => ctx
            .api
            .get(&id)
            .map(|t| t.description.clone())
            .unwrap_or_default(),
    };
    let result = ctx.api.edit(&id, title, &description);
    conclude(&[result])
}

fn handle_toggle(ctx: &mut AppContext, selectors: &[String]) -> Result<()> {
    let ids = resolve_all(ctx, selectors)?;
    let results: Vec<CmdResult> = ids.iter().map(|id| ctx.api.toggle_complete(id)).collect();
    conclude(&results)
}

fn handle_delete(ctx: &mut AppContext, selectors: &[String]) -> Result<()> {
    let ids = resolve_all(ctx, selectors)?;
    let results: Vec<CmdResult> = ids.iter().map(|id| ctx.api.delete(id)).collect();
    conclude(&results)
}

fn handle_move(ctx: &mut AppContext, selector: &str, before: &str) -> Result<()> {
    let dragged = resolve_one(ctx, selector)?;
    let target = resolve_one(ctx, before)?;
    let result = ctx.api.move_before(&dragged, &target);
    conclude(&[result])
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, ctx.config.get(key).unwrap_or_default());
            }
        }
        (Some(key), None) => match ctx.config.get(&key) {
            Some(value) => println!("{} = {}", key, value),
            None => return Err(TodozError::Config(format!("Unknown config key: {}", key))),
        },
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            println!("{} = {}", key, ctx.config.get(&key).unwrap_or_default());
        }
    }
    Ok(())
}

//! # CLI Layer
//!
//! One possible client of the kitstock library. This is the only code that
//! knows about stdout, stderr and exit codes.
//!
//! - `run()`: parses arguments, sets up logging and the context, dispatches
//! - `handle_*()`: call one API method and print its `CmdResult`
//!
//! Stock problems the user can fix (short stock, unknown kit) are printed as
//! red messages and exit with status 1; bad input is returned as an error.

use super::print::{
    print_components, print_config, print_history, print_kits, print_messages, print_paths,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use kitstock::api::{CmdResult, ConfigAction, KitStockApi};
use kitstock::config::KitStockConfig;
use kitstock::error::Result;
use kitstock::init::{initialize, resolve_data_dir, HOME_ENV};
use kitstock::logging;
use kitstock::store::fs::FileStore;
use std::path::PathBuf;

struct AppContext {
    api: KitStockApi<FileStore>,
    config: KitStockConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut ctx = init_context(&cli)?;

    let failed = match cli.command {
        Some(Commands::Components) | None => handle_components(&ctx)?,
        Some(Commands::Kits) => handle_kits(&ctx)?,
        Some(Commands::Buy { fragment, qty }) => {
            let result = ctx.api.buy(&fragment, qty)?;
            report(&result)
        }
        Some(Commands::Sell { fragment, qty }) => {
            let result = ctx.api.sell(&fragment, qty)?;
            report(&result)
        }
        Some(Commands::BuyKit { name, qty }) => {
            let result = ctx.api.buy_kit(&name, qty)?;
            report(&result)
        }
        Some(Commands::SellKit { name, qty }) => {
            let result = ctx.api.sell_kit(&name, qty)?;
            report(&result)
        }
        Some(Commands::Pack { name, count, items }) => handle_pack(&mut ctx, name, count, items)?,
        Some(Commands::Unpack { name, count }) => {
            let result = ctx.api.unpack(&name, count)?;
            report(&result)
        }
        Some(Commands::History { limit }) => handle_history(&ctx, limit)?,
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value)?,
        Some(Commands::Paths) => handle_paths(&ctx)?,
    };

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let env_dir = std::env::var_os(HOME_ENV).map(PathBuf::from);
    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), env_dir)?;
    let ctx = initialize(data_dir)?;

    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
    })
}

/// Prints messages; true if the command failed.
fn report(result: &CmdResult) -> bool {
    print_messages(&result.messages);
    result.failed()
}

fn handle_components(ctx: &AppContext) -> Result<bool> {
    let result = ctx.api.list_components()?;
    print_components(&result.components);
    Ok(report(&result))
}

fn handle_kits(ctx: &AppContext) -> Result<bool> {
    let result = ctx.api.list_kits()?;
    print_kits(&result.kits);
    Ok(report(&result))
}

fn handle_pack(
    ctx: &mut AppContext,
    name: String,
    count: u64,
    items: Vec<String>,
) -> Result<bool> {
    let result = ctx.api.pack(&name, &items, count)?;
    if !result.kits.is_empty() {
        print_kits(&result.kits);
    }
    Ok(report(&result))
}

fn handle_history(ctx: &AppContext, limit: Option<usize>) -> Result<bool> {
    let result = ctx.api.history(limit)?;
    print_history(&result.transactions);
    Ok(report(&result))
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<bool> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print_config(config);
        }
    }
    Ok(report(&result))
}

fn handle_paths(ctx: &AppContext) -> Result<bool> {
    let result = ctx.api.data_paths(&ctx.config)?;
    print_paths(&result.paths);
    Ok(report(&result))
}

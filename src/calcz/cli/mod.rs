//! # CLI Layer
//!
//! This module is **one possible UI client** for calcz, not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdin, stdout, stderr)
//! - Uses `std::process::exit`
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Startup
//!
//! 1. Load `.env` from the working directory, if present
//! 2. Resolve `CalcConfig`: `config.json` in the base directory, then
//!    `CALCULATOR_*` variables, then command-line flags
//! 3. Validate, create the log/history directories, start file logging
//! 4. Build `CalcApi<CsvStore>` and restore persisted history
//!
//! ## Structure
//!
//! - [`run`]: Main dispatch logic (called by `main.rs`)
//! - `args`: clap definitions
//! - `repl`: The interactive loop
//! - `print`: Output formatting functions

mod args;
mod print;
mod repl;

use args::{Cli, Commands};
use calcz::api::CalcApi;
use calcz::config::CalcConfig;
use calcz::error::Result;
use calcz::logging;
use calcz::store::fs::CsvStore;
use clap::Parser;
use print::{print_history, print_messages, print_operations};

pub struct AppContext {
    api: CalcApi<CsvStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Eval { operation, a, b }) => handle_eval(&mut ctx, &operation, &a, &b),
        Some(Commands::History) => handle_history(&mut ctx),
        Some(Commands::Ops) => handle_ops(&ctx),
        Some(Commands::Repl) | None => repl::run(&mut ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    // A missing .env is the normal case
    dotenvy::dotenv().ok();

    let mut config = match &cli.base_dir {
        Some(dir) => CalcConfig::load(dir)?.apply_env(|key| std::env::var(key).ok())?,
        None => CalcConfig::from_env()?,
    };
    if cli.no_auto_save {
        config.auto_save = false;
    }
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }
    if let Some(max_history) = cli.max_history {
        config.max_history_size = max_history;
    }

    config.validate()?;
    config.ensure_dirs()?;
    logging::init(&config)?;
    tracing::info!(
        base_dir = %config.base_dir.display(),
        auto_save = config.auto_save,
        "Calculator initialized"
    );

    let store = CsvStore::new(config.history_file());
    Ok(AppContext {
        api: CalcApi::new(config, store),
    })
}

fn handle_eval(ctx: &mut AppContext, operation: &str, a: &str, b: &str) -> Result<()> {
    let restored = ctx.api.restore_on_startup();
    print_messages(&restored.messages);

    let result = ctx.api.evaluate_input(operation, a, b)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_history(ctx: &mut AppContext) -> Result<()> {
    let restored = ctx.api.restore_on_startup();
    print_messages(&restored.messages);

    let result = ctx.api.get_history()?;
    print_history(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_ops(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.operations()?;
    print_operations(&result.operations);
    Ok(())
}

//! # Stencil CLI
//!
//! Generates Laravel DTOs, form requests, API resources, repositories,
//! services and controllers from entity declarations.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults, config files, `STENCIL_*` env vars).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! |  0   | Success (including declined overwrites) |
//! |  1   | Any generation or configuration failure |
//! |  2   | Argument parse error             |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod prompt;

fn main() -> ExitCode {
    // Silently ignored when no .env exists.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 2 } else { 0 };
            if e.use_stderr() {
                eprintln!("{}", e.render().ansi());
            } else {
                print!("{}", e.render().ansi());
            }
            return ExitCode::from(code);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        dry_run = cli.global.dry_run,
        no_interaction = cli.global.no_interaction,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(e, verbose),
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, output) {
        Ok(()) => {
            info!("Stencil completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let global = cli.global;
    match cli.command {
        Commands::MakeDto(cmd) => commands::make::dto(cmd, &global, &config, &output),
        Commands::MakeApiClasses(cmd) => commands::make::api_classes(cmd, &global, &config, &output),
        Commands::MakeApiController(cmd) => {
            commands::make::api_controller(cmd, &global, &config, &output)
        }
        Commands::MakeDbController(cmd) => {
            commands::make::db_controller(cmd, &global, &config, &output)
        }
        Commands::MakeWebController(cmd) => {
            commands::make::web_controller(cmd, &global, &config, &output)
        }
        Commands::MakeRepository(cmd) => commands::make::repository(cmd, &global, &config, &output),
        Commands::MakeGeneratorInit(cmd) => commands::init::execute(cmd, &global, &config, &output),
        Commands::SchemaList => commands::schema::list(&config, &output),
        Commands::SchemaShow(cmd) => commands::schema::show(cmd, &config, &output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, &global, &config, &output),
    }
}

/// Translate a `CliError` into a user message and an exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr, so the message survives stdout redirection.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

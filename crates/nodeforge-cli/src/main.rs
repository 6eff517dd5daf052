//! # nodeforge CLI
//!
//! Interactive generator for Node.js backend project skeletons.
//!
//! ## Startup sequence
//!
//! 1. Load `.env`, then parse CLI arguments.
//! 2. `--version` prints the tool descriptor and exits.
//! 3. Initialise the tracing subscriber (logging).
//! 4. Load configuration (defaults + file + env).
//! 5. Build the [`OutputManager`].
//! 6. `--help` opens the help menu; otherwise generate a project.
//! 7. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success                                  |
//! |  1   | Internal error or failed package manager |
//! |  2   | User error, existing project, abort      |
//! |  3   | Resource not found                       |
//! |  4   | Configuration error                      |
//! | 130  | Cancelled with Ctrl-C                    |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::Cli,
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod descriptor;
mod error;
mod logging;
mod output;
mod progress;
#[cfg(feature = "interactive")]
mod prompt;

fn main() -> ExitCode {
    // Missing .env is normal.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e.render().ansi());
            return ExitCode::from(2);
        }
    };

    // ── 2. Version ────────────────────────────────────────────────────────
    if cli.version {
        return finish(commands::version::execute(), Report::default());
    }

    // ── 3. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let report = Report {
        verbose: cli.global.verbose > 0,
        no_color: cli.global.no_color,
    };

    // ── 4. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => return finish(Err(CliError::config(e)), report),
    };

    // ── 5. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 6. Dispatch + 7. Error handling ──────────────────────────────────
    finish(run(cli, config, &output), report)
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    if cli.help {
        return commands::help::execute(&config);
    }
    commands::generate::execute(cli.generate, &cli.global, config, output)
}

/// How a failure is reported.
#[derive(Debug, Clone, Copy, Default)]
struct Report {
    verbose: bool,
    no_color: bool,
}

fn finish(result: CliResult<()>, report: Report) -> ExitCode {
    match result {
        Ok(()) => {
            info!("nodeforge completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, report),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, report: Report) -> ExitCode {
    err.log();

    // Colour only when stderr is a terminal, same as logging.
    let colored = !report.no_color && std::io::IsTerminal::is_terminal(&std::io::stderr());
    let msg = if colored {
        err.format_colored(report.verbose)
    } else {
        err.format_plain(report.verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

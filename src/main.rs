// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Binary entry point for the estwalk CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Count node types in a tree produced by an ESTree parser
//! estwalk kinds tree.json
//!
//! # Innermost call expression around offset 42
//! estwalk find tree.json --mode around --pos 42 --kind CallExpression
//!
//! # Node chain from the root down to offset 42, tree on stdin
//! cat tree.json | estwalk ancestors - --pos 42
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use estwalk::cli::{load_tree, run_ancestors, run_find, run_kinds, FindMode, FindQuery};
use estwalk::error::{CliError, OutputErrorCode};
use estwalk::output::{emit_response, ErrorResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Walk and search ESTree JSON syntax trees.
///
/// All output is JSON on stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "estwalk", version, about = "Walk and search ESTree JSON syntax trees")]
struct Cli {
    /// Log level for tracing output (RUST_LOG takes precedence).
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count nodes by type.
    Kinds {
        /// ESTree JSON file, or `-` for stdin.
        file: String,
    },
    /// Find a node by source offset.
    Find {
        /// ESTree JSON file, or `-` for stdin.
        file: String,
        /// Which search to run.
        #[arg(long, value_enum)]
        mode: FindMode,
        /// Source offset (the start offset for `--mode at`).
        #[arg(long)]
        pos: Option<usize>,
        /// End offset, only for `--mode at`.
        #[arg(long)]
        end: Option<usize>,
        /// Node type or category the match must be dispatched as.
        #[arg(long)]
        kind: Option<String>,
    },
    /// List the nodes enclosing an offset, outermost first.
    Ancestors {
        /// ESTree JSON file, or `-` for stdin.
        file: String,
        /// Source offset.
        #[arg(long)]
        pos: usize,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.log_level);

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON, like every other response.
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();

            ExitCode::from(OutputErrorCode::from(&err).code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the CLI command.
fn execute(command: Command) -> Result<(), CliError> {
    match command {
        Command::Kinds { file } => {
            let tree = load_tree(&file)?;
            emit(&run_kinds(&tree)?)
        }
        Command::Find {
            file,
            mode,
            pos,
            end,
            kind,
        } => {
            let tree = load_tree(&file)?;
            let query = FindQuery {
                mode,
                pos,
                end,
                kind,
            };
            emit(&run_find(&tree, &query)?)
        }
        Command::Ancestors { file, pos } => {
            let tree = load_tree(&file)?;
            emit(&run_ancestors(&tree, pos)?)
        }
    }
}

fn emit<T: Serialize>(response: &T) -> Result<(), CliError> {
    emit_response(response, &mut io::stdout()).map_err(|e| CliError::internal(e.to_string()))?;
    let _ = io::stdout().flush();
    Ok(())
}

// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface Module
//!
//! Bootstrap-layer CLI handling for the two driver modes the engine
//! supports (driver surface, §6 of the workflow specification):
//!
//! - `serve` — daemon mode, long-running workers advance stories
//!   continuously until a shutdown signal arrives.
//! - `step --stage <name>` — one-shot mode, dispatch a single step for a
//!   named stage and exit.
//!
//! Parsing is split from validation the same way the rest of this crate
//! separates parsing concerns from the rest of bootstrap: `clap` derive
//! does structural parsing, `validate_cli` does the small amount of
//! semantic checking clap itself can't express (non-empty stage names,
//! worker counts in range).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI definition, parsed directly by `clap`.
#[derive(Debug, Parser)]
#[command(name = "storyflow", version, about = "Content-production workflow engine driver")]
pub struct Cli {
    /// Path to a configuration file (TOML). Falls back to defaults and
    /// `STORYFLOW_*` environment overrides when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run workers continuously until a shutdown signal is received.
    Serve {
        /// Number of worker tasks to spawn. Defaults to the configured
        /// stage count when omitted.
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Dispatch exactly one step for the named stage, then exit.
    Step {
        /// The stage name to dispatch a step for, e.g. `Title.From.Idea`.
        #[arg(long)]
        stage: String,
    },
}

/// CLI arguments after structural parsing and semantic validation.
#[derive(Debug, Clone)]
pub struct ValidatedCli {
    pub command: ValidatedCommand,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum ValidatedCommand {
    Serve { workers: Option<usize> },
    Step { stage: String },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid value for --{arg}: {reason}")]
    InvalidValue { arg: String, reason: String },
}

/// Parse `std::env::args` and validate the result in one call.
pub fn parse_and_validate() -> Result<ValidatedCli, ParseError> {
    let cli = Cli::parse();
    validate_cli(cli)
}

fn validate_cli(cli: Cli) -> Result<ValidatedCli, ParseError> {
    let command = match cli.command {
        Commands::Serve { workers } => {
            if let Some(w) = workers {
                if w == 0 || w > 256 {
                    return Err(ParseError::InvalidValue {
                        arg: "workers".to_string(),
                        reason: "must be between 1 and 256".to_string(),
                    });
                }
            }
            ValidatedCommand::Serve { workers }
        }
        Commands::Step { stage } => {
            if stage.trim().is_empty() {
                return Err(ParseError::InvalidValue {
                    arg: "stage".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
            ValidatedCommand::Step { stage }
        }
    };

    Ok(ValidatedCli {
        command,
        verbose: cli.verbose,
        config: cli.config,
    })
}

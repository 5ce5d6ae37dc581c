// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

// Production code safety enforced via CI and `make lint-strict`
// (lib/bins checked separately from tests - tests may use unwrap/expect)

//! # Bootstrap Module
//!
//! The bootstrap module sits **outside** the enterprise application layers
//! (domain, application, infrastructure) and provides the platform- and
//! process-level concerns the workflow engine's driver needs but the
//! domain must never depend on:
//!
//! - **Argument parsing** — `serve` / `step --stage` CLI surface
//! - **Platform abstraction** — OS-specific operations (POSIX vs Windows)
//! - **Signal handling** — graceful shutdown (SIGTERM, SIGINT, SIGHUP)
//! - **Exit codes** — Unix exit code mapping for the driver's process exit
//! - **Shutdown coordination** — cancellation token + grace period
//! - **Logging** — a small logger trait for bootstrap-phase messages,
//!   before the full `tracing` subscriber is installed
//!
//! ## Architecture Position
//!
//! The main crate (`storyflow`) depends on this crate, not the reverse —
//! bootstrap has no knowledge of stories, stages, or the store; it only
//! deals in processes, signals, and exit codes.
//!
//! ## Module Structure
//!
//! - `cli` — argument parsing and validation
//! - `exit_code` — Unix exit code enumeration
//! - `logger` — bootstrap-phase logging
//! - `platform` — OS abstraction (Unix/Windows)
//! - `shutdown` — shutdown coordination
//! - `signals` — signal handling (SIGTERM, SIGINT, SIGHUP)

pub mod cli;
pub mod exit_code;
pub mod logger;
pub mod platform;
pub mod shutdown;
pub mod signals;

pub use cli::{parse_and_validate, ValidatedCli, ValidatedCommand};
pub use exit_code::{map_error_to_exit_code, result_to_exit_code, ExitCode};

/// Parse and validate CLI arguments.
///
/// The caller runs the selected command and maps the result to an exit
/// code via [`result_to_exit_code`]; clap handles `--help`/`--version`
/// itself and exits the process before returning.
pub fn bootstrap_cli() -> Result<ValidatedCli, cli::ParseError> {
    cli::parse_and_validate()
}

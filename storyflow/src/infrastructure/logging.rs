// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Logging Initialization
//!
//! A single `tracing-subscriber` setup point, mirroring
//! `storyflow_bootstrap::logger`'s role for bootstrap-phase messages but
//! covering the full application once the driver is up. Every
//! `StageDispatcher::step` outcome is logged with `stage`, `story_id`,
//! and error kind as structured fields (`spec.md` §7): "User-facing
//! failures include the stage name, story id, and the error kind."

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global `tracing` subscriber.
///
/// `verbose` forces a `debug` floor; otherwise the `RUST_LOG` environment
/// variable controls verbosity, defaulting to `info`.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt().with_env_filter(filter).with_target(true).with_thread_ids(false).try_init().ok();
}

// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Connection pool setup.
//!
//! SQLite serializes writers at the database level; the pool still helps
//! readers overlap with an in-flight writer. `PRAGMA foreign_keys = ON` is
//! set per-connection since SQLite does not persist it in the database
//! file itself.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

/// Open a pool against `database_url`, creating the file if it does not
/// exist and enabling foreign key enforcement on every connection.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    debug!(database_url, "opening SQLite connection pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // An in-memory SQLite database is private to the connection that
    // opened it; a pool of more than one connection would silently hand
    // different callers different, empty databases. Cap the pool to the
    // single connection that keeps the in-memory schema alive for the
    // whole process (used by `sqlite::memory:` in tests and examples).
    let max_connections = if is_in_memory(database_url) { 1 } else { 8 };

    SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Database creation and migration.

use super::pool::connect;
use sqlx::SqlitePool;
use tracing::{debug, info};

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("applying database migrations");
    sqlx::migrate!("migrations").run(pool).await?;
    info!("database schema is up to date");
    Ok(())
}

/// Open a pool against `database_url` and bring its schema up to date.
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = connect(database_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn initialize_database_creates_expected_tables() {
        let pool = initialize_database("sqlite::memory:").await.expect("schema should initialize");

        let tables: Vec<(String,)> = sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(&pool)
            .await
            .expect("should list tables");
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();

        for expected in ["content", "review", "story", "title"] {
            assert!(names.contains(&expected), "missing table {expected}, found {names:?}");
        }
    }

    #[tokio::test]
    async fn initialize_database_is_idempotent() {
        let pool = initialize_database("sqlite::memory:").await.expect("first init should succeed");
        run_migrations(&pool).await.expect("reapplying migrations should be a no-op");
    }
}

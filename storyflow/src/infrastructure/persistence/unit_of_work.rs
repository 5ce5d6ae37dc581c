// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite-backed [`UnitOfWork`]/[`UnitOfWorkFactory`].
//!
//! A single struct implements all four repository traits over one shared
//! `sqlx::Transaction`, rather than four separate repo objects borrowing
//! the same transaction simultaneously — the `stories()`/`titles()`/
//! `contents()`/`reviews()` accessors just hand back `self` through a
//! different trait object, since Rust can't otherwise express "four
//! live `&mut` views of the same transaction, used one at a time."

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use storyflow_domain::error::EngineError;
use storyflow_domain::repositories::{ContentRepo, ReviewRepo, StoryRepo, TitleRepo, UnitOfWork, UnitOfWorkFactory};
use storyflow_domain::services::StateCatalog;

pub(super) fn store_fatal(e: sqlx::Error) -> EngineError {
    EngineError::StoreFatal(e.to_string())
}

/// One transactional scope, implementing all four repository ports over
/// a single `BEGIN IMMEDIATE` transaction.
///
/// Carries a shared [`StateCatalog`] so `StoryRepo::update` (implemented
/// in `sqlite_story_repo.rs`) can validate a state-changing write through
/// the Transition Validator before it lands, per `spec.md` §4.3.
pub struct SqliteUnitOfWork {
    pub(super) tx: Transaction<'static, Sqlite>,
    pub(super) catalog: Arc<StateCatalog>,
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    fn stories(&mut self) -> &mut dyn StoryRepo {
        self
    }

    fn titles(&mut self) -> &mut dyn TitleRepo {
        self
    }

    fn contents(&mut self) -> &mut dyn ContentRepo {
        self
    }

    fn reviews(&mut self) -> &mut dyn ReviewRepo {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), EngineError> {
        self.tx.commit().await.map_err(store_fatal)
    }
}

/// Opens [`SqliteUnitOfWork`] scopes against a shared connection pool.
///
/// `BEGIN IMMEDIATE` is issued explicitly rather than relying on SQLite's
/// default deferred transaction mode: deferred transactions upgrade from a
/// read lock to a write lock lazily, which is exactly the race the store's
/// "exactly one winner" guarantee needs to avoid between concurrent
/// workers (see `infrastructure::persistence` module docs).
pub struct SqliteUnitOfWorkFactory {
    pool: SqlitePool,
    catalog: Arc<StateCatalog>,
}

impl SqliteUnitOfWorkFactory {
    pub fn new(pool: SqlitePool, catalog: Arc<StateCatalog>) -> Self {
        Self { pool, catalog }
    }
}

#[async_trait]
impl UnitOfWorkFactory for SqliteUnitOfWorkFactory {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, EngineError> {
        let tx = Transaction::begin_with(&self.pool, "BEGIN IMMEDIATE").await.map_err(store_fatal)?;
        Ok(Box::new(SqliteUnitOfWork { tx, catalog: self.catalog.clone() }))
    }
}

// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SQLite Artifact Store (C3)
//!
//! Concrete, `sqlx`-backed implementations of the repository traits
//! `storyflow-domain` declares. Every write that changes a Story's state
//! goes through a single [`unit_of_work::SqliteUnitOfWork`] opened with
//! `BEGIN IMMEDIATE`, giving SQLite's own write-lock the single-writer
//! guarantee `spec.md` §4.3 asks for rather than an application-level
//! mutex.
//!
//! Every query here is built with `sqlx::query`/`query_as`/`query_scalar`
//! (never the `query!`/`query_as!` compile-time macros, which need a
//! live database or an offline query cache this workspace does not
//! build against).

mod pool;
mod schema;
mod sqlite_content_repo;
mod sqlite_review_repo;
mod sqlite_selection_repo;
mod sqlite_story_repo;
mod sqlite_title_repo;
mod unit_of_work;

pub use pool::connect;
pub use schema::initialize_database;
pub use sqlite_selection_repo::SqliteSelectionQueryRepo;
pub use unit_of_work::{SqliteUnitOfWork, SqliteUnitOfWorkFactory};

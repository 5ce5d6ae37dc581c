// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Repository Ports (C3 contract surface)
//!
//! The Artifact Store is accessed exclusively through these typed
//! repository traits, never through raw query text. This
//! crate declares the traits only — concrete SQLite-backed
//! implementations live in `storyflow::infrastructure::persistence`, kept
//! out of the domain so the domain has no I/O or `sqlx` dependency.

mod content_repository;
mod review_repository;
mod selection_repository;
mod story_repository;
mod title_repository;
mod unit_of_work;

pub use content_repository::ContentRepo;
pub use review_repository::ReviewRepo;
pub use selection_repository::SelectionQueryRepo;
pub use story_repository::StoryRepo;
pub use title_repository::TitleRepo;
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};

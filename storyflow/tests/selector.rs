// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Black-box `WorkSelector` coverage of `spec.md` §8 scenario 6
//! ("Selection priority"), exercised through the real SQLite aggregation
//! query rather than hand-built `SelectionCandidate` values.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use storyflow::application::WorkSelector;
use storyflow::domain::entities::{Content, Story};
use storyflow::domain::repositories::{ContentRepo, StoryRepo, UnitOfWork, UnitOfWorkFactory};
use storyflow::domain::services::StateCatalog;
use storyflow::domain::value_objects::ArtifactVersion;
use storyflow::infrastructure::persistence::{initialize_database, SqliteSelectionQueryRepo, SqliteUnitOfWorkFactory};

/// S1 has three Content versions (bucket 2), S2 has one (bucket 0). The
/// selector must prefer S2's lower work-version bucket regardless of
/// which Story is older.
#[tokio::test]
async fn prefers_the_lower_work_version_bucket() {
    let pool = initialize_database("sqlite::memory:").await.expect("schema should initialize");
    let catalog = Arc::new(StateCatalog::new());
    let uow_factory = SqliteUnitOfWorkFactory::new(pool.clone(), catalog);

    let mut uow = uow_factory.begin().await.unwrap();
    let s1 = uow.stories().insert(Story::new_unsaved("idea-1", "Review.Script.Tone", Utc::now())).await.unwrap();
    for v in 0..3 {
        uow.contents().insert(Content::new_unsaved(s1.id, ArtifactVersion::new(v), format!("body v{v}"), Utc::now())).await.unwrap();
    }
    let s2 = uow.stories().insert(Story::new_unsaved("idea-2", "Review.Script.Tone", Utc::now())).await.unwrap();
    uow.contents().insert(Content::new_unsaved(s2.id, ArtifactVersion::INITIAL, "body v0", Utc::now())).await.unwrap();
    uow.commit().await.unwrap();

    let selector = WorkSelector::new(Arc::new(SqliteSelectionQueryRepo::new(pool)));
    let picked = selector.pick("Review.Script.Tone").await.unwrap();
    assert_eq!(picked, Some(s2.id));
}

/// Equal buckets and equal story scores: the selector falls back to the
/// older `created_at`.
#[tokio::test]
async fn falls_back_to_the_older_story_on_a_full_tie() {
    let pool = initialize_database("sqlite::memory:").await.expect("schema should initialize");
    let catalog = Arc::new(StateCatalog::new());
    let uow_factory = SqliteUnitOfWorkFactory::new(pool.clone(), catalog);

    let older = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let newer = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();

    let mut uow = uow_factory.begin().await.unwrap();
    let newer_story = uow.stories().insert(Story::new_unsaved("idea-1", "Review.Script.Tone", newer)).await.unwrap();
    uow.contents().insert(Content::new_unsaved(newer_story.id, ArtifactVersion::INITIAL, "body", newer)).await.unwrap();
    let older_story = uow.stories().insert(Story::new_unsaved("idea-2", "Review.Script.Tone", older)).await.unwrap();
    uow.contents().insert(Content::new_unsaved(older_story.id, ArtifactVersion::INITIAL, "body", older)).await.unwrap();
    uow.commit().await.unwrap();

    let selector = WorkSelector::new(Arc::new(SqliteSelectionQueryRepo::new(pool)));
    let picked = selector.pick("Review.Script.Tone").await.unwrap();
    assert_eq!(picked, Some(older_story.id));
}

/// A stage with no Stories in it yields no candidate.
#[tokio::test]
async fn no_candidates_yields_none() {
    let pool = initialize_database("sqlite::memory:").await.expect("schema should initialize");
    let selector = WorkSelector::new(Arc::new(SqliteSelectionQueryRepo::new(pool)));
    let picked = selector.pick("Publishing").await.unwrap();
    assert_eq!(picked, None);
}

// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite-backed [`ContentRepo`], implemented directly on [`SqliteUnitOfWork`].
//!
//! Same shape as `sqlite_title_repo.rs` — Content and Title are structurally
//! identical artifacts differing only in which table and id type they use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use storyflow_domain::entities::Content;
use storyflow_domain::error::EngineError;
use storyflow_domain::repositories::ContentRepo;
use storyflow_domain::value_objects::{ArtifactVersion, ContentId, ReviewId, StoryId};

use super::unit_of_work::SqliteUnitOfWork;

type ContentRow = (i64, i64, i32, String, Option<i64>, DateTime<Utc>);

fn to_content((id, story_id, version, text, review_id, created_at): ContentRow) -> Content {
    Content {
        id: ContentId::new(id),
        story_id: StoryId::new(story_id),
        version: ArtifactVersion::new(version),
        text,
        review_id: review_id.map(ReviewId::new),
        created_at,
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl ContentRepo for SqliteUnitOfWork {
    async fn insert(&mut self, content: Content) -> Result<Content, EngineError> {
        let result = sqlx::query_scalar::<_, i64>(
            "INSERT INTO content (story_id, version, text, review_id, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(content.story_id.value())
        .bind(content.version.value())
        .bind(&content.text)
        .bind(content.review_id.map(|r| r.value()))
        .bind(content.created_at)
        .fetch_one(&mut *self.tx)
        .await;

        let id = match result {
            Ok(id) => id,
            Err(e) if is_unique_violation(&e) => {
                return Err(EngineError::VersionConflict {
                    story_id: content.story_id.value(),
                    version: content.version.value(),
                })
            }
            Err(e) => return Err(super::unit_of_work::store_fatal(e)),
        };

        Ok(Content { id: ContentId::new(id), ..content })
    }

    async fn find_by_id(&mut self, id: ContentId) -> Result<Option<Content>, EngineError> {
        let row: Option<ContentRow> =
            sqlx::query_as("SELECT id, story_id, version, text, review_id, created_at FROM content WHERE id = ?")
                .bind(id.value())
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(super::unit_of_work::store_fatal)?;
        Ok(row.map(to_content))
    }

    async fn find_latest_version(&mut self, story_id: StoryId) -> Result<Option<Content>, EngineError> {
        let row: Option<ContentRow> = sqlx::query_as(
            "SELECT id, story_id, version, text, review_id, created_at FROM content WHERE story_id = ? ORDER BY version DESC LIMIT 1",
        )
        .bind(story_id.value())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(super::unit_of_work::store_fatal)?;
        Ok(row.map(to_content))
    }

    async fn find_versions(&mut self, story_id: StoryId) -> Result<Vec<Content>, EngineError> {
        let rows: Vec<ContentRow> = sqlx::query_as(
            "SELECT id, story_id, version, text, review_id, created_at FROM content WHERE story_id = ? ORDER BY version ASC",
        )
        .bind(story_id.value())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(super::unit_of_work::store_fatal)?;
        Ok(rows.into_iter().map(to_content).collect())
    }

    async fn find_version(&mut self, story_id: StoryId, version: ArtifactVersion) -> Result<Option<Content>, EngineError> {
        let row: Option<ContentRow> = sqlx::query_as(
            "SELECT id, story_id, version, text, review_id, created_at FROM content WHERE story_id = ? AND version = ?",
        )
        .bind(story_id.value())
        .bind(version.value())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(super::unit_of_work::store_fatal)?;
        Ok(row.map(to_content))
    }

    async fn set_review_id(&mut self, artifact_id: ContentId, review_id: ReviewId) -> Result<(), EngineError> {
        let existing: Option<Option<i64>> = sqlx::query_scalar("SELECT review_id FROM content WHERE id = ?")
            .bind(artifact_id.value())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(super::unit_of_work::store_fatal)?;

        let Some(existing) = existing else {
            return Err(EngineError::NotFound(format!("content {}", artifact_id.value())));
        };

        match existing {
            None => {
                sqlx::query("UPDATE content SET review_id = ? WHERE id = ?")
                    .bind(review_id.value())
                    .bind(artifact_id.value())
                    .execute(&mut *self.tx)
                    .await
                    .map_err(super::unit_of_work::store_fatal)?;
                Ok(())
            }
            Some(current) if current == review_id.value() => Ok(()),
            Some(current) => Err(EngineError::AlreadyReviewed {
                artifact_id: artifact_id.value(),
                existing_review_id: current,
                attempted_review_id: review_id.value(),
            }),
        }
    }
}

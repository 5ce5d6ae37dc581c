// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite-backed [`TitleRepo`], implemented directly on [`SqliteUnitOfWork`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use storyflow_domain::entities::Title;
use storyflow_domain::error::EngineError;
use storyflow_domain::repositories::TitleRepo;
use storyflow_domain::value_objects::{ArtifactVersion, ReviewId, StoryId, TitleId};

use super::unit_of_work::SqliteUnitOfWork;

type TitleRow = (i64, i64, i32, String, Option<i64>, DateTime<Utc>);

fn to_title((id, story_id, version, text, review_id, created_at): TitleRow) -> Title {
    Title {
        id: TitleId::new(id),
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
impl TitleRepo for SqliteUnitOfWork {
    async fn insert(&mut self, title: Title) -> Result<Title, EngineError> {
        let result = sqlx::query_scalar::<_, i64>(
            "INSERT INTO title (story_id, version, text, review_id, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(title.story_id.value())
        .bind(title.version.value())
        .bind(&title.text)
        .bind(title.review_id.map(|r| r.value()))
        .bind(title.created_at)
        .fetch_one(&mut *self.tx)
        .await;

        let id = match result {
            Ok(id) => id,
            Err(e) if is_unique_violation(&e) => {
                return Err(EngineError::VersionConflict {
                    story_id: title.story_id.value(),
                    version: title.version.value(),
                })
            }
            Err(e) => return Err(super::unit_of_work::store_fatal(e)),
        };

        Ok(Title { id: TitleId::new(id), ..title })
    }

    async fn find_by_id(&mut self, id: TitleId) -> Result<Option<Title>, EngineError> {
        let row: Option<TitleRow> =
            sqlx::query_as("SELECT id, story_id, version, text, review_id, created_at FROM title WHERE id = ?")
                .bind(id.value())
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(super::unit_of_work::store_fatal)?;
        Ok(row.map(to_title))
    }

    async fn find_latest_version(&mut self, story_id: StoryId) -> Result<Option<Title>, EngineError> {
        let row: Option<TitleRow> = sqlx::query_as(
            "SELECT id, story_id, version, text, review_id, created_at FROM title WHERE story_id = ? ORDER BY version DESC LIMIT 1",
        )
        .bind(story_id.value())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(super::unit_of_work::store_fatal)?;
        Ok(row.map(to_title))
    }

    async fn find_versions(&mut self, story_id: StoryId) -> Result<Vec<Title>, EngineError> {
        let rows: Vec<TitleRow> = sqlx::query_as(
            "SELECT id, story_id, version, text, review_id, created_at FROM title WHERE story_id = ? ORDER BY version ASC",
        )
        .bind(story_id.value())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(super::unit_of_work::store_fatal)?;
        Ok(rows.into_iter().map(to_title).collect())
    }

    async fn find_version(&mut self, story_id: StoryId, version: ArtifactVersion) -> Result<Option<Title>, EngineError> {
        let row: Option<TitleRow> =
            sqlx::query_as("SELECT id, story_id, version, text, review_id, created_at FROM title WHERE story_id = ? AND version = ?")
                .bind(story_id.value())
                .bind(version.value())
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(super::unit_of_work::store_fatal)?;
        Ok(row.map(to_title))
    }

    async fn set_review_id(&mut self, artifact_id: TitleId, review_id: ReviewId) -> Result<(), EngineError> {
        let existing: Option<Option<i64>> = sqlx::query_scalar("SELECT review_id FROM title WHERE id = ?")
            .bind(artifact_id.value())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(super::unit_of_work::store_fatal)?;

        let Some(existing) = existing else {
            return Err(EngineError::NotFound(format!("title {}", artifact_id.value())));
        };

        match existing {
            None => {
                sqlx::query("UPDATE title SET review_id = ? WHERE id = ?")
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

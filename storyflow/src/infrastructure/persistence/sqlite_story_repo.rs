// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite-backed [`StoryRepo`], implemented directly on [`SqliteUnitOfWork`]
//! over its shared transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use storyflow_domain::entities::Story;
use storyflow_domain::error::EngineError;
use storyflow_domain::repositories::StoryRepo;
use storyflow_domain::services::TransitionValidator;
use storyflow_domain::value_objects::{StageName, StoryId};

use super::unit_of_work::{store_fatal, SqliteUnitOfWork};

struct StoryRow {
    id: i64,
    idea_ref: String,
    state: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoryRow> for Story {
    fn from(row: StoryRow) -> Self {
        Story {
            id: StoryId::new(row.id),
            idea_ref: row.idea_ref,
            state: StageName::new(row.state),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl StoryRepo for SqliteUnitOfWork {
    async fn insert(&mut self, story: Story) -> Result<Story, EngineError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO story (idea_ref, state, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&story.idea_ref)
        .bind(story.state.as_str())
        .bind(story.created_at)
        .bind(story.updated_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(store_fatal)?;

        Ok(Story { id: StoryId::new(id), ..story })
    }

    async fn find_by_id(&mut self, id: StoryId) -> Result<Option<Story>, EngineError> {
        let raw: Option<(i64, String, String, DateTime<Utc>, DateTime<Utc>)> =
            sqlx::query_as("SELECT id, idea_ref, state, created_at, updated_at FROM story WHERE id = ?")
                .bind(id.value())
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(store_fatal)?;

        Ok(raw.map(|(id, idea_ref, state, created_at, updated_at)| {
            StoryRow { id, idea_ref, state, created_at, updated_at }.into()
        }))
    }

    async fn find_by_state(&mut self, stage: &str) -> Result<Vec<Story>, EngineError> {
        let rows: Vec<(i64, String, String, DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, idea_ref, state, created_at, updated_at FROM story WHERE state = ? ORDER BY created_at ASC",
        )
        .bind(stage)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(store_fatal)?;

        Ok(rows
            .into_iter()
            .map(|(id, idea_ref, state, created_at, updated_at)| StoryRow { id, idea_ref, state, created_at, updated_at }.into())
            .collect())
    }

    async fn find_oldest_by_state(&mut self, stage: &str) -> Result<Option<Story>, EngineError> {
        let raw: Option<(i64, String, String, DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, idea_ref, state, created_at, updated_at FROM story WHERE state = ? ORDER BY created_at ASC, id ASC LIMIT 1",
        )
        .bind(stage)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(store_fatal)?;

        Ok(raw.map(|(id, idea_ref, state, created_at, updated_at)| {
            StoryRow { id, idea_ref, state, created_at, updated_at }.into()
        }))
    }

    async fn count_by_state(&mut self, stage: &str) -> Result<i64, EngineError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM story WHERE state = ?")
            .bind(stage)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(store_fatal)?;
        Ok(count)
    }

    async fn update(&mut self, story: &Story) -> Result<(), EngineError> {
        let current_state: Option<String> = sqlx::query_scalar("SELECT state FROM story WHERE id = ?")
            .bind(story.id.value())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(store_fatal)?;

        let Some(current_state) = current_state else {
            return Err(EngineError::NotFound(format!("story {}", story.id.value())));
        };

        if current_state != story.state.as_str() {
            let validator = TransitionValidator::new(&self.catalog);
            let outcome = validator.validate(&current_state, story.state.as_str());
            if !outcome.ok {
                return Err(EngineError::IllegalTransition {
                    from: current_state,
                    to: story.state.as_str().to_string(),
                    reason: outcome.reason.unwrap_or_default(),
                });
            }
        }

        let result = sqlx::query("UPDATE story SET state = ?, updated_at = ? WHERE id = ? AND state = ?")
            .bind(story.state.as_str())
            .bind(story.updated_at)
            .bind(story.id.value())
            .bind(&current_state)
            .execute(&mut *self.tx)
            .await
            .map_err(store_fatal)?;

        if result.rows_affected() == 0 {
            // Another writer's commit landed between our read and write —
            // the single-writer guarantee was contended. Retryable.
            return Err(EngineError::StoreTransient(format!(
                "story {} changed state concurrently before update could apply",
                story.id.value()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::schema::initialize_database;
    use crate::infrastructure::persistence::unit_of_work::SqliteUnitOfWorkFactory;
    use std::sync::Arc;
    use storyflow_domain::repositories::{UnitOfWork, UnitOfWorkFactory};
    use storyflow_domain::services::StateCatalog;

    async fn factory() -> SqliteUnitOfWorkFactory {
        let pool = initialize_database("sqlite::memory:").await.expect("schema should initialize");
        SqliteUnitOfWorkFactory::new(pool, Arc::new(StateCatalog::new()))
    }

    #[tokio::test]
    async fn insert_assigns_an_id_and_round_trips() {
        let factory = factory().await;
        let mut uow = factory.begin().await.unwrap();
        let now = Utc::now();
        let story = Story::new_unsaved("idea-1", "Title.From.Idea", now);
        let inserted = uow.stories().insert(story).await.unwrap();
        assert!(inserted.id.value() > 0);

        let fetched = uow.stories().find_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.idea_ref, "idea-1");
        assert_eq!(fetched.state.as_str(), "Title.From.Idea");
    }

    #[tokio::test]
    async fn update_validates_transition_before_writing() {
        let factory = factory().await;
        let mut uow = factory.begin().await.unwrap();
        let now = Utc::now();
        let story = uow.stories().insert(Story::new_unsaved("idea-1", "Title.From.Idea", now)).await.unwrap();

        let mut illegal = story.clone();
        illegal.state = StageName::new("Publishing");
        let err = uow.stories().update(&illegal).await.unwrap_err();
        assert!(matches!(err, EngineError::IllegalTransition { .. }));

        let mut legal = story;
        legal.state = StageName::new("Script.From.Idea.Title");
        uow.stories().update(&legal).await.unwrap();
    }

    #[tokio::test]
    async fn find_by_state_orders_by_created_at_ascending() {
        let factory = factory().await;
        let mut uow = factory.begin().await.unwrap();
        let earlier = Utc::now() - chrono::Duration::seconds(10);
        let later = Utc::now();
        uow.stories().insert(Story::new_unsaved("idea-a", "Title.From.Idea", later)).await.unwrap();
        uow.stories().insert(Story::new_unsaved("idea-b", "Title.From.Idea", earlier)).await.unwrap();

        let found = uow.stories().find_by_state("Title.From.Idea").await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].idea_ref, "idea-b");
    }

    #[tokio::test]
    async fn count_by_state_reflects_inserts() {
        let factory = factory().await;
        let mut uow = factory.begin().await.unwrap();
        uow.stories().insert(Story::new_unsaved("idea-1", "Title.From.Idea", Utc::now())).await.unwrap();
        let count = uow.stories().count_by_state("Title.From.Idea").await.unwrap();
        assert_eq!(count, 1);
    }
}

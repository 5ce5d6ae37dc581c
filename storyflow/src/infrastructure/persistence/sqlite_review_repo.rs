// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite-backed [`ReviewRepo`], implemented directly on [`SqliteUnitOfWork`].
//!
//! Reviews are append-only: there is no `update`, matching the domain
//! entity, which carries no mutator.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use storyflow_domain::entities::Review;
use storyflow_domain::error::EngineError;
use storyflow_domain::repositories::ReviewRepo;
use storyflow_domain::value_objects::{ReviewId, Score};

use super::unit_of_work::{store_fatal, SqliteUnitOfWork};

type ReviewRow = (i64, String, i64, DateTime<Utc>);

fn to_review((id, text, score, created_at): ReviewRow) -> Result<Review, EngineError> {
    Ok(Review {
        id: ReviewId::new(id),
        text,
        score: Score::new(score)?,
        created_at,
    })
}

#[async_trait]
impl ReviewRepo for SqliteUnitOfWork {
    async fn insert(&mut self, review: Review) -> Result<Review, EngineError> {
        let id: i64 = sqlx::query_scalar("INSERT INTO review (text, score, created_at) VALUES (?, ?, ?) RETURNING id")
            .bind(&review.text)
            .bind(review.score.value())
            .bind(review.created_at)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(store_fatal)?;

        Ok(Review { id: ReviewId::new(id), ..review })
    }

    async fn find_by_id(&mut self, id: ReviewId) -> Result<Option<Review>, EngineError> {
        let row: Option<ReviewRow> = sqlx::query_as("SELECT id, text, score, created_at FROM review WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(store_fatal)?;

        row.map(to_review).transpose()
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
    async fn insert_and_find_round_trip() {
        let factory = factory().await;
        let mut uow = factory.begin().await.unwrap();
        let review = Review::new_unsaved("solid grammar pass", Score::new(85).unwrap(), Utc::now());
        let inserted = uow.reviews().insert(review).await.unwrap();
        let fetched = uow.reviews().find_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.score.value(), 85);
        assert_eq!(fetched.text, "solid grammar pass");
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_missing_review() {
        let factory = factory().await;
        let mut uow = factory.begin().await.unwrap();
        let found = uow.reviews().find_by_id(ReviewId::new(9999)).await.unwrap();
        assert!(found.is_none());
    }
}

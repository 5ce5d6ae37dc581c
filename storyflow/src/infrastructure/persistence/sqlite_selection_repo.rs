// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite-backed [`SelectionQueryRepo`].
//!
//! Unlike the four `sqlite_*_repo.rs` files, this one does not implement
//! onto [`SqliteUnitOfWork`]: the Work Selector's candidate query is
//! read-only and runs outside any write transaction (`spec.md` §4.4), so
//! it gets its own struct wrapping a plain connection pool.

use async_trait::async_trait;
use sqlx::SqlitePool;
use storyflow_domain::error::EngineError;
use storyflow_domain::repositories::SelectionQueryRepo;
use storyflow_domain::services::SelectionCandidate;
use storyflow_domain::value_objects::StoryId;

pub struct SqliteSelectionQueryRepo {
    pool: SqlitePool,
}

impl SqliteSelectionQueryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

type CandidateRow = (i64, chrono::DateTime<chrono::Utc>, Option<i32>, Option<i32>, Option<i64>, Option<i64>);

#[async_trait]
impl SelectionQueryRepo for SqliteSelectionQueryRepo {
    async fn candidates_for_stage(&self, stage: &str) -> Result<Vec<SelectionCandidate>, EngineError> {
        // One bounded query per `spec.md` §4.4's complexity target: the
        // aggregation reaches for each Story's latest Title/Content
        // version and the score of the Review that latest version points
        // at, via a correlated-subquery join rather than N+1 round trips.
        let rows: Vec<CandidateRow> = sqlx::query_as(
            r#"
            SELECT
                s.id,
                s.created_at,
                (SELECT MAX(t.version) FROM title t WHERE t.story_id = s.id) AS max_title_version,
                (SELECT MAX(c.version) FROM content c WHERE c.story_id = s.id) AS max_content_version,
                (
                    SELECT r.score FROM review r
                    JOIN title t ON t.review_id = r.id
                    WHERE t.story_id = s.id
                    ORDER BY t.version DESC
                    LIMIT 1
                ) AS latest_title_review_score,
                (
                    SELECT r.score FROM review r
                    JOIN content c ON c.review_id = r.id
                    WHERE c.story_id = s.id
                    ORDER BY c.version DESC
                    LIMIT 1
                ) AS latest_content_review_score
            FROM story s
            WHERE s.state = ?
            "#,
        )
        .bind(stage)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EngineError::StoreFatal(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(story_id, created_at, max_title_version, max_content_version, latest_title_review_score, latest_content_review_score)| {
                    SelectionCandidate {
                        story_id: StoryId::new(story_id),
                        created_at,
                        max_title_version,
                        max_content_version,
                        latest_title_review_score,
                        latest_content_review_score,
                    }
                },
            )
            .collect())
    }
}

// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Story repository port.

use crate::entities::Story;
use crate::error::EngineError;
use crate::value_objects::StoryId;
use async_trait::async_trait;

/// Persistence operations over the `Story` table.
///
/// `update` persists `state` and `updated_at` only; on a state change it
/// MUST call the Transition Validator with the previous persisted state
/// and the new state, failing with `EngineError::IllegalTransition` if
/// invalid. Implementations achieve the "exactly one winner" concurrency
/// guarantee either via row-level locking or an optimistic
/// compare-and-set on `state` at commit time.
#[async_trait]
pub trait StoryRepo: Send {
    async fn insert(&mut self, story: Story) -> Result<Story, EngineError>;

    async fn find_by_id(&mut self, id: StoryId) -> Result<Option<Story>, EngineError>;

    /// Ordered by `created_at` ASC.
    async fn find_by_state(&mut self, stage: &str) -> Result<Vec<Story>, EngineError>;

    async fn find_oldest_by_state(&mut self, stage: &str) -> Result<Option<Story>, EngineError>;

    async fn count_by_state(&mut self, stage: &str) -> Result<i64, EngineError>;

    /// Persists `story.state` and `story.updated_at`. Validates the
    /// previous→new state transition before writing when `state`
    /// differs from what is currently persisted.
    async fn update(&mut self, story: &Story) -> Result<(), EngineError>;
}

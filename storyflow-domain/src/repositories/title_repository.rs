// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Title repository port. Same shape as [`super::ContentRepo`], over the
//! `Title` table.

use crate::entities::Title;
use crate::error::EngineError;
use crate::value_objects::{ArtifactVersion, ReviewId, StoryId, TitleId};
use async_trait::async_trait;

#[async_trait]
pub trait TitleRepo: Send {
    /// Fails with `EngineError::VersionConflict` on a conflicting
    /// `(story_id, version)`.
    async fn insert(&mut self, title: Title) -> Result<Title, EngineError>;

    async fn find_by_id(&mut self, id: TitleId) -> Result<Option<Title>, EngineError>;

    async fn find_latest_version(&mut self, story_id: StoryId) -> Result<Option<Title>, EngineError>;

    /// Ascending by version.
    async fn find_versions(&mut self, story_id: StoryId) -> Result<Vec<Title>, EngineError>;

    async fn find_version(&mut self, story_id: StoryId, version: ArtifactVersion) -> Result<Option<Title>, EngineError>;

    /// Idempotent only if the stored `review_id` equals `review_id`;
    /// otherwise fails with `EngineError::AlreadyReviewed`.
    async fn set_review_id(&mut self, artifact_id: TitleId, review_id: ReviewId) -> Result<(), EngineError>;
}

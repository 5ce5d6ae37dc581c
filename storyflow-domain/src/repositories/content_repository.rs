// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Content repository port. Same shape as [`super::TitleRepo`], over the
//! `Content` table.

use crate::entities::Content;
use crate::error::EngineError;
use crate::value_objects::{ArtifactVersion, ContentId, ReviewId, StoryId};
use async_trait::async_trait;

#[async_trait]
pub trait ContentRepo: Send {
    async fn insert(&mut self, content: Content) -> Result<Content, EngineError>;

    async fn find_by_id(&mut self, id: ContentId) -> Result<Option<Content>, EngineError>;

    async fn find_latest_version(&mut self, story_id: StoryId) -> Result<Option<Content>, EngineError>;

    async fn find_versions(&mut self, story_id: StoryId) -> Result<Vec<Content>, EngineError>;

    async fn find_version(&mut self, story_id: StoryId, version: ArtifactVersion) -> Result<Option<Content>, EngineError>;

    async fn set_review_id(&mut self, artifact_id: ContentId, review_id: ReviewId) -> Result<(), EngineError>;
}

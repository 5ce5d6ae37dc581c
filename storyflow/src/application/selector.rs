// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Work Selector (C4) infrastructure glue.
//!
//! The selection *policy* is pure and lives in
//! `storyflow_domain::services::work_selection`; this module runs the one
//! bounded candidate query and hands the result to that policy, and adds
//! the read-only preview operation `spec.md` §4.4 calls for.

use std::sync::Arc;

use storyflow_domain::error::EngineError;
use storyflow_domain::repositories::SelectionQueryRepo;
use storyflow_domain::services::{select, story_score, work_version_bucket, StageKind};
use storyflow_domain::value_objects::StoryId;

/// Diagnostic context for the Story a stage would pick next, without
/// mutating anything (`spec.md` §4.4 "Preview operation").
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPreview {
    pub stage: String,
    pub story_id: StoryId,
    pub work_version_bucket: i32,
    pub story_score: f64,
}

pub struct WorkSelector {
    query_repo: Arc<dyn SelectionQueryRepo>,
}

impl WorkSelector {
    pub fn new(query_repo: Arc<dyn SelectionQueryRepo>) -> Self {
        Self { query_repo }
    }

    /// The Story id the deterministic priority policy would pick for
    /// `stage`, or `None` if the stage has no candidates.
    pub async fn pick(&self, stage: &str) -> Result<Option<StoryId>, EngineError> {
        let kind = StageKind::classify(stage);
        let candidates = self.query_repo.candidates_for_stage(stage).await?;
        Ok(select(&candidates, kind).map(|c| c.story_id))
    }

    /// Read-only: the same pick, with the bucket/score diagnostics that
    /// produced it attached.
    pub async fn preview(&self, stage: &str) -> Result<Option<SelectionPreview>, EngineError> {
        let kind = StageKind::classify(stage);
        let candidates = self.query_repo.candidates_for_stage(stage).await?;
        Ok(select(&candidates, kind).map(|winner| SelectionPreview {
            stage: stage.to_string(),
            story_id: winner.story_id,
            work_version_bucket: work_version_bucket(winner, kind),
            story_score: story_score(winner),
        }))
    }
}

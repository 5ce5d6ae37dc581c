// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Work Selector query port (C4 read side).
//!
//! The selection *policy* (bucketing, story score, tiebreaks) is pure and
//! lives in [`crate::services::work_selection`]; this trait is the single
//! bounded query the infrastructure layer runs to produce the candidate
//! rows that policy operates over.

use crate::error::EngineError;
use crate::services::SelectionCandidate;
use async_trait::async_trait;

#[async_trait]
pub trait SelectionQueryRepo: Send + Sync {
    /// All Stories currently in `stage`, each annotated with the
    /// aggregated version/review data the selection policy needs.
    /// Expected to be backed by indices on `Story(state)`,
    /// `Title(story_id, version)`, `Content(story_id, version)`.
    async fn candidates_for_stage(&self, stage: &str) -> Result<Vec<SelectionCandidate>, EngineError>;
}

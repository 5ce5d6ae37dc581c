// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Title Entity
//!
//! A versioned title string for a Story. Append-only: once inserted,
//! `text` and `version` never change; `review_id` may be assigned exactly
//! once (null → some Review id).

use crate::value_objects::{ArtifactVersion, ReviewId, StoryId, TitleId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: TitleId,
    pub story_id: StoryId,
    pub version: ArtifactVersion,
    pub text: String,
    pub review_id: Option<ReviewId>,
    pub created_at: DateTime<Utc>,
}

impl Title {
    /// Build the pre-insert shape of a new Title version. `text` must be
    /// non-empty; callers are expected to have already
    /// validated that upstream (the Processor contract guarantees
    /// non-empty output), so this constructor does not re-check it —
    /// the store enforces it at the `INSERT` boundary instead.
    pub fn new_unsaved(story_id: StoryId, version: ArtifactVersion, text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: TitleId::new(0),
            story_id,
            version,
            text: text.into(),
            review_id: None,
            created_at: now,
        }
    }

    pub fn has_review(&self) -> bool {
        self.review_id.is_some()
    }
}

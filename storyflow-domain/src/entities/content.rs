// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Content Entity
//!
//! A versioned script/body text for a Story. Same shape and invariants as
//! `Title`, in its own namespace.

use crate::value_objects::{ArtifactVersion, ContentId, ReviewId, StoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: ContentId,
    pub story_id: StoryId,
    pub version: ArtifactVersion,
    pub text: String,
    pub review_id: Option<ReviewId>,
    pub created_at: DateTime<Utc>,
}

impl Content {
    pub fn new_unsaved(story_id: StoryId, version: ArtifactVersion, text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ContentId::new(0),
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

// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Story Entity
//!
//! The unit of work advancing through the pipeline's fixed stage graph.
//!
//! A Story's `state` is its only mutable field besides `updated_at`; it
//! is never deleted. It does **not** carry a pointer to its current Title
//! or Content — that is always a derived `ORDER BY version DESC LIMIT 1`
//! query rather than a cached pointer kept in sync on every write.

use crate::value_objects::{StageName, StoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The content-production unit advancing through the workflow.
///
/// Invariant I1: `state` is always a member of the State Catalog's known
/// stages — enforced by `StoryRepo::update` calling the Transition
/// Validator before any state-change write lands, not by this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    /// Opaque reference to the originating idea; treated as external.
    pub idea_ref: String,
    pub state: StageName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Story {
    /// Construct a new Story in its initial stage. The store assigns the
    /// id on insertion; this constructor builds the pre-insert value with
    /// a placeholder id of `0`, which the store overwrites once the row
    /// is stamped with its real identity.
    pub fn new_unsaved(idea_ref: impl Into<String>, initial_state: impl Into<StageName>, now: DateTime<Utc>) -> Self {
        Self {
            id: StoryId::new(0),
            idea_ref: idea_ref.into(),
            state: initial_state.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_unsaved_carries_the_same_timestamp_twice() {
        let now = Utc::now();
        let story = Story::new_unsaved("idea-1", "Title.From.Idea", now);
        assert_eq!(story.created_at, story.updated_at);
        assert_eq!(story.state.as_str(), "Title.From.Idea");
    }
}

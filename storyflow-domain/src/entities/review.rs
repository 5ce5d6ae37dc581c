// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Review Entity
//!
//! An immutable record of a scoring pass. Reviews are created once and
//! never modified; their linkage to the artifact they reviewed is held by
//! the artifact's `review_id` field, not the reverse — a Review carries
//! no back-reference and belongs to at most one artifact.

use crate::value_objects::{ReviewId, Score};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub text: String,
    pub score: Score,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new_unsaved(text: impl Into<String>, score: Score, now: DateTime<Utc>) -> Self {
        Self {
            id: ReviewId::new(0),
            text: text.into(),
            score,
            created_at: now,
        }
    }
}
